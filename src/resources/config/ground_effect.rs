use bevy::log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use crate::physics::ground_effect::EffectThresholds;
use crate::physics::GroundEffectError;
use crate::utils::constants::*;

/// Tuning of the ground effect modifier.
///
/// Stored on disk as a flat key/value YAML mapping using the camelCase key
/// names. Loading is tolerant: a malformed key keeps its previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundEffectConfig {
    /// Fraction of drag removed at full strength, 0..=1
    pub max_drag_reduction: f64,
    /// Multiplier applied to the measured wingspan
    pub wingspan_scale: f64,
    /// Wingspan used when no usable geometry is found [m]
    pub default_wingspan: f64,
    /// AGL where the effect begins in the fixed-threshold strategy [m]
    pub start_altitude: f64,
    /// AGL at and below which the effect is at full strength in the fixed strategy [m]
    #[serde(rename = "endAltitude")]
    pub full_altitude: f64,
    /// Derive thresholds from the vehicle's wingspan instead of the fixed altitudes
    pub adaptive_wingspan: bool,
    /// Minimum surface speed for the effect to engage [m/s]
    pub min_surface_speed: f64,
    /// Squared speed below which the flight direction is not trusted [m^2/s^2]
    #[serde(rename = "minVelocitySquared")]
    pub min_velocity_sq: f64,
    /// ASL floor guarding against bogus altitude telemetry [m]
    pub min_sea_level_altitude: f64,
    /// Reduction below which the effect is treated as off
    pub activation_threshold: f64,
    /// Period of the throttled geometry re-scan [s]
    pub geometry_refresh_interval: f64,
    /// Period of the debug status line [s]
    pub status_log_interval: f64,
    /// Wingspans above this are treated as broken geometry [m]
    pub max_plausible_wingspan: f64,
    pub debug_mode: bool,
}

impl Default for GroundEffectConfig {
    fn default() -> Self {
        Self {
            max_drag_reduction: DEFAULT_MAX_DRAG_REDUCTION,
            wingspan_scale: DEFAULT_WINGSPAN_SCALE,
            default_wingspan: DEFAULT_WINGSPAN,
            start_altitude: DEFAULT_START_ALTITUDE,
            full_altitude: DEFAULT_FULL_ALTITUDE,
            adaptive_wingspan: true,
            min_surface_speed: MIN_SURFACE_SPEED,
            min_velocity_sq: MIN_VELOCITY_SQ,
            min_sea_level_altitude: MIN_SEA_LEVEL_ALTITUDE,
            activation_threshold: ACTIVATION_THRESHOLD,
            geometry_refresh_interval: GEOMETRY_REFRESH_INTERVAL,
            status_log_interval: STATUS_LOG_INTERVAL,
            max_plausible_wingspan: MAX_PLAUSIBLE_WINGSPAN,
            debug_mode: false,
        }
    }
}

impl GroundEffectConfig {
    /// Defaults overlaid with every valid key found in the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GroundEffectError> {
        let text = std::fs::read_to_string(path)?;
        Self::default().merge_str(&text)
    }

    /// Like [`GroundEffectConfig::load`] but never fails: an unreadable or
    /// broken file yields the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "Ground effect config {} not loaded ({}), using defaults",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GroundEffectError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Overlay the keys of a YAML mapping onto `self`.
    pub fn merge_str(mut self, text: &str) -> Result<Self, GroundEffectError> {
        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(self),
            other => {
                return Err(GroundEffectError::InvalidDocument(format!(
                    "expected a key/value mapping, found {}",
                    describe(&other)
                )))
            }
        };

        for (key, value) in mapping.iter() {
            let Some(key) = key.as_str() else {
                warn!("Ignoring non-string ground effect config key {:?}", key);
                continue;
            };
            if let Err(err) = self.apply(key, value) {
                warn!("{}, keeping {}", err, self.current_value(key));
            }
        }

        Ok(self)
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), GroundEffectError> {
        match key {
            "maxDragReduction" => {
                self.max_drag_reduction = number(key, value, |v| (0.0..=1.0).contains(&v))?
            }
            "wingspanScale" => self.wingspan_scale = number(key, value, |v| v > 0.0)?,
            "defaultWingspan" => self.default_wingspan = number(key, value, |v| v > 0.0)?,
            "startAltitude" | "effectStartAltitude" => {
                self.start_altitude = number(key, value, |v| v >= 0.0)?
            }
            "endAltitude" | "effectFullAltitude" => {
                self.full_altitude = number(key, value, |v| v >= 0.0)?
            }
            "adaptiveWingspan" => self.adaptive_wingspan = boolean(key, value)?,
            "minSurfaceSpeed" => self.min_surface_speed = number(key, value, |v| v >= 0.0)?,
            "minVelocitySquared" => self.min_velocity_sq = number(key, value, |v| v > 0.0)?,
            "minSeaLevelAltitude" => self.min_sea_level_altitude = number(key, value, |_| true)?,
            "activationThreshold" => {
                self.activation_threshold = number(key, value, |v| v >= 0.0)?
            }
            "geometryRefreshInterval" => {
                self.geometry_refresh_interval = number(key, value, |v| v > 0.0)?
            }
            "statusLogInterval" => self.status_log_interval = number(key, value, |v| v > 0.0)?,
            "maxPlausibleWingspan" => {
                self.max_plausible_wingspan = number(key, value, |v| v > 0.0)?
            }
            "debugMode" => self.debug_mode = boolean(key, value)?,
            _ => debug!("Unknown ground effect config key '{}'", key),
        }
        Ok(())
    }

    fn current_value(&self, key: &str) -> String {
        match key {
            "maxDragReduction" => self.max_drag_reduction.to_string(),
            "wingspanScale" => self.wingspan_scale.to_string(),
            "defaultWingspan" => self.default_wingspan.to_string(),
            "startAltitude" | "effectStartAltitude" => self.start_altitude.to_string(),
            "endAltitude" | "effectFullAltitude" => self.full_altitude.to_string(),
            "adaptiveWingspan" => self.adaptive_wingspan.to_string(),
            "minSurfaceSpeed" => self.min_surface_speed.to_string(),
            "minVelocitySquared" => self.min_velocity_sq.to_string(),
            "minSeaLevelAltitude" => self.min_sea_level_altitude.to_string(),
            "activationThreshold" => self.activation_threshold.to_string(),
            "geometryRefreshInterval" => self.geometry_refresh_interval.to_string(),
            "statusLogInterval" => self.status_log_interval.to_string(),
            "maxPlausibleWingspan" => self.max_plausible_wingspan.to_string(),
            "debugMode" => self.debug_mode.to_string(),
            _ => String::from("previous value"),
        }
    }

    /// Thresholds of the fixed-altitude strategy.
    pub fn fixed_thresholds(&self) -> EffectThresholds {
        EffectThresholds::fixed(self.start_altitude, self.full_altitude)
    }
}

fn number(key: &str, value: &Value, valid: impl Fn(f64) -> bool) -> Result<f64, GroundEffectError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && valid(v) => Ok(v),
        _ => Err(invalid(key, value)),
    }
}

fn boolean(key: &str, value: &Value) -> Result<bool, GroundEffectError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid(key, value)),
        },
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &Value) -> GroundEffectError {
    let rendered = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => describe(other).to_string(),
    };
    GroundEffectError::InvalidParameter {
        key: key.to_string(),
        value: rendered,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
