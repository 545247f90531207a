use serde::{Deserialize, Serialize};

use crate::utils::constants::{FULL_STRENGTH_SPAN_RATIO, THRESHOLD_EPSILON};
use crate::utils::math::clamp01;

/// Altitude window of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectThresholds {
    /// Wingspan the window was derived from, zero for fixed thresholds [m]
    pub wingspan: f64,
    /// AGL where the effect begins to taper in [m]
    pub start_altitude: f64,
    /// AGL at and below which the effect is at full strength [m]
    pub full_altitude: f64,
}

impl EffectThresholds {
    /// Window scaled to the vehicle: starts at one effective span and is at
    /// full strength from half a span down.
    pub fn from_wingspan(wingspan: f64, scale: f64) -> Self {
        let effective_span = wingspan * scale;
        Self {
            wingspan,
            start_altitude: effective_span,
            full_altitude: effective_span * FULL_STRENGTH_SPAN_RATIO,
        }
    }

    pub fn fixed(start_altitude: f64, full_altitude: f64) -> Self {
        Self {
            wingspan: 0.0,
            start_altitude,
            full_altitude,
        }
    }

    /// Whether `agl` lies inside `[0, start_altitude]`.
    pub fn contains(&self, agl: f64) -> bool {
        (0.0..=self.start_altitude).contains(&agl)
    }
}

/// Maps altitude above ground to the fraction of drag removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthModel {
    pub max_drag_reduction: f64,
    pub thresholds: EffectThresholds,
}

impl StrengthModel {
    pub fn new(max_drag_reduction: f64, thresholds: EffectThresholds) -> Self {
        Self {
            max_drag_reduction,
            thresholds,
        }
    }

    /// Interpolation factor in [0, 1]: 1 at full strength, 0 at the start altitude.
    pub fn factor_at(&self, agl: f64) -> f64 {
        let EffectThresholds {
            start_altitude,
            full_altitude,
            ..
        } = self.thresholds;

        if agl <= full_altitude {
            return 1.0;
        }

        let span = start_altitude - full_altitude;
        if span <= THRESHOLD_EPSILON {
            return 1.0;
        }

        clamp01((start_altitude - agl) / span)
    }

    /// Drag reduction fraction in `[0, max_drag_reduction]`.
    pub fn reduction_at(&self, agl: f64) -> f64 {
        self.max_drag_reduction * self.factor_at(agl)
    }
}
