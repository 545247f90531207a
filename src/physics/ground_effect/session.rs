use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;
use std::collections::HashSet;
use std::sync::Arc;

use super::decomposer::{DragReductionModifier, ReductionHandle};
use super::geometry::{WingspanEstimate, WingspanEstimator};
use super::strength::{EffectThresholds, StrengthModel};
use crate::physics::traits::{
    AeroForceHook, AeroForceModifier, FlightTelemetry, FlightVehicle, PartId, VehicleId,
};
use crate::resources::config::GroundEffectConfig;

/// Whether the drag modifier is attached to the tracked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTransition {
    Activated,
    Deactivated,
}

/// Ground effect bookkeeping for the host's active vehicle.
///
/// Owned by the embedding application and driven through the `on_*` entry
/// points from the fixed physics step. The modifier is attached to the
/// tracked vehicle's parts exactly while the state is [`EffectState::Active`].
#[derive(Resource, Debug)]
pub struct EffectSession {
    config: GroundEffectConfig,
    estimator: WingspanEstimator,
    enabled: bool,
    tracked: Option<VehicleId>,
    state: EffectState,
    reduction: ReductionHandle,
    modifier: Arc<DragReductionModifier>,
    thresholds: EffectThresholds,
    last_estimate: Option<WingspanEstimate>,
    attached_parts: Vec<PartId>,
    known_part_count: usize,
    geometry_dirty: bool,
    since_geometry_scan: f64,
    since_status_log: f64,
}

impl EffectSession {
    pub fn new(config: GroundEffectConfig) -> Self {
        let reduction = ReductionHandle::default();
        let modifier = Arc::new(DragReductionModifier::new(
            reduction.clone(),
            config.min_velocity_sq,
        ));
        let thresholds = Self::initial_thresholds(&config);

        Self {
            estimator: WingspanEstimator::new(config.default_wingspan, config.max_plausible_wingspan),
            config,
            enabled: true,
            tracked: None,
            state: EffectState::Inactive,
            reduction,
            modifier,
            thresholds,
            last_estimate: None,
            attached_parts: Vec::new(),
            known_part_count: 0,
            geometry_dirty: false,
            since_geometry_scan: 0.0,
            since_status_log: 0.0,
        }
    }

    fn initial_thresholds(config: &GroundEffectConfig) -> EffectThresholds {
        if config.adaptive_wingspan {
            EffectThresholds::from_wingspan(config.default_wingspan, config.wingspan_scale)
        } else {
            config.fixed_thresholds()
        }
    }

    pub fn config(&self) -> &GroundEffectConfig {
        &self.config
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == EffectState::Active
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tracked_vehicle(&self) -> Option<VehicleId> {
        self.tracked
    }

    /// Current fraction of drag removed; zero while inactive.
    pub fn reduction_fraction(&self) -> f64 {
        self.reduction.load()
    }

    pub fn thresholds(&self) -> EffectThresholds {
        self.thresholds
    }

    pub fn last_estimate(&self) -> Option<WingspanEstimate> {
        self.last_estimate
    }

    pub fn attached_parts(&self) -> &[PartId] {
        &self.attached_parts
    }

    pub fn strength_model(&self) -> StrengthModel {
        StrengthModel::new(self.config.max_drag_reduction, self.thresholds)
    }

    /// The modifier this session registers with the aerodynamics engine.
    pub fn modifier(&self) -> Arc<dyn AeroForceModifier> {
        self.modifier.clone()
    }

    /// One-time startup. Returns `false` and disables the session when the
    /// aerodynamics engine behind `hook` is missing.
    pub fn on_initialize<H: AeroForceHook + ?Sized>(&mut self, hook: &H) -> bool {
        if !hook.is_available() {
            warn!("Aerodynamics engine not found, ground effect disabled");
            self.enabled = false;
            return false;
        }

        self.enabled = true;
        info!(
            "Ground effect loaded: max drag reduction {:.0}%, {} thresholds ({:.1} m to {:.1} m)",
            self.config.max_drag_reduction * 100.0,
            if self.config.adaptive_wingspan {
                "wingspan-adaptive"
            } else {
                "fixed"
            },
            self.thresholds.start_altitude,
            self.thresholds.full_altitude
        );
        true
    }

    /// Per fixed-step update. `vehicle` is the host's currently active
    /// vehicle, `None` when there is none.
    pub fn on_tick<V, H>(
        &mut self,
        vehicle: Option<&V>,
        hook: &mut H,
        dt: f64,
    ) -> Option<EffectTransition>
    where
        V: FlightVehicle + ?Sized,
        H: AeroForceHook + ?Sized,
    {
        if !self.enabled {
            return None;
        }

        let Some(vehicle) = vehicle else {
            return self.on_vehicle_changed(None::<&V>, hook);
        };

        // A switch tick only does the switch; evaluation starts next step.
        if self.tracked != Some(vehicle.id()) {
            return self.on_vehicle_changed(Some(vehicle), hook);
        }

        self.since_geometry_scan += dt;
        let part_set_changed =
            self.geometry_dirty || vehicle.part_count() != self.known_part_count;
        let scan_due = self.config.adaptive_wingspan
            && self.since_geometry_scan >= self.config.geometry_refresh_interval;

        if part_set_changed || scan_due {
            self.refresh_geometry(vehicle);
        }
        // Also catches same-count part swaps that arrive without a notification
        if self.is_active() {
            self.resync_parts(vehicle, hook);
        }

        let telemetry = vehicle.telemetry();
        let reduction = self.target_reduction(&telemetry);
        let should_be_active = reduction > self.config.activation_threshold;
        self.reduction
            .store(if should_be_active { reduction } else { 0.0 });

        let transition = match (self.state, should_be_active) {
            (EffectState::Inactive, true) => {
                self.activate(vehicle, hook, &telemetry);
                Some(EffectTransition::Activated)
            }
            (EffectState::Active, false) => self.deactivate(hook),
            _ => None,
        };

        if self.is_active() {
            self.log_status(&telemetry, dt);
        }

        transition
    }

    /// Adopt `vehicle` as the tracked vehicle, detaching from the previous one.
    pub fn on_vehicle_changed<V, H>(
        &mut self,
        vehicle: Option<&V>,
        hook: &mut H,
    ) -> Option<EffectTransition>
    where
        V: FlightVehicle + ?Sized,
        H: AeroForceHook + ?Sized,
    {
        let transition = self.deactivate(hook);

        match vehicle {
            Some(vehicle) => {
                if self.tracked != Some(vehicle.id()) {
                    info!("Ground effect now tracking vehicle {:?}", vehicle.id());
                }
                self.tracked = Some(vehicle.id());
                self.since_status_log = 0.0;
                self.refresh_geometry(vehicle);
            }
            None => {
                if let Some(previous) = self.tracked.take() {
                    debug!("Vehicle {:?} gone, ground effect tracking cleared", previous);
                }
            }
        }

        transition
    }

    /// The vehicle's part set or shape changed (docking, staging, editing).
    /// Geometry is re-measured on the next tick.
    pub fn notify_vehicle_modified(&mut self, vehicle: VehicleId) {
        if self.tracked == Some(vehicle) {
            self.geometry_dirty = true;
        }
    }

    /// Host is unloading the subsystem: detach everything.
    pub fn on_teardown<H: AeroForceHook + ?Sized>(&mut self, hook: &mut H) -> Option<EffectTransition> {
        let transition = self.deactivate(hook);
        self.tracked = None;
        transition
    }

    fn target_reduction(&self, telemetry: &FlightTelemetry) -> f64 {
        let speed = telemetry.surface_velocity.norm();
        let engaged = telemetry.in_atmosphere
            && speed > self.config.min_surface_speed
            && self.thresholds.contains(telemetry.altitude_agl)
            && telemetry.altitude_asl > self.config.min_sea_level_altitude;

        if engaged {
            self.strength_model().reduction_at(telemetry.altitude_agl)
        } else {
            0.0
        }
    }

    fn refresh_geometry<V: FlightVehicle + ?Sized>(&mut self, vehicle: &V) {
        if self.config.adaptive_wingspan {
            let estimate = self.estimator.estimate(vehicle);
            self.thresholds =
                EffectThresholds::from_wingspan(estimate.wingspan, self.config.wingspan_scale);
            self.last_estimate = Some(estimate);
        } else {
            self.thresholds = self.config.fixed_thresholds();
        }

        self.known_part_count = vehicle.part_count();
        self.geometry_dirty = false;
        self.since_geometry_scan = 0.0;
    }

    fn activate<V, H>(&mut self, vehicle: &V, hook: &mut H, telemetry: &FlightTelemetry)
    where
        V: FlightVehicle + ?Sized,
        H: AeroForceHook + ?Sized,
    {
        let parts = vehicle.part_ids();
        let modifier = self.modifier();
        for part in &parts {
            hook.set_modifier(*part, Some(modifier.clone()));
        }

        info!(
            "Ground effect active on vehicle {:?}: {} parts, {:.1}% drag reduction at {:.1} m AGL",
            vehicle.id(),
            parts.len(),
            self.reduction_fraction() * 100.0,
            telemetry.altitude_agl
        );

        self.attached_parts = parts;
        self.state = EffectState::Active;
        self.since_status_log = 0.0;
    }

    /// No-op when already inactive.
    fn deactivate<H: AeroForceHook + ?Sized>(&mut self, hook: &mut H) -> Option<EffectTransition> {
        if self.state == EffectState::Inactive {
            return None;
        }

        for part in self.attached_parts.drain(..) {
            hook.set_modifier(part, None);
        }
        self.reduction.store(0.0);
        self.state = EffectState::Inactive;

        info!("Ground effect inactive");
        Some(EffectTransition::Deactivated)
    }

    /// Bring attachments in line with the vehicle's current part set.
    fn resync_parts<V, H>(&mut self, vehicle: &V, hook: &mut H)
    where
        V: FlightVehicle + ?Sized,
        H: AeroForceHook + ?Sized,
    {
        let current = vehicle.part_ids();
        let current_set: HashSet<PartId> = current.iter().copied().collect();
        let attached_set: HashSet<PartId> = self.attached_parts.iter().copied().collect();
        if current_set == attached_set {
            return;
        }

        for stale in attached_set.difference(&current_set) {
            hook.set_modifier(*stale, None);
        }
        let modifier = self.modifier();
        for fresh in current_set.difference(&attached_set) {
            hook.set_modifier(*fresh, Some(modifier.clone()));
        }

        debug!(
            "Ground effect parts re-synced: {} -> {}",
            self.attached_parts.len(),
            current.len()
        );
        self.attached_parts = current;
    }

    fn log_status(&mut self, telemetry: &FlightTelemetry, dt: f64) {
        if !self.config.debug_mode {
            return;
        }
        self.since_status_log += dt;
        if self.since_status_log < self.config.status_log_interval {
            return;
        }
        self.since_status_log = 0.0;

        info!(
            "Ground effect: AGL {:.2} m, speed {:.1} m/s, drag -{:.1}%, window {:.1}..{:.1} m, span {:.2} m",
            telemetry.altitude_agl,
            telemetry.surface_velocity.norm(),
            self.reduction_fraction() * 100.0,
            self.thresholds.full_altitude,
            self.thresholds.start_altitude,
            self.thresholds.wingspan
        );
    }
}
