use bevy::prelude::*;

use crate::physics::ground_effect::EffectTransition;
use crate::physics::VehicleId;

/// A vehicle's part set or shape changed (docking, part added/removed).
#[derive(Event, Debug, Clone, Copy)]
pub struct VehicleModified {
    pub vehicle: Entity,
}

/// A vehicle shed a stage.
#[derive(Event, Debug, Clone, Copy)]
pub struct StageSeparated {
    pub vehicle: Entity,
}

/// Emitted whenever the ground effect attaches to or detaches from a vehicle.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundEffectTransition {
    pub vehicle: Option<VehicleId>,
    pub transition: EffectTransition,
}
