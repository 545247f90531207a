use bevy::prelude::*;

use crate::systems::aero_force_system;

/// Present when an aerodynamics pipeline that honours part modifiers is installed.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct AeroForceEngine;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum AeroForceSet {
    ApplyModifiers,
}

/// Minimal per-part aerodynamics pipeline: turns `AeroForceSlot::raw` into
/// `AeroForceSlot::applied` through whatever modifier is registered.
pub struct AeroForcePlugin;

impl Plugin for AeroForcePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AeroForceEngine>();

        app.configure_sets(FixedUpdate, AeroForceSet::ApplyModifiers);

        app.add_systems(
            FixedUpdate,
            aero_force_system.in_set(AeroForceSet::ApplyModifiers),
        );
    }
}
