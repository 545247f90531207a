use bevy::prelude::*;

use crate::components::{part_id, AeroForceSlot, VehiclePart, VehicleTelemetry};
use crate::physics::PartForceContext;

/// Runs each part's registered force modifier over its raw aerodynamic force.
/// Parts without a modifier, or whose vehicle is gone, pass the force through.
pub fn aero_force_system(
    mut parts: Query<(Entity, &VehiclePart, &mut AeroForceSlot)>,
    vehicles: Query<&VehicleTelemetry>,
) {
    for (entity, part, slot) in parts.iter_mut() {
        let slot = slot.into_inner();
        slot.applied = match (&slot.modifier, vehicles.get(part.vehicle)) {
            (Some(modifier), Ok(telemetry)) => {
                let ctx = PartForceContext {
                    part: part_id(entity),
                    surface_velocity: telemetry.surface_velocity,
                };
                modifier.modify(&ctx, slot.raw)
            }
            _ => slot.raw,
        };
    }
}
