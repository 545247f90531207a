use bevy::prelude::*;

use crate::components::{vehicle_id, StageSeparated, VehicleModified};
use crate::physics::ground_effect::EffectSession;

/// Forwards part-set and staging notifications so geometry is re-measured.
pub fn vehicle_modified_system(
    mut session: ResMut<EffectSession>,
    mut modified: EventReader<VehicleModified>,
    mut separated: EventReader<StageSeparated>,
) {
    for event in modified.read() {
        session.notify_vehicle_modified(vehicle_id(event.vehicle));
    }
    for event in separated.read() {
        session.notify_vehicle_modified(vehicle_id(event.vehicle));
    }
}
