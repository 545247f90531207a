use bevy::prelude::*;

use super::host::{EcsVehicle, PartQuery, SlotHook};
use crate::components::{AeroForceSlot, GroundEffectTransition, VehicleTelemetry};
use crate::physics::ground_effect::{EffectSession, EffectTransition};
use crate::plugins::AeroForceEngine;
use crate::resources::ActiveVehicle;

/// Fixed-step driver of the [`EffectSession`] for the active vehicle.
#[allow(clippy::too_many_arguments)]
pub fn ground_effect_tick_system(
    mut session: ResMut<EffectSession>,
    active: Res<ActiveVehicle>,
    time: Res<Time<Fixed>>,
    engine: Option<Res<AeroForceEngine>>,
    vehicles: Query<&VehicleTelemetry>,
    parts: PartQuery,
    mut slots: Query<&mut AeroForceSlot>,
    mut transitions: EventWriter<GroundEffectTransition>,
) {
    let dt = time.timestep().as_secs_f64();
    let mut hook = SlotHook::new(&mut slots, engine.is_some());

    // An active vehicle without telemetry is treated as no vehicle
    let view = active.get().and_then(|entity| {
        vehicles.get(entity).ok().map(|telemetry| EcsVehicle {
            entity,
            telemetry,
            parts: &parts,
        })
    });

    let previous = session.tracked_vehicle();
    if let Some(transition) = session.on_tick(view.as_ref(), &mut hook, dt) {
        let vehicle = match transition {
            EffectTransition::Activated => session.tracked_vehicle(),
            EffectTransition::Deactivated => previous,
        };
        transitions.send(GroundEffectTransition {
            vehicle,
            transition,
        });
    }
}
