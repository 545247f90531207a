use bevy::prelude::*;

use super::host::SlotHook;
use crate::components::{AeroForceSlot, GroundEffectTransition};
use crate::physics::ground_effect::EffectSession;
use crate::plugins::AeroForceEngine;

/// Startup check for the aerodynamics engine; disables the session without one.
pub fn ground_effect_startup_system(
    mut session: ResMut<EffectSession>,
    engine: Option<Res<AeroForceEngine>>,
    mut slots: Query<&mut AeroForceSlot>,
) {
    let hook = SlotHook::new(&mut slots, engine.is_some());
    session.on_initialize(&hook);
}

/// Detaches the modifier from every part when the app exits.
pub fn ground_effect_teardown_system(
    mut exits: EventReader<AppExit>,
    mut session: ResMut<EffectSession>,
    engine: Option<Res<AeroForceEngine>>,
    mut slots: Query<&mut AeroForceSlot>,
    mut transitions: EventWriter<GroundEffectTransition>,
) {
    if exits.read().last().is_none() {
        return;
    }

    let vehicle = session.tracked_vehicle();
    let mut hook = SlotHook::new(&mut slots, engine.is_some());
    if let Some(transition) = session.on_teardown(&mut hook) {
        transitions.send(GroundEffectTransition {
            vehicle,
            transition,
        });
    }
}
