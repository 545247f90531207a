mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use nalgebra::Vector3;
use pretty_assertions::assert_eq;
use std::io::Write;

use common::{raw_force, wing_bounds, TestAppBuilder};
use ground_effect::{
    components::{
        vehicle_id, AeroForceSlot, GroundEffectTransition, PartRenderers, StageSeparated,
        VehicleModified, VehiclePart,
    },
    physics::ground_effect::{EffectState, EffectThresholds, EffectTransition},
    plugins::GroundEffectPlugin,
};

const CRUISE: f64 = 40.0;

#[test]
fn test_descent_attaches_and_attenuates_drag() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 50.0);

    // First step only adopts the vehicle
    test_app.run_steps(1);
    assert_eq!(test_app.session().tracked_vehicle(), Some(vehicle_id(glider)));
    assert_relative_eq!(test_app.session().thresholds().start_altitude, 15.0, epsilon = 1e-9);
    assert_relative_eq!(test_app.session().thresholds().full_altitude, 7.5, epsilon = 1e-9);

    test_app.run_steps(5);
    assert!(test_app.transitions().is_empty());
    for slot in test_app.slots_of(glider) {
        assert!(!slot.has_modifier());
        assert_eq!(slot.applied, raw_force());
    }

    // Halfway between start (15 m) and full strength (7.5 m)
    test_app.fly(glider, CRUISE, 11.25);
    test_app.run_steps(1);
    assert_eq!(
        test_app.transitions(),
        vec![GroundEffectTransition {
            vehicle: Some(vehicle_id(glider)),
            transition: EffectTransition::Activated,
        }]
    );
    assert_relative_eq!(test_app.session().reduction_fraction(), 0.25, epsilon = 1e-9);
    assert_eq!(test_app.session().attached_parts().len(), 3);

    for slot in test_app.slots_of(glider) {
        assert!(slot.has_modifier());
        assert_relative_eq!(slot.applied, Vector3::new(0.0, 500.0, -90.0), epsilon = 1e-9);
    }

    // Climb out of the window
    test_app.fly(glider, CRUISE, 16.0);
    test_app.run_steps(1);
    assert_eq!(
        test_app.transitions(),
        vec![GroundEffectTransition {
            vehicle: Some(vehicle_id(glider)),
            transition: EffectTransition::Deactivated,
        }]
    );
    assert_eq!(test_app.session().reduction_fraction(), 0.0);
    for slot in test_app.slots_of(glider) {
        assert!(!slot.has_modifier());
        assert_eq!(slot.applied, raw_force());
    }
}

#[test]
fn test_continuous_descent_activates_once() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));

    let mut agl = 30.0;
    while agl > 0.5 {
        test_app.fly(glider, CRUISE, agl);
        test_app.run_steps(1);
        agl -= 0.05;
    }

    let transitions = test_app.transitions();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].transition, EffectTransition::Activated);
    assert_relative_eq!(test_app.session().reduction_fraction(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_slow_vehicle_is_not_affected() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, 2.0, 3.0);

    test_app.run_steps(10);
    assert!(test_app.transitions().is_empty());
    assert_eq!(test_app.session().state(), EffectState::Inactive);
}

#[test]
fn test_missing_engine_disables_session() {
    let mut test_app = TestAppBuilder::new().without_engine().build();
    assert!(!test_app.session().is_enabled());

    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 3.0);
    test_app.run_steps(10);

    assert!(test_app.transitions().is_empty());
    assert_eq!(test_app.session().tracked_vehicle(), None);
    for slot in test_app.slots_of(glider) {
        assert!(!slot.has_modifier());
    }
}

#[test]
fn test_switching_vehicle_detaches_previous() {
    let mut test_app = TestAppBuilder::new().build();
    let first = test_app.spawn_glider(7.5);
    let second = test_app.spawn_glider(5.0);
    test_app.fly(first, CRUISE, 3.0);
    test_app.fly(second, CRUISE, 100.0);

    test_app.set_active(Some(first));
    test_app.run_steps(2);
    assert!(test_app.session().is_active());
    test_app.transitions();

    test_app.set_active(Some(second));
    test_app.run_steps(1);
    assert_eq!(
        test_app.transitions(),
        vec![GroundEffectTransition {
            vehicle: Some(vehicle_id(first)),
            transition: EffectTransition::Deactivated,
        }]
    );
    assert_eq!(test_app.session().tracked_vehicle(), Some(vehicle_id(second)));
    assert_relative_eq!(test_app.session().thresholds().start_altitude, 10.0, epsilon = 1e-9);
    for slot in test_app.slots_of(first) {
        assert!(!slot.has_modifier());
    }
}

#[test]
fn test_losing_active_vehicle_detaches() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 3.0);
    test_app.run_steps(2);
    assert!(test_app.session().is_active());

    test_app.set_active(None);
    test_app.run_steps(1);
    assert_eq!(test_app.session().state(), EffectState::Inactive);
    assert_eq!(test_app.session().tracked_vehicle(), None);
    for slot in test_app.slots_of(glider) {
        assert!(!slot.has_modifier());
    }
}

#[test]
fn test_stage_separation_resyncs_parts() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 5.0);
    test_app.run_steps(2);
    assert_eq!(test_app.session().attached_parts().len(), 3);
    test_app.transitions();

    // Shed the left wing
    let left_wing = test_app
        .parts_of(glider)
        .into_iter()
        .find(|part| {
            test_app.app.world().get::<PartRenderers>(*part).map(|r| r.0[0].aabb.min.x)
                == Some(-7.5)
        })
        .expect("left wing present");
    test_app.app.world_mut().despawn(left_wing);
    test_app.send(StageSeparated { vehicle: glider });
    test_app.run_steps(1);

    let session = test_app.session();
    assert!(session.is_active());
    assert_eq!(session.attached_parts().len(), 2);
    assert_relative_eq!(session.thresholds().wingspan, 8.1, epsilon = 1e-9);
    assert_relative_eq!(session.thresholds().start_altitude, 8.1, epsilon = 1e-9);
    assert!(test_app.transitions().is_empty());

    for slot in test_app.slots_of(glider) {
        assert!(slot.has_modifier());
    }
}

#[test]
fn test_part_swap_without_notification_moves_modifier() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 5.0);
    test_app.run_steps(2);
    assert!(test_app.session().is_active());
    test_app.transitions();

    // Replace one part with a fresh entity, keeping the part count
    let old_part = test_app.parts_of(glider)[0];
    let world = test_app.app.world_mut();
    let bounds = world
        .get::<PartRenderers>(old_part)
        .cloned()
        .expect("renderers");
    world.despawn(old_part);
    let new_part = world
        .spawn((
            VehiclePart { vehicle: glider },
            bounds,
            AeroForceSlot::with_raw(raw_force()),
        ))
        .id();

    test_app.run_steps(1);
    assert!(test_app.session().is_active());
    assert!(test_app.transitions().is_empty());
    assert_eq!(test_app.session().attached_parts().len(), 3);
    assert!(test_app.slot(new_part).has_modifier());
    assert_relative_eq!(
        test_app.slot(new_part).applied,
        Vector3::new(0.0, 500.0, -60.0),
        epsilon = 1e-9
    );
}

#[test]
fn test_vehicle_modified_triggers_rescan() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 5.0);
    test_app.run_steps(2);

    // Swap in longer wings without changing the part count
    for part in test_app.parts_of(glider) {
        let world = test_app.app.world_mut();
        let mut renderers = world.get_mut::<PartRenderers>(part).expect("renderers");
        let min_x = renderers.0[0].aabb.min.x;
        if min_x < -1.0 {
            *renderers = wing_bounds(-15.0, -0.6);
        } else if min_x > 0.0 {
            *renderers = wing_bounds(0.6, 15.0);
        }
    }

    test_app.run_steps(1);
    assert_relative_eq!(test_app.session().thresholds().wingspan, 15.0, epsilon = 1e-9);

    test_app.send(VehicleModified { vehicle: glider });
    test_app.run_steps(1);
    assert_relative_eq!(test_app.session().thresholds().wingspan, 30.0, epsilon = 1e-9);
    assert_relative_eq!(test_app.session().thresholds().full_altitude, 15.0, epsilon = 1e-9);
    assert_relative_eq!(test_app.session().reduction_fraction(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_modification_of_other_vehicle_ignored() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    let bystander = test_app.spawn_glider(20.0);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 5.0);
    test_app.run_steps(2);

    test_app.send(VehicleModified { vehicle: bystander });
    test_app.run_steps(1);
    assert_relative_eq!(test_app.session().thresholds().wingspan, 15.0, epsilon = 1e-9);
}

#[test]
fn test_app_exit_tears_down() {
    let mut test_app = TestAppBuilder::new().build();
    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 3.0);
    test_app.run_steps(2);
    assert!(test_app.session().is_active());
    test_app.transitions();

    test_app.send(AppExit::Success);
    test_app.app.update();

    assert_eq!(test_app.session().state(), EffectState::Inactive);
    assert_eq!(test_app.session().tracked_vehicle(), None);
    assert_eq!(
        test_app.transitions(),
        vec![GroundEffectTransition {
            vehicle: Some(vehicle_id(glider)),
            transition: EffectTransition::Deactivated,
        }]
    );
    for slot in test_app.slots_of(glider) {
        assert!(!slot.has_modifier());
    }
}

#[test]
fn test_plugin_reads_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "adaptiveWingspan: false\nstartAltitude: 12\nendAltitude: 3\nmaxDragReduction: 0.4"
    )
    .expect("write config");

    let mut test_app = TestAppBuilder::new()
        .with_plugin(GroundEffectPlugin::from_file(file.path()))
        .build();
    assert_eq!(test_app.session().thresholds(), EffectThresholds::fixed(12.0, 3.0));
    assert_eq!(test_app.session().config().max_drag_reduction, 0.4);
    assert!(!test_app.session().config().adaptive_wingspan);

    let glider = test_app.spawn_glider(7.5);
    test_app.set_active(Some(glider));
    test_app.fly(glider, CRUISE, 2.0);
    test_app.run_steps(2);

    // Fixed thresholds ignore the measured span
    assert_eq!(test_app.session().thresholds(), EffectThresholds::fixed(12.0, 3.0));
    assert_relative_eq!(test_app.session().reduction_fraction(), 0.4, epsilon = 1e-9);
}
