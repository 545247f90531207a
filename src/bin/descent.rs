use bevy::log::LogPlugin;
use bevy::prelude::*;
use nalgebra::{Point3, Vector3};
use std::env;

use ground_effect::{
    components::{AeroForceSlot, PartRenderers, VehiclePart, VehicleTelemetry},
    physics::ground_effect::EffectSession,
    physics::{Aabb, RendererBounds},
    plugins::{AeroForcePlugin, GroundEffectPlugin, GroundEffectSet},
    resources::ActiveVehicle,
};

const AIR_DENSITY: f64 = 1.225; // kg/m^3
const CRUISE_SPEED: f64 = 45.0; // m/s
const SINK_RATE: f64 = 1.5; // m/s
const START_AGL: f64 = 30.0; // m
const FLARE_AGL: f64 = 1.0; // m

/// Scripted vertical profile: sink from `START_AGL` to `FLARE_AGL`, then climb back out.
#[derive(Resource)]
struct Profile {
    elapsed: f64,
}

/// Per-part aero coefficients: (drag area, lift area) [m^2]
#[derive(Component)]
struct PartAero(f64, f64);

fn profile_altitude(elapsed: f64) -> f64 {
    let descent_time = (START_AGL - FLARE_AGL) / SINK_RATE;
    if elapsed <= descent_time {
        START_AGL - SINK_RATE * elapsed
    } else {
        (FLARE_AGL + SINK_RATE * (elapsed - descent_time)).min(START_AGL)
    }
}

fn flight_model_system(
    time: Res<Time<Fixed>>,
    mut profile: ResMut<Profile>,
    mut vehicles: Query<&mut VehicleTelemetry>,
    mut parts: Query<(&VehiclePart, &PartAero, &mut AeroForceSlot)>,
) {
    profile.elapsed += time.timestep().as_secs_f64();
    let agl = profile_altitude(profile.elapsed);
    let climbing = profile.elapsed > (START_AGL - FLARE_AGL) / SINK_RATE;
    let vertical = if climbing { SINK_RATE } else { -SINK_RATE };

    for mut telemetry in vehicles.iter_mut() {
        telemetry.altitude_agl = agl;
        telemetry.altitude_asl = agl + 3.0;
        telemetry.surface_velocity = Vector3::new(0.0, vertical, CRUISE_SPEED);
        telemetry.position = Vector3::new(0.0, agl, CRUISE_SPEED * profile.elapsed);
    }

    for (part, aero, mut slot) in parts.iter_mut() {
        let Ok(telemetry) = vehicles.get(part.vehicle) else {
            continue;
        };
        let velocity = telemetry.surface_velocity;
        let q = 0.5 * AIR_DENSITY * velocity.norm_squared();
        let drag = -velocity.normalize() * q * aero.0;
        let lift = Vector3::y() * q * aero.1;
        slot.raw = drag + lift;
    }
}

fn wing(min_x: f64, max_x: f64) -> PartRenderers {
    PartRenderers(vec![RendererBounds::mesh(Aabb::new(
        Point3::new(min_x, -0.2, -0.8),
        Point3::new(max_x, 0.2, 0.8),
    ))])
}

fn spawn_glider(mut commands: Commands, mut active: ResMut<ActiveVehicle>) {
    let vehicle = commands
        .spawn(VehicleTelemetry {
            altitude_agl: START_AGL,
            altitude_asl: START_AGL + 3.0,
            ..Default::default()
        })
        .id();

    let parts = [
        (wing(-0.6, 0.6), PartAero(0.30, 0.05)),
        (wing(-7.5, -0.6), PartAero(0.12, 2.10)),
        (wing(0.6, 7.5), PartAero(0.12, 2.10)),
    ];
    for (renderers, aero) in parts {
        commands.spawn((
            VehiclePart { vehicle },
            renderers,
            aero,
            AeroForceSlot::default(),
        ));
    }

    active.set(Some(vehicle));
}

fn main() {
    let config_path = env::args().nth(1);

    let ground_effect = match &config_path {
        Some(path) => GroundEffectPlugin::from_file(path),
        None => GroundEffectPlugin::default(),
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .add_plugins(AeroForcePlugin)
        .add_plugins(ground_effect)
        .insert_resource(Time::<Fixed>::from_hz(50.0))
        .insert_resource(Profile { elapsed: 0.0 })
        .add_systems(Startup, spawn_glider)
        .add_systems(
            FixedUpdate,
            flight_model_system.before(GroundEffectSet::Notifications),
        );

    // Startup systems and command flush
    app.update();

    let steps = ((START_AGL - FLARE_AGL) / SINK_RATE * 2.0 * 50.0) as usize;
    println!(
        "{:>7} {:>8} {:>10} {:>12} {:>12}",
        "t [s]", "AGL [m]", "reduction", "raw drag", "applied drag"
    );

    for step in 0..steps {
        app.world_mut().run_schedule(FixedUpdate);

        if step % 50 != 0 {
            continue;
        }

        let world = app.world_mut();
        let reduction = world.resource::<EffectSession>().reduction_fraction();
        let elapsed = world.resource::<Profile>().elapsed;
        let mut query = world.query::<&AeroForceSlot>();
        let (raw_drag, applied_drag) = query
            .iter(world)
            .fold((0.0, 0.0), |(raw, applied), slot| {
                (raw - slot.raw.z, applied - slot.applied.z)
            });

        println!(
            "{:>7.2} {:>8.2} {:>9.1}% {:>12.1} {:>12.1}",
            elapsed,
            profile_altitude(elapsed),
            reduction * 100.0,
            raw_drag,
            applied_drag
        );
    }

    app.world_mut().send_event(AppExit::Success);
    app.update();
}
