#![allow(dead_code)]

use bevy::prelude::*;
use nalgebra::{Point3, Vector3};

use ground_effect::{
    components::{
        AeroForceSlot, GroundEffectTransition, PartRenderers, VehiclePart, VehicleTelemetry,
    },
    physics::ground_effect::EffectSession,
    physics::{Aabb, RendererBounds},
    plugins::{AeroForcePlugin, GroundEffectPlugin},
    resources::{ActiveVehicle, GroundEffectConfig},
};

/// Raw aero force every test part starts with: lift along +Y, drag along -Z.
pub fn raw_force() -> Vector3<f64> {
    Vector3::new(0.0, 500.0, -120.0)
}

pub const FIXED_HZ: f64 = 50.0;

pub fn wing_bounds(min_x: f64, max_x: f64) -> PartRenderers {
    PartRenderers(vec![RendererBounds::mesh(Aabb::new(
        Point3::new(min_x, -0.2, -0.8),
        Point3::new(max_x, 0.2, 0.8),
    ))])
}

// Builder for a headless app running the ground effect on the fixed step
pub struct TestAppBuilder {
    config: GroundEffectConfig,
    plugin: Option<GroundEffectPlugin>,
    with_engine: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: GroundEffectConfig::default(),
            plugin: None,
            with_engine: true,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GroundEffectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_plugin(mut self, plugin: GroundEffectPlugin) -> Self {
        self.plugin = Some(plugin);
        self
    }

    pub fn without_engine(mut self) -> Self {
        self.with_engine = false;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        if self.with_engine {
            app.add_plugins(AeroForcePlugin);
        }
        let plugin = self
            .plugin
            .unwrap_or_else(|| GroundEffectPlugin::with_config(self.config));
        app.add_plugins(plugin)
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));

        // Startup systems
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Three-part glider spanning `[-half_span, half_span]` on local X.
    pub fn spawn_glider(&mut self, half_span: f64) -> Entity {
        let world = self.app.world_mut();
        let vehicle = world.spawn(VehicleTelemetry::default()).id();

        for bounds in [
            wing_bounds(-0.6, 0.6),
            wing_bounds(-half_span, -0.6),
            wing_bounds(0.6, half_span),
        ] {
            world.spawn((
                VehiclePart { vehicle },
                bounds,
                AeroForceSlot::with_raw(raw_force()),
            ));
        }

        vehicle
    }

    pub fn set_active(&mut self, vehicle: Option<Entity>) {
        self.app
            .world_mut()
            .resource_mut::<ActiveVehicle>()
            .set(vehicle);
    }

    /// Level flight along +Z at `speed`, `agl` above flat ground at sea level.
    pub fn fly(&mut self, vehicle: Entity, speed: f64, agl: f64) {
        let world = self.app.world_mut();
        let mut telemetry = world
            .get_mut::<VehicleTelemetry>(vehicle)
            .expect("vehicle has telemetry");
        telemetry.surface_velocity = Vector3::new(0.0, 0.0, speed);
        telemetry.altitude_agl = agl;
        telemetry.altitude_asl = agl;
    }

    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Transition events emitted since the last call.
    pub fn transitions(&mut self) -> Vec<GroundEffectTransition> {
        self.app
            .world_mut()
            .resource_mut::<Events<GroundEffectTransition>>()
            .drain()
            .collect()
    }

    pub fn session(&self) -> &EffectSession {
        self.app.world().resource::<EffectSession>()
    }

    pub fn parts_of(&mut self, vehicle: Entity) -> Vec<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query::<(Entity, &VehiclePart)>();
        query
            .iter(world)
            .filter(|(_, part)| part.vehicle == vehicle)
            .map(|(entity, _)| entity)
            .collect()
    }

    pub fn slot(&self, part: Entity) -> &AeroForceSlot {
        self.app
            .world()
            .get::<AeroForceSlot>(part)
            .expect("part has a force slot")
    }

    pub fn slots_of(&mut self, vehicle: Entity) -> Vec<AeroForceSlot> {
        self.parts_of(vehicle)
            .into_iter()
            .map(|part| self.slot(part).clone())
            .collect()
    }
}
