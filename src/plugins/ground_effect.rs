use bevy::prelude::*;
use std::path::PathBuf;

use crate::components::{GroundEffectTransition, StageSeparated, VehicleModified};
use crate::physics::ground_effect::EffectSession;
use crate::plugins::AeroForceSet;
use crate::resources::{ActiveVehicle, GroundEffectConfig};
use crate::systems::{
    ground_effect_startup_system, ground_effect_teardown_system, ground_effect_tick_system,
    vehicle_modified_system,
};

/// Ground effect stages, both ahead of the aerodynamics pipeline
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum GroundEffectSet {
    Notifications,
    Tick,
}

/// Adds the ground effect drag modifier to the fixed physics step.
///
/// Add [`AeroForcePlugin`](crate::plugins::AeroForcePlugin) (or another
/// pipeline that inserts [`AeroForceEngine`](crate::plugins::AeroForceEngine))
/// first; without it the session disables itself at startup.
#[derive(Default)]
pub struct GroundEffectPlugin {
    pub config: Option<GroundEffectConfig>,
    pub config_path: Option<PathBuf>,
}

impl GroundEffectPlugin {
    pub fn with_config(config: GroundEffectConfig) -> Self {
        Self {
            config: Some(config),
            config_path: None,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config: None,
            config_path: Some(path.into()),
        }
    }

    fn resolve_config(&self) -> GroundEffectConfig {
        match (&self.config, &self.config_path) {
            (Some(config), _) => config.clone(),
            (None, Some(path)) => GroundEffectConfig::load_or_default(path),
            (None, None) => GroundEffectConfig::default(),
        }
    }
}

fn ground_effect_enabled(session: Res<EffectSession>) -> bool {
    session.is_enabled()
}

impl Plugin for GroundEffectPlugin {
    fn build(&self, app: &mut App) {
        let config = self.resolve_config();

        app.insert_resource(EffectSession::new(config))
            .init_resource::<ActiveVehicle>()
            .init_resource::<Time<Fixed>>()
            .add_event::<VehicleModified>()
            .add_event::<StageSeparated>()
            .add_event::<GroundEffectTransition>();

        app.configure_sets(
            FixedUpdate,
            (GroundEffectSet::Notifications, GroundEffectSet::Tick)
                .chain()
                .before(AeroForceSet::ApplyModifiers),
        );

        app.add_systems(Startup, ground_effect_startup_system);
        app.add_systems(
            FixedUpdate,
            (
                vehicle_modified_system.in_set(GroundEffectSet::Notifications),
                ground_effect_tick_system.in_set(GroundEffectSet::Tick),
            )
                .run_if(ground_effect_enabled),
        );
        app.add_systems(Last, ground_effect_teardown_system);
    }
}
