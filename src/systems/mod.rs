pub mod aero_force;
pub mod ground_effect;

pub use aero_force::aero_force_system;
pub use ground_effect::{
    ground_effect_startup_system, ground_effect_teardown_system, ground_effect_tick_system,
    vehicle_modified_system,
};
