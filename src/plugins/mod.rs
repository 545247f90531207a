mod aero_force;
mod ground_effect;

pub use aero_force::{AeroForceEngine, AeroForcePlugin, AeroForceSet};
pub use ground_effect::{GroundEffectPlugin, GroundEffectSet};
