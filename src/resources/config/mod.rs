pub mod ground_effect;

pub use ground_effect::GroundEffectConfig;
