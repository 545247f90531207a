pub mod config;
mod vehicle;

pub use config::GroundEffectConfig;
pub use vehicle::ActiveVehicle;
