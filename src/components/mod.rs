pub mod aero_force;
pub mod ground_effect;
pub mod vehicle;

pub use aero_force::AeroForceSlot;
pub use ground_effect::{GroundEffectTransition, StageSeparated, VehicleModified};
pub use vehicle::{
    part_entity, part_id, vehicle_id, PartRenderers, VehiclePart, VehicleTelemetry,
};
