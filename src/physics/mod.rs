pub mod error;
pub mod ground_effect;
pub mod traits;

pub use error::GroundEffectError;
pub use traits::{
    AeroForceHook, AeroForceModifier, Aabb, FlightTelemetry, FlightVehicle, PartForceContext,
    PartId, RendererBounds, RendererKind, VehicleId,
};
