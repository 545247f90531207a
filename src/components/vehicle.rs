use bevy::prelude::*;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::physics::{FlightTelemetry, PartId, RendererBounds, VehicleId};

/// Flight state of a vehicle, written by the host's flight model.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct VehicleTelemetry {
    /// Position in world space [m]
    pub position: Vector3<f64>,
    /// Attitude quaternion (rotation from vehicle-local to world frame)
    pub attitude: UnitQuaternion<f64>,
    /// Velocity relative to the surface/atmosphere [m/s]
    pub surface_velocity: Vector3<f64>,
    /// Radar altitude [m]
    pub altitude_agl: f64,
    /// Altitude above sea level [m]
    pub altitude_asl: f64,
    /// Nearby body has an atmosphere
    pub in_atmosphere: bool,
}

impl Default for VehicleTelemetry {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            surface_velocity: Vector3::zeros(),
            altitude_agl: 0.0,
            altitude_asl: 0.0,
            in_atmosphere: true,
        }
    }
}

impl VehicleTelemetry {
    pub fn local_frame(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.attitude)
    }

    pub fn flight_telemetry(&self) -> FlightTelemetry {
        FlightTelemetry {
            surface_velocity: self.surface_velocity,
            altitude_agl: self.altitude_agl,
            altitude_asl: self.altitude_asl,
            in_atmosphere: self.in_atmosphere,
        }
    }
}

/// Marks an entity as a part of `vehicle`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehiclePart {
    pub vehicle: Entity,
}

/// World-space renderer bounds of a part.
#[derive(Component, Debug, Clone, Default)]
pub struct PartRenderers(pub Vec<RendererBounds>);

pub fn vehicle_id(entity: Entity) -> VehicleId {
    VehicleId(entity.to_bits())
}

pub fn part_id(entity: Entity) -> PartId {
    PartId(entity.to_bits())
}

/// Entity behind a part handle, `None` if the bits are not a valid entity.
pub fn part_entity(part: PartId) -> Option<Entity> {
    Entity::try_from_bits(part.0).ok()
}
