use nalgebra::{Isometry3, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Handle identifying a vehicle. Compared for identity only, never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

/// Handle identifying a single part of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub u64);

/// Per-tick flight state sampled from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTelemetry {
    /// Velocity relative to the local atmosphere/ground frame [m/s]
    pub surface_velocity: Vector3<f64>,
    /// Radar altitude above the terrain [m]
    pub altitude_agl: f64,
    /// Altitude above the body's mean sea level [m]
    pub altitude_asl: f64,
    /// Whether the nearby body has an atmosphere
    pub in_atmosphere: bool,
}

impl Default for FlightTelemetry {
    fn default() -> Self {
        Self {
            surface_velocity: Vector3::zeros(),
            altitude_agl: 0.0,
            altitude_asl: 0.0,
            in_atmosphere: true,
        }
    }
}

/// What produced a renderer's bounds. FX renderers never describe airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RendererKind {
    Mesh,
    SkinnedMesh,
    Particle,
    Trail,
}

impl RendererKind {
    pub fn is_fx(&self) -> bool {
        matches!(self, RendererKind::Particle | RendererKind::Trail)
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn from_center_extents(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Finite and not inverted on any axis.
    pub fn is_well_formed(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
            && (0..3).all(|i| self.min[i] <= self.max[i])
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Bounds of one renderer attached to a part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RendererBounds {
    pub kind: RendererKind,
    pub enabled: bool,
    pub aabb: Aabb,
}

impl RendererBounds {
    pub fn mesh(aabb: Aabb) -> Self {
        Self {
            kind: RendererKind::Mesh,
            enabled: true,
            aabb,
        }
    }
}

/// Read-only view of a vehicle owned by the host.
pub trait FlightVehicle {
    fn id(&self) -> VehicleId;

    fn telemetry(&self) -> FlightTelemetry;

    /// Transform from the vehicle's local frame to world space.
    /// Local X is lateral, Y is up and Z is forward.
    fn local_frame(&self) -> Isometry3<f64>;

    fn part_count(&self) -> usize;

    fn part_ids(&self) -> Vec<PartId>;

    /// Visit every renderer of every part, enabled or not.
    fn for_each_renderer(&self, visit: &mut dyn FnMut(PartId, &RendererBounds));
}

/// Context handed to a modifier for one part on one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartForceContext {
    pub part: PartId,
    pub surface_velocity: Vector3<f64>,
}

/// Callback invoked by the aerodynamics engine for every part it is attached to.
pub trait AeroForceModifier: Send + Sync {
    fn modify(&self, ctx: &PartForceContext, aero_force: Vector3<f64>) -> Vector3<f64>;
}

/// Registration point of the external aerodynamics engine.
pub trait AeroForceHook {
    /// Attach `modifier` to `part`, or remove any modifier with `None`.
    fn set_modifier(&mut self, part: PartId, modifier: Option<Arc<dyn AeroForceModifier>>);

    /// Whether the engine behind this hook is actually present.
    fn is_available(&self) -> bool {
        true
    }
}
