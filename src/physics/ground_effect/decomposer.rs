use nalgebra::Vector3;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::physics::traits::{AeroForceModifier, PartForceContext};
use crate::utils::math::{is_finite_vector, project_onto_unit};

/// Shared, lock-free cell holding the current reduction fraction.
///
/// The tick handler writes it; modifiers only ever load it.
#[derive(Debug, Clone, Default)]
pub struct ReductionHandle(Arc<AtomicU64>);

impl ReductionHandle {
    pub fn new(value: f64) -> Self {
        Self(Arc::new(AtomicU64::new(value.to_bits())))
    }

    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A force split along the direction of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDecomposition {
    /// Component of the force along the drag axis (opposite to motion)
    pub drag: Vector3<f64>,
    /// Everything else: lift and side force
    pub remainder: Vector3<f64>,
}

impl DragDecomposition {
    /// Split `force` along `-velocity_direction`. The direction must be a unit vector.
    #[inline]
    pub fn decompose(force: Vector3<f64>, velocity_direction: &Vector3<f64>) -> Self {
        let drag_axis = -velocity_direction;
        let drag = project_onto_unit(&force, &drag_axis);
        Self {
            drag,
            remainder: force - drag,
        }
    }

    /// Scale only the drag component by `1 - reduction` and sum back up.
    #[inline]
    pub fn recombine(&self, reduction: f64) -> Vector3<f64> {
        self.remainder + self.drag * (1.0 - reduction)
    }
}

/// Remove `reduction` of the drag-aligned part of `force`.
///
/// Returns `force` untouched when there is nothing to reduce, when the
/// velocity is too small to define a direction, or when the inputs would
/// produce a non-finite result.
#[inline]
pub fn attenuate_drag(
    force: Vector3<f64>,
    surface_velocity: &Vector3<f64>,
    reduction: f64,
    min_velocity_sq: f64,
) -> Vector3<f64> {
    if reduction.is_nan() || reduction <= 0.0 {
        return force;
    }

    let speed_sq = surface_velocity.norm_squared();
    if !speed_sq.is_finite() || speed_sq < min_velocity_sq {
        return force;
    }

    let direction = surface_velocity / speed_sq.sqrt();
    let attenuated =
        DragDecomposition::decompose(force, &direction).recombine(reduction.min(1.0));

    if is_finite_vector(&attenuated) {
        attenuated
    } else {
        force
    }
}

/// The modifier attached to every part while the effect is active.
#[derive(Debug, Clone)]
pub struct DragReductionModifier {
    reduction: ReductionHandle,
    min_velocity_sq: f64,
}

impl DragReductionModifier {
    pub fn new(reduction: ReductionHandle, min_velocity_sq: f64) -> Self {
        Self {
            reduction,
            min_velocity_sq,
        }
    }

    pub fn reduction(&self) -> f64 {
        self.reduction.load()
    }
}

impl AeroForceModifier for DragReductionModifier {
    fn modify(&self, ctx: &PartForceContext, aero_force: Vector3<f64>) -> Vector3<f64> {
        let reduction = self.reduction.load();
        attenuate_drag(aero_force, &ctx.surface_velocity, reduction, self.min_velocity_sq)
    }
}
