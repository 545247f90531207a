use bevy::prelude::*;
use nalgebra::Vector3;
use std::fmt;
use std::sync::Arc;

use crate::physics::AeroForceModifier;

/// Per-part aerodynamic force as computed by the aerodynamics pipeline.
///
/// `raw` is the engine's force; `applied` is what reaches the rigid body
/// after the optional modifier has run.
#[derive(Component, Clone, Default)]
pub struct AeroForceSlot {
    pub raw: Vector3<f64>,
    pub applied: Vector3<f64>,
    pub modifier: Option<Arc<dyn AeroForceModifier>>,
}

impl AeroForceSlot {
    pub fn with_raw(raw: Vector3<f64>) -> Self {
        Self {
            raw,
            applied: raw,
            modifier: None,
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.modifier.is_some()
    }
}

impl fmt::Debug for AeroForceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeroForceSlot")
            .field("raw", &self.raw)
            .field("applied", &self.applied)
            .field("has_modifier", &self.has_modifier())
            .finish()
    }
}
