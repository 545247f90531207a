//! Ground effect: near the surface, scale down the drag-aligned part of each
//! part's aerodynamic force while leaving lift and side force untouched.

mod decomposer;
mod geometry;
mod session;
mod strength;

pub use decomposer::{attenuate_drag, DragDecomposition, DragReductionModifier, ReductionHandle};
pub use geometry::{WingspanEstimate, WingspanEstimator, WingspanSource};
pub use session::{EffectSession, EffectState, EffectTransition};
pub use strength::{EffectThresholds, StrengthModel};
