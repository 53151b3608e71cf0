//! Motion attributes and the per-motion calculators
//!
//! This module covers everything that can be derived from the two motions of
//! a pictograph before any placement table is consulted: the hand path
//! classification, each arrow's grid location, and each prop's end
//! orientation.

pub mod hand_rotation;
pub mod location;
pub mod orientation;
pub mod types;

pub use hand_rotation::{classify, classify_tokens, HandRotation};
pub use location::{
    calculator_for, ArrowContext, DashLocationCalculator, LocationCalculator,
    ShiftLocationCalculator, StaticLocationCalculator,
};
pub use orientation::{end_orientation, float_end_orientation, resolve_orientations};
pub use types::*;
