//! Pictograph Placement - motion attribute and arrow placement resolution
//!
//! This library derives, for the two simultaneous motions of a pictograph,
//! each prop's end orientation, each arrow's grid location, the lookup keys
//! for placement overrides and the final anchored coordinates, including the
//! separation of props that end on the same point.
//!
//! # Example
//!
//! ```rust
//! use pictograph_placement::{place, Color, GridMode, Location, MotionAttributes, MotionKind, MotionPair, RotationDirection, Turns};
//!
//! let mut motions = MotionPair::new(
//!     MotionAttributes::new(Color::Blue, MotionKind::Pro, Location::S, Location::W)
//!         .with_turns(Turns::whole(1))
//!         .with_rotation(RotationDirection::Clockwise),
//!     MotionAttributes::new(Color::Red, MotionKind::Pro, Location::N, Location::E)
//!         .with_turns(Turns::whole(1))
//!         .with_rotation(RotationDirection::Clockwise),
//! );
//! let placement = place(&mut motions, "A", GridMode::Diamond).unwrap();
//! assert_eq!(placement.arrows.red.location, Some(Location::NE));
//! ```

pub mod catalog;
pub mod error;
pub mod grid;
pub mod letter;
pub mod motion;
pub mod placement;
pub mod reference;

pub use catalog::{mirror_vertical, rotate, rotate_45, AttributeRecord, PictographRecord};
pub use error::{PlacementError, ReferenceDataError};
pub use grid::{AnchorCache, GridAnchor, GridGeometry, GridMode, Offset, Point};
pub use letter::{Letter, LetterCatalog, LetterType};
pub use motion::{
    classify, end_orientation, resolve_orientations, Color, ColorPair, HandRotation, Location,
    MotionAttributes, MotionKind, MotionPair, Orientation, OrientationFamily, RotationDirection,
    Turns,
};
pub use placement::{
    ArrowPlacement, DefaultPlacements, DrawOrder, EngineConfig, FinalCoordinate, MissingAnchor,
    OverlapClass, Placement, PlacementEngine, PlacementKey, PropPlacement, PropType,
    SpecialPlacements, SwapRules,
};
pub use reference::ReferenceData;

/// Place a pictograph with the compiled-in reference data and default
/// configuration.
///
/// Builds a fresh engine per call; callers placing many pictographs should
/// keep a [`PlacementEngine`] so the anchor cache is reused.
pub fn place(
    motions: &mut MotionPair,
    letter: &str,
    grid_mode: GridMode,
) -> Result<Placement, PlacementError> {
    PlacementEngine::default().place(motions, &Letter::new(letter), grid_mode)
}

/// Place a pictograph with explicit reference data and configuration
pub fn place_with_config(
    motions: &mut MotionPair,
    letter: &str,
    grid_mode: GridMode,
    reference: ReferenceData,
    config: EngineConfig,
) -> Result<Placement, PlacementError> {
    PlacementEngine::new(reference, config).place(motions, &Letter::new(letter), grid_mode)
}
