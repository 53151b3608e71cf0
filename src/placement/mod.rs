//! Arrow and prop placement
//!
//! Key generation, override-table lookup, quadrant rotation and overlap
//! resolution, tied together by [`PlacementEngine`].

pub mod beta;
pub mod config;
pub mod context;
pub mod engine;
pub mod keys;
pub mod quadrant;
pub mod resolver;
pub mod tables;

pub use beta::{
    BetaOutcome, BetaPositioner, OverlapClass, PropSize, PropType, SwapCondition, SwapRules,
};
pub use config::{EngineConfig, MissingAnchor};
pub use context::{Arrangement, LeadState, OrientationLayer, PlacementContext};
pub use engine::{
    arrow_location, ArrowPlacement, DrawOrder, FinalCoordinate, Placement, PlacementEngine,
    PropPlacement,
};
pub use keys::{special_orientation_key, turns_tuple, AttributeKey, LetterSuffix, PlacementKey};
pub use quadrant::{directional_offset, generate_directional_tuples, quadrant_index, rotate_offset};
pub use resolver::{PlacementResolver, PlacementSource, ResolvedOffset, SpecialLookup};
pub use tables::{DefaultPlacements, SpecialCell, SpecialPlacements};
