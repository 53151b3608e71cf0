//! Error types for placement and reference data loading

use std::path::PathBuf;

use thiserror::Error;

use crate::motion::{MotionKind, Turns};

/// Errors raised while resolving a placement.
///
/// Lookup misses and unresolved locations are not errors; they degrade to a
/// zero offset or an unset location and are reported through `tracing`.
#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    /// A rotating motion arrived without a rotation direction
    #[error("{motion_kind} motion with {turns} turns has no rotation direction")]
    InvalidRotationDirection { motion_kind: MotionKind, turns: Turns },
}

impl PlacementError {
    pub fn invalid_rotation(motion_kind: MotionKind, turns: Turns) -> Self {
        Self::InvalidRotationDirection { motion_kind, turns }
    }
}

/// Errors that can occur when loading reference data files
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Failed to read reference data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse reference data TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse reference data JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported reference data format: {}", path.display())]
    UnknownFormat { path: PathBuf },
}

impl ReferenceDataError {
    pub fn unknown_format(path: impl Into<PathBuf>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}
