//! Hand path classification from a motion's start and end locations

use serde::Serialize;

use super::types::{Location, RotationDirection};
use Location::*;

/// Which way the hand travels around the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRotation {
    Clockwise,
    CounterClockwise,
    Dash,
    Static,
    Unknown,
}

impl HandRotation {
    /// Spin direction implied by the hand path; dashes and statics have none
    pub fn rotation_direction(self) -> RotationDirection {
        match self {
            HandRotation::Clockwise => RotationDirection::Clockwise,
            HandRotation::CounterClockwise => RotationDirection::CounterClockwise,
            _ => RotationDirection::NoRotation,
        }
    }
}

const CLOCKWISE_PAIRS: [(Location, Location); 8] = [
    (N, E),
    (E, S),
    (S, W),
    (W, N),
    (NE, SE),
    (SE, SW),
    (SW, NW),
    (NW, NE),
];

const COUNTER_CLOCKWISE_PAIRS: [(Location, Location); 8] = [
    (N, W),
    (W, S),
    (S, E),
    (E, N),
    (NE, NW),
    (NW, SW),
    (SW, SE),
    (SE, NE),
];

const DASH_PAIRS: [(Location, Location); 8] = [
    (N, S),
    (S, N),
    (E, W),
    (W, E),
    (NE, SW),
    (SW, NE),
    (NW, SE),
    (SE, NW),
];

/// Classify the hand path between two locations.
///
/// Pairs that are neither a quarter step, a pass through the center, nor a
/// stay in place come back as `Unknown`.
pub fn classify(start: Location, end: Location) -> HandRotation {
    let pair = (start, end);
    if CLOCKWISE_PAIRS.contains(&pair) {
        HandRotation::Clockwise
    } else if COUNTER_CLOCKWISE_PAIRS.contains(&pair) {
        HandRotation::CounterClockwise
    } else if DASH_PAIRS.contains(&pair) {
        HandRotation::Dash
    } else if start == end {
        HandRotation::Static
    } else {
        HandRotation::Unknown
    }
}

/// Classify raw location tokens; tokens outside the vocabulary are `Unknown`
pub fn classify_tokens(start: &str, end: &str) -> HandRotation {
    match (Location::from_token(start), Location::from_token(end)) {
        (Some(s), Some(e)) => classify(s, e),
        _ => HandRotation::Unknown,
    }
}
