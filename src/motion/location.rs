//! Arrow location calculators, one per family of motion kinds

use super::types::{Color, Location, MotionAttributes, MotionKind, RotationDirection};
use crate::letter::LetterType;
use Location::*;

/// What a calculator may know about the rest of the pictograph
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowContext<'a> {
    pub letter_type: Option<LetterType>,
    /// The opposite-color motion, when known
    pub sibling: Option<&'a MotionAttributes>,
}

impl<'a> ArrowContext<'a> {
    pub fn new(letter_type: Option<LetterType>, sibling: Option<&'a MotionAttributes>) -> Self {
        Self {
            letter_type,
            sibling,
        }
    }
}

/// Derives where a motion's arrow sits on the grid.
///
/// `None` means the location cannot be determined yet.
pub trait LocationCalculator {
    fn calculate_location(&self, motion: &MotionAttributes, ctx: &ArrowContext<'_>)
        -> Option<Location>;
}

/// Pick the calculator for a motion kind
pub fn calculator_for(kind: MotionKind) -> &'static dyn LocationCalculator {
    match kind {
        MotionKind::Pro | MotionKind::Anti | MotionKind::Float => &ShiftLocationCalculator,
        MotionKind::Dash => &DashLocationCalculator,
        MotionKind::Static => &StaticLocationCalculator,
    }
}

/// Shifts sit midway between their start and end points
#[derive(Debug, Clone, Copy)]
pub struct ShiftLocationCalculator;

const SHIFT_MIDPOINTS: [((Location, Location), Location); 8] = [
    ((N, E), NE),
    ((E, S), SE),
    ((S, W), SW),
    ((W, N), NW),
    ((NE, SE), E),
    ((SE, SW), S),
    ((SW, NW), W),
    ((NW, NE), N),
];

impl ShiftLocationCalculator {
    /// Midpoint direction for an unordered pair of adjacent points
    pub fn midpoint(start: Location, end: Location) -> Option<Location> {
        SHIFT_MIDPOINTS
            .iter()
            .find(|((a, b), _)| (*a == start && *b == end) || (*a == end && *b == start))
            .map(|(_, mid)| *mid)
    }
}

impl LocationCalculator for ShiftLocationCalculator {
    fn calculate_location(
        &self,
        motion: &MotionAttributes,
        _ctx: &ArrowContext<'_>,
    ) -> Option<Location> {
        Self::midpoint(motion.start_location, motion.end_location)
    }
}

/// Dashes sit beside the line they travel along; which side depends on the
/// spin and, without turns, on what the other motion is doing.
#[derive(Debug, Clone, Copy)]
pub struct DashLocationCalculator;

const ZERO_TURN_DASH: [((Location, Location), Location); 8] = [
    ((N, S), E),
    ((E, W), S),
    ((S, N), W),
    ((W, E), N),
    ((NE, SW), SE),
    ((SE, NW), SW),
    ((SW, NE), NW),
    ((NW, SE), NE),
];

impl DashLocationCalculator {
    fn default_location(motion: &MotionAttributes) -> Option<Location> {
        ZERO_TURN_DASH
            .iter()
            .find(|(pair, _)| *pair == (motion.start_location, motion.end_location))
            .map(|(_, loc)| *loc)
    }

    fn spinning_location(motion: &MotionAttributes) -> Option<Location> {
        match motion.rotation_direction {
            RotationDirection::Clockwise => Some(motion.start_location.rotate_cw(2)),
            RotationDirection::CounterClockwise => Some(motion.start_location.rotate_cw(-2)),
            RotationDirection::NoRotation => None,
        }
    }

    /// The side of the dash line farther from `avoid`; None on a tie
    fn away_from(motion: &MotionAttributes, avoid: Location) -> Option<Location> {
        let left = motion.start_location.rotate_cw(-2);
        let right = motion.start_location.rotate_cw(2);
        let (l, r) = (left.separation(avoid), right.separation(avoid));
        if l > r {
            Some(left)
        } else if r > l {
            Some(right)
        } else {
            None
        }
    }

    fn contextual_location(motion: &MotionAttributes, ctx: &ArrowContext<'_>) -> Option<Location> {
        let sibling = ctx.sibling?;
        match ctx.letter_type? {
            LetterType::CrossShift if sibling.motion_kind.is_shift() => {
                let shift_arrow =
                    ShiftLocationCalculator::midpoint(sibling.start_location, sibling.end_location)?;
                Self::away_from(motion, shift_arrow)
            }
            LetterType::Dash if sibling.motion_kind == MotionKind::Static => {
                Self::away_from(motion, sibling.end_location)
            }
            LetterType::DualDash if sibling.motion_kind == MotionKind::Dash => {
                let same_axis = sibling.start_location == motion.start_location
                    || sibling.start_location == motion.start_location.opposite();
                if !same_axis || !sibling.turns.is_zero() {
                    return None;
                }
                let default = Self::default_location(motion)?;
                let collides = Self::default_location(sibling) == Some(default);
                match motion.color {
                    Color::Red if collides => Some(default.opposite()),
                    _ => Some(default),
                }
            }
            _ => None,
        }
    }
}

impl LocationCalculator for DashLocationCalculator {
    fn calculate_location(
        &self,
        motion: &MotionAttributes,
        ctx: &ArrowContext<'_>,
    ) -> Option<Location> {
        if motion.start_location.opposite() != motion.end_location {
            return None;
        }
        if !motion.turns.is_zero() {
            if let Some(loc) = Self::spinning_location(motion) {
                return Some(loc);
            }
        }
        Self::contextual_location(motion, ctx).or_else(|| Self::default_location(motion))
    }
}

/// Statics stay where they start
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationCalculator;

impl LocationCalculator for StaticLocationCalculator {
    fn calculate_location(
        &self,
        motion: &MotionAttributes,
        _ctx: &ArrowContext<'_>,
    ) -> Option<Location> {
        Some(motion.start_location)
    }
}
