//! Read-only view over a pictograph used by the key generators

use serde::Serialize;

use crate::grid::GridMode;
use crate::letter::{Letter, LetterCatalog, LetterType};
use crate::motion::{Color, ColorPair, Location, MotionPair, Orientation};

/// Orientation layer of the pair of props at the end of the motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationLayer {
    /// Both props radial
    Layer1,
    /// Both props non-radial
    Layer2,
    /// One of each
    Layer3,
}

impl OrientationLayer {
    pub fn of(blue: Orientation, red: Orientation) -> Self {
        match (blue.is_radial(), red.is_radial()) {
            (true, true) => OrientationLayer::Layer1,
            (false, false) => OrientationLayer::Layer2,
            _ => OrientationLayer::Layer3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrientationLayer::Layer1 => "layer1",
            OrientationLayer::Layer2 => "layer2",
            OrientationLayer::Layer3 => "layer3",
        }
    }
}

/// How the two hands are arranged relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Opposite points
    Alpha,
    /// Same point
    Beta,
    /// A quarter turn apart
    Gamma,
}

impl Arrangement {
    pub fn of(blue: Location, red: Location) -> Option<Self> {
        match blue.separation(red) {
            0 => Some(Arrangement::Beta),
            2 => Some(Arrangement::Gamma),
            4 => Some(Arrangement::Alpha),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arrangement::Alpha => "alpha",
            Arrangement::Beta => "beta",
            Arrangement::Gamma => "gamma",
        }
    }
}

/// Whether a shift leads or trails its sibling around the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadState {
    Leading,
    Trailing,
}

impl LeadState {
    /// The leading motion starts where the other one ends
    pub fn of(pair: &MotionPair) -> Option<ColorPair<LeadState>> {
        let (blue, red) = (&pair.blue, &pair.red);
        if !blue.motion_kind.is_shift() || !red.motion_kind.is_shift() {
            return None;
        }
        if blue.start_location == red.end_location {
            Some(ColorPair::new(LeadState::Leading, LeadState::Trailing))
        } else if red.start_location == blue.end_location {
            Some(ColorPair::new(LeadState::Trailing, LeadState::Leading))
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeadState::Leading => "leading",
            LeadState::Trailing => "trailing",
        }
    }
}

/// Facts about a pictograph that the key generators branch on.
///
/// Built fresh for each placement request.
#[derive(Debug, Clone)]
pub struct PlacementContext {
    pub letter: Letter,
    pub letter_type: Option<LetterType>,
    pub grid_mode: GridMode,
    pub end_orientations: Option<ColorPair<Orientation>>,
    pub layer: Option<OrientationLayer>,
    pub arrangement: Option<Arrangement>,
    pub lead_states: Option<ColorPair<LeadState>>,
    pub takes_dash_suffix: bool,
    pub ends_at_beta_letter: bool,
    pub always_special: bool,
    pub hybrid: bool,
    pub mixed_start: bool,
}

impl PlacementContext {
    pub fn new(
        pair: &MotionPair,
        letter: &Letter,
        grid_mode: GridMode,
        catalog: &LetterCatalog,
    ) -> Self {
        let end_orientations = pair.end_orientations();
        Self {
            letter: letter.clone(),
            letter_type: catalog.letter_type(letter),
            grid_mode,
            end_orientations,
            layer: end_orientations.map(|o| OrientationLayer::of(o.blue, o.red)),
            arrangement: Arrangement::of(pair.blue.end_location, pair.red.end_location),
            lead_states: LeadState::of(pair),
            takes_dash_suffix: catalog.takes_dash_suffix(letter),
            ends_at_beta_letter: catalog.ends_at_beta(letter),
            always_special: catalog.is_always_special(letter),
            hybrid: catalog.is_hybrid(letter) || pair.blue.motion_kind != pair.red.motion_kind,
            mixed_start: pair.blue.start_orientation.family()
                != pair.red.start_orientation.family(),
        }
    }

    pub fn ends_radial(&self) -> bool {
        self.layer == Some(OrientationLayer::Layer1)
    }

    pub fn ends_nonradial(&self) -> bool {
        self.layer == Some(OrientationLayer::Layer2)
    }

    pub fn ends_hybrid(&self) -> bool {
        self.layer == Some(OrientationLayer::Layer3)
    }

    pub fn lead_state(&self, color: Color) -> Option<LeadState> {
        self.lead_states.map(|states| *states.get(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{MotionAttributes, MotionKind};

    fn shift(color: Color, start: Location, end: Location) -> MotionAttributes {
        MotionAttributes::new(color, MotionKind::Pro, start, end)
    }

    #[test]
    fn test_arrangement_from_locations() {
        assert_eq!(Arrangement::of(Location::N, Location::S), Some(Arrangement::Alpha));
        assert_eq!(Arrangement::of(Location::E, Location::E), Some(Arrangement::Beta));
        assert_eq!(Arrangement::of(Location::N, Location::W), Some(Arrangement::Gamma));
        assert_eq!(Arrangement::of(Location::N, Location::NE), None);
    }

    #[test]
    fn test_layer_from_orientations() {
        assert_eq!(OrientationLayer::of(Orientation::In, Orientation::Out), OrientationLayer::Layer1);
        assert_eq!(
            OrientationLayer::of(Orientation::Clock, Orientation::Counter),
            OrientationLayer::Layer2
        );
        assert_eq!(OrientationLayer::of(Orientation::In, Orientation::Clock), OrientationLayer::Layer3);
    }

    #[test]
    fn test_lead_state() {
        // red ends where blue started, so blue leads
        let pair = MotionPair::new(
            shift(Color::Blue, Location::N, Location::E),
            shift(Color::Red, Location::W, Location::N),
        );
        let states = LeadState::of(&pair).unwrap();
        assert_eq!(states.blue, LeadState::Leading);
        assert_eq!(states.red, LeadState::Trailing);
    }

    #[test]
    fn test_context_predicates() {
        let pair = MotionPair::new(
            shift(Color::Blue, Location::N, Location::E).with_end_orientation(Orientation::In),
            shift(Color::Red, Location::S, Location::W).with_end_orientation(Orientation::Clock),
        );
        let ctx = PlacementContext::new(&pair, &"A".into(), GridMode::Diamond, &LetterCatalog::default());
        assert!(ctx.ends_hybrid());
        assert!(!ctx.ends_radial());
        assert_eq!(ctx.arrangement, Some(Arrangement::Alpha));
        assert!(!ctx.hybrid);
        assert!(!ctx.mixed_start);
        assert_eq!(ctx.lead_states, None);
    }
}
