//! Overlap resolution for props that end on the same grid point
//!
//! When both motions of a beta-ending letter finish at one location, the two
//! props would be drawn on top of each other. The pair is classified by prop
//! size and pushed apart symmetrically along an axis derived from the props'
//! orientation, with the side each prop takes set by the pair's combined
//! rotation. Small props may additionally swap sides according to a
//! letter-driven rule table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::{LeadState, PlacementContext};
use crate::error::ReferenceDataError;
use crate::grid::{Offset, Point};
use crate::motion::{Color, ColorPair, MotionPair, RotationDirection};
use crate::reference::read_document;

/// Object held in the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    Staff,
    Club,
    Fan,
    Triad,
    Minihoop,
    Buugeng,
    Sword,
    Ukulele,
    Doublestar,
    Guitar,
    BigStaff,
    BigHoop,
    BigFan,
    BigBuugeng,
    BigDoublestar,
    Hand,
}

/// Size class used to pick an overlap strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropSize {
    Small,
    Big,
    Hand,
}

impl PropType {
    pub fn size(self) -> PropSize {
        match self {
            PropType::Hand => PropSize::Hand,
            PropType::Guitar
            | PropType::Doublestar
            | PropType::BigStaff
            | PropType::BigHoop
            | PropType::BigFan
            | PropType::BigBuugeng
            | PropType::BigDoublestar => PropSize::Big,
            _ => PropSize::Small,
        }
    }
}

/// Which overlap strategy applies to a pair of props
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapClass {
    BigProps,
    SmallProps,
    Hands,
    /// No class holds exactly two items; positions are left alone
    Ambiguous,
}

impl OverlapClass {
    pub fn classify(props: &ColorPair<PropType>) -> Self {
        let sizes = [props.blue.size(), props.red.size()];
        let count = |size: PropSize| sizes.iter().filter(|s| **s == size).count();
        let (big, small, hands) = (count(PropSize::Big), count(PropSize::Small), count(PropSize::Hand));

        if big == 2 {
            OverlapClass::BigProps
        } else if small == 2 {
            OverlapClass::SmallProps
        } else if hands == 2 {
            OverlapClass::Hands
        } else {
            OverlapClass::Ambiguous
        }
    }
}

/// When a swap rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapCondition {
    Always,
    SameRotation,
    OppositeRotation,
    BlueLeading,
    RedLeading,
}

#[derive(Debug, Clone, Deserialize)]
struct SwapRule {
    letters: Vec<String>,
    when: SwapCondition,
}

/// Letter-driven rules deciding whether two small props swap sides
#[derive(Debug, Clone, Deserialize)]
pub struct SwapRules {
    #[serde(default, rename = "rule")]
    rules: Vec<SwapRule>,
}

const DEFAULT_SWAP_RULES: &str = r#"
[[rule]]
letters = ["G", "H"]
when = "same_rotation"

[[rule]]
letters = ["I"]
when = "opposite_rotation"
"#;

impl SwapRules {
    /// No rule ever fires
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        read_document(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        Ok(toml::from_str(content)?)
    }

    pub fn should_swap(&self, pair: &MotionPair, ctx: &PlacementContext) -> bool {
        let letter = ctx.letter.as_str();
        self.rules
            .iter()
            .filter(|rule| rule.letters.iter().any(|l| l == letter))
            .any(|rule| condition_holds(rule.when, pair, ctx))
    }
}

impl Default for SwapRules {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_SWAP_RULES).expect("Default swap rules should be valid TOML")
    }
}

fn condition_holds(condition: SwapCondition, pair: &MotionPair, ctx: &PlacementContext) -> bool {
    let (blue, red) = (pair.blue.rotation_direction, pair.red.rotation_direction);
    let both_rotating = blue.is_rotating() && red.is_rotating();
    match condition {
        SwapCondition::Always => true,
        SwapCondition::SameRotation => both_rotating && blue == red,
        SwapCondition::OppositeRotation => both_rotating && blue != red,
        SwapCondition::BlueLeading => ctx.lead_state(Color::Blue) == Some(LeadState::Leading),
        SwapCondition::RedLeading => ctx.lead_state(Color::Red) == Some(LeadState::Leading),
    }
}

/// Result of running the overlap pass on a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaOutcome {
    pub class: OverlapClass,
    pub swapped: bool,
}

/// Separates two props that share a grid point
#[derive(Debug, Clone, Copy)]
pub struct BetaPositioner<'a> {
    small_offset: f64,
    big_offset: f64,
    hand_offset: f64,
    rules: &'a SwapRules,
}

impl<'a> BetaPositioner<'a> {
    pub fn new(small_offset: f64, big_offset: f64, hand_offset: f64, rules: &'a SwapRules) -> Self {
        Self {
            small_offset,
            big_offset,
            hand_offset,
            rules,
        }
    }

    /// Both props end at one point and the letter is a beta-ending one
    pub fn applies(pair: &MotionPair, ctx: &PlacementContext) -> bool {
        pair.blue.end_location == pair.red.end_location && ctx.ends_at_beta_letter
    }

    /// Unit direction the red prop moves in; blue moves the opposite way.
    ///
    /// Radial props lie along the line through the center, so they separate
    /// sideways; non-radial props separate along that line.
    pub fn separation_direction(pair: &MotionPair) -> Offset {
        let location = pair.red.end_location;
        let radial_props = pair
            .red
            .end_orientation
            .or(pair.blue.end_orientation)
            .map_or(true, |o| o.is_radial());
        let axis = if radial_props {
            Offset::radial(location).quarter_turn_cw()
        } else {
            Offset::radial(location)
        };

        let counter = match pair.red.rotation_direction {
            RotationDirection::CounterClockwise => true,
            RotationDirection::Clockwise => false,
            RotationDirection::NoRotation => {
                pair.blue.rotation_direction == RotationDirection::CounterClockwise
            }
        };
        if counter {
            -axis
        } else {
            axis
        }
    }

    /// Push overlapping props apart.
    ///
    /// `strict_anchor` is the strict hand point of the shared location; bare
    /// hands are re-anchored on it before separating. Returns None when the
    /// pair does not overlap.
    pub fn resolve(
        &self,
        pair: &MotionPair,
        ctx: &PlacementContext,
        props: &ColorPair<PropType>,
        points: &mut ColorPair<Point>,
        strict_anchor: Option<Point>,
    ) -> Option<BetaOutcome> {
        if !Self::applies(pair, ctx) {
            return None;
        }

        let class = OverlapClass::classify(props);
        let direction = Self::separation_direction(pair);
        let mut swapped = false;

        match class {
            OverlapClass::BigProps => separate(points, direction, self.big_offset),
            OverlapClass::SmallProps => {
                separate(points, direction, self.small_offset);
                if self.rules.should_swap(pair, ctx) {
                    points.swap();
                    swapped = true;
                }
            }
            OverlapClass::Hands => {
                if let Some(anchor) = strict_anchor {
                    points.blue = anchor;
                    points.red = anchor;
                }
                separate(points, direction, self.hand_offset);
            }
            OverlapClass::Ambiguous => {}
        }

        debug!(?class, swapped, letter = %ctx.letter, "resolved beta overlap");
        Some(BetaOutcome { class, swapped })
    }
}

fn separate(points: &mut ColorPair<Point>, direction: Offset, distance: f64) {
    points.red = points.red + direction * distance;
    points.blue = points.blue + direction * -distance;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMode;
    use crate::letter::LetterCatalog;
    use crate::motion::{Location, MotionAttributes, MotionKind, Orientation, Turns};

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn beta_pair(blue_rot: RotationDirection, red_rot: RotationDirection) -> MotionPair {
        MotionPair::new(
            MotionAttributes::new(Color::Blue, MotionKind::Pro, Location::E, Location::N)
                .with_turns(Turns::whole(1))
                .with_rotation(blue_rot)
                .with_end_orientation(Orientation::In),
            MotionAttributes::new(Color::Red, MotionKind::Pro, Location::W, Location::N)
                .with_turns(Turns::whole(1))
                .with_rotation(red_rot)
                .with_end_orientation(Orientation::In),
        )
    }

    fn context(pair: &MotionPair, letter: &str) -> PlacementContext {
        PlacementContext::new(pair, &letter.into(), GridMode::Diamond, &LetterCatalog::default())
    }

    fn same_point() -> ColorPair<Point> {
        ColorPair::new(Point::new(475.0, 332.0), Point::new(475.0, 332.0))
    }

    #[test]
    fn test_classify() {
        let pair = |b, r| ColorPair::new(b, r);
        assert_eq!(OverlapClass::classify(&pair(PropType::BigHoop, PropType::BigStaff)), OverlapClass::BigProps);
        assert_eq!(OverlapClass::classify(&pair(PropType::Staff, PropType::Fan)), OverlapClass::SmallProps);
        assert_eq!(OverlapClass::classify(&pair(PropType::Hand, PropType::Hand)), OverlapClass::Hands);
        assert_eq!(OverlapClass::classify(&pair(PropType::Hand, PropType::Staff)), OverlapClass::Ambiguous);
    }

    #[test]
    fn test_radial_props_at_north_separate_sideways() {
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let dir = BetaPositioner::separation_direction(&p);
        assert!(approx_eq(dir.dx, 1.0));
        assert!(approx_eq(dir.dy, 0.0));
    }

    #[test]
    fn test_counter_rotation_flips_direction() {
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::CounterClockwise);
        let dir = BetaPositioner::separation_direction(&p);
        assert!(approx_eq(dir.dx, -1.0));
    }

    #[test]
    fn test_small_props_are_mirrored_apart() {
        let rules = SwapRules::none();
        let positioner = BetaPositioner::new(25.0, 45.0, 10.0, &rules);
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let ctx = context(&p, "G");
        let mut points = same_point();
        let props = ColorPair::new(PropType::Staff, PropType::Staff);

        let outcome = positioner.resolve(&p, &ctx, &props, &mut points, None).unwrap();
        assert_eq!(outcome.class, OverlapClass::SmallProps);
        assert!(approx_eq(points.red.x, 500.0));
        assert!(approx_eq(points.blue.x, 450.0));
        assert!(approx_eq(points.red.y, points.blue.y));
    }

    #[test]
    fn test_swap_rule_exchanges_sides() {
        let rules = SwapRules::default();
        let positioner = BetaPositioner::new(25.0, 45.0, 10.0, &rules);
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let ctx = context(&p, "G");
        let mut points = same_point();
        let props = ColorPair::new(PropType::Club, PropType::Club);

        let outcome = positioner.resolve(&p, &ctx, &props, &mut points, None).unwrap();
        assert!(outcome.swapped);
        assert!(approx_eq(points.red.x, 450.0));
        assert!(approx_eq(points.blue.x, 500.0));
    }

    #[test]
    fn test_hands_reanchor_on_strict_point() {
        let rules = SwapRules::none();
        let positioner = BetaPositioner::new(25.0, 45.0, 10.0, &rules);
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let ctx = context(&p, "H");
        let mut points = same_point();
        let props = ColorPair::new(PropType::Hand, PropType::Hand);

        positioner
            .resolve(&p, &ctx, &props, &mut points, Some(Point::new(475.0, 325.0)))
            .unwrap();
        assert!(approx_eq(points.red.x, 485.0));
        assert!(approx_eq(points.blue.x, 465.0));
        assert!(approx_eq(points.red.y, 325.0));
    }

    #[test]
    fn test_ambiguous_pair_is_left_alone() {
        let rules = SwapRules::none();
        let positioner = BetaPositioner::new(25.0, 45.0, 10.0, &rules);
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let ctx = context(&p, "G");
        let mut points = same_point();
        let props = ColorPair::new(PropType::Hand, PropType::BigHoop);

        let outcome = positioner.resolve(&p, &ctx, &props, &mut points, None).unwrap();
        assert_eq!(outcome.class, OverlapClass::Ambiguous);
        assert_eq!(points, same_point());
    }

    #[test]
    fn test_non_beta_letter_is_noop() {
        let rules = SwapRules::none();
        let positioner = BetaPositioner::new(25.0, 45.0, 10.0, &rules);
        let p = beta_pair(RotationDirection::Clockwise, RotationDirection::Clockwise);
        let ctx = context(&p, "A");
        let mut points = same_point();
        let props = ColorPair::new(PropType::Staff, PropType::Staff);
        assert!(positioner.resolve(&p, &ctx, &props, &mut points, None).is_none());
        assert_eq!(points, same_point());
    }

    #[test]
    fn test_custom_swap_rules() {
        let rules = SwapRules::from_toml_str(
            r#"
[[rule]]
letters = ["S"]
when = "blue_leading"
"#,
        )
        .expect("Should parse");
        let p = MotionPair::new(
            MotionAttributes::new(Color::Blue, MotionKind::Pro, Location::N, Location::E),
            MotionAttributes::new(Color::Red, MotionKind::Pro, Location::W, Location::N),
        );
        assert!(rules.should_swap(&p, &context(&p, "S")));
        assert!(!rules.should_swap(&p, &context(&p, "T")));
    }
}
