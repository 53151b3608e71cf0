//! Lookup key generation
//!
//! Three independent schemes feed the placement tables:
//!
//! - [`PlacementKey`] addresses the default placement table and carries its
//!   own three-level fallback chain.
//! - [`AttributeKey`] picks the entry inside a special placement cell.
//! - [`turns_tuple`] names the turns combination of the pair, the last level
//!   of the special placement table.
//!
//! Keys are built as small typed values first and only serialized to strings
//! at the table boundary.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::context::{Arrangement, LeadState, OrientationLayer, PlacementContext};
use crate::motion::{
    Color, ColorPair, MotionAttributes, MotionKind, MotionPair, Orientation, OrientationFamily,
    Turns,
};

/// Letter-specific tail of a placement key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterSuffix {
    /// `_A`
    Plain(String),
    /// `_W_dash` for the letter `W-`
    Dash(String),
}

impl LetterSuffix {
    pub fn for_letter(letter: &str, takes_dash_suffix: bool) -> Option<Self> {
        if letter.is_empty() {
            return None;
        }
        if takes_dash_suffix {
            let mut base = letter.to_string();
            base.pop();
            Some(LetterSuffix::Dash(base))
        } else {
            Some(LetterSuffix::Plain(letter.to_string()))
        }
    }
}

impl fmt::Display for LetterSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LetterSuffix::Plain(letter) => write!(f, "_{}", letter),
            LetterSuffix::Dash(base) => write!(f, "_{}_dash", base),
        }
    }
}

/// Key into the default placement table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementKey {
    pub motion_kind: MotionKind,
    /// Only present when the pair ends in a hybrid orientation
    pub family: Option<OrientationFamily>,
    pub layer: Option<OrientationLayer>,
    pub arrangement: Option<Arrangement>,
    pub letter_suffix: Option<LetterSuffix>,
}

impl PlacementKey {
    pub fn generate(motion: &MotionAttributes, ctx: &PlacementContext) -> Self {
        let family = if ctx.ends_hybrid() {
            motion.end_orientation.map(Orientation::family)
        } else {
            None
        };

        let key = Self {
            motion_kind: motion.motion_kind,
            family,
            layer: ctx.layer,
            arrangement: ctx.arrangement,
            letter_suffix: LetterSuffix::for_letter(ctx.letter.as_str(), ctx.takes_dash_suffix),
        };
        trace!(color = %motion.color, key = %key, "generated placement key");
        key
    }

    /// Layer and arrangement together, or nothing when either is unknown
    fn middle(&self) -> Option<String> {
        match (self.layer, self.arrangement) {
            (Some(layer), Some(arr)) => Some(format!("{}_{}", layer.as_str(), arr.as_str())),
            _ => None,
        }
    }

    /// The key without its letter suffix
    pub fn base(&self) -> String {
        let Some(middle) = self.middle() else {
            return self.motion_kind.to_string();
        };
        let family = self
            .family
            .map(|f| format!("{}_", f.as_str()))
            .unwrap_or_default();
        format!("{}_to_{}{}", self.motion_kind, family, middle)
    }

    /// Candidates in probing order: with letter, without letter, bare kind
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string(), self.base(), self.motion_kind.to_string()];
        chain.dedup();
        chain
    }
}

impl fmt::Display for PlacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base())?;
        if let Some(suffix) = &self.letter_suffix {
            write!(f, "{}", suffix)?;
        }
        Ok(())
    }
}

/// Key selecting a motion's entry inside a special placement cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum AttributeKey {
    LeadState(LeadState),
    MotionKind(MotionKind),
    Color(Color),
    ColorLeadState(Color, LeadState),
}

impl AttributeKey {
    /// Returns the first applicable branch; there is no fallback.
    pub fn generate(motion: &MotionAttributes, ctx: &PlacementContext) -> Self {
        if ctx.always_special {
            if let Some(lead) = ctx.lead_state(motion.color) {
                return if ctx.mixed_start {
                    AttributeKey::ColorLeadState(motion.color, lead)
                } else {
                    AttributeKey::LeadState(lead)
                };
            }
        }

        if ctx.hybrid {
            if ctx.mixed_start && !motion.start_orientation.is_radial() {
                return AttributeKey::Color(motion.color);
            }
            return AttributeKey::MotionKind(motion.motion_kind);
        }

        AttributeKey::Color(motion.color)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::LeadState(lead) => f.write_str(lead.as_str()),
            AttributeKey::MotionKind(kind) => f.write_str(kind.as_str()),
            AttributeKey::Color(color) => f.write_str(color.as_str()),
            AttributeKey::ColorLeadState(color, lead) => write!(f, "{}_{}", color, lead.as_str()),
        }
    }
}

impl From<AttributeKey> for String {
    fn from(key: AttributeKey) -> Self {
        key.to_string()
    }
}

fn both_spinning(pair: &MotionPair) -> bool {
    [&pair.blue, &pair.red].iter().all(|m| {
        matches!(m.turns, Turns::Half(n) if n > 0) && m.rotation_direction.is_rotating()
    })
}

/// Canonical tuple string for the turns of a pair.
///
/// Matching kinds are written blue first, prefixed with `s`/`o` when both
/// props spin in the same or opposite directions. Differing kinds are written
/// in kind order (pro, anti, float, dash, static).
pub fn turns_tuple(pair: &MotionPair) -> String {
    let (blue, red) = (&pair.blue, &pair.red);
    if blue.motion_kind == red.motion_kind {
        if both_spinning(pair) {
            let prefix = if blue.rotation_direction == red.rotation_direction {
                "s"
            } else {
                "o"
            };
            return format!("({}, {}, {})", prefix, blue.turns, red.turns);
        }
        return format!("({}, {})", blue.turns, red.turns);
    }

    let (first, second) = if blue.motion_kind.rank() <= red.motion_kind.rank() {
        (blue, red)
    } else {
        (red, blue)
    };
    format!("({}, {})", first.turns, second.turns)
}

/// Second level of the special placement table
pub fn special_orientation_key(ends: ColorPair<Orientation>) -> &'static str {
    match OrientationLayer::of(ends.blue, ends.red) {
        OrientationLayer::Layer1 => "from_layer1",
        OrientationLayer::Layer2 => "from_layer2",
        OrientationLayer::Layer3 if ends.blue.is_radial() => "from_layer3_blue1_red2",
        OrientationLayer::Layer3 => "from_layer3_blue2_red1",
    }
}
