//! Core value types describing a single motion of a pictograph

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight compass points of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Location {
    /// All locations in clockwise order, starting at north
    pub const ALL: [Location; 8] = [
        Location::N,
        Location::NE,
        Location::E,
        Location::SE,
        Location::S,
        Location::SW,
        Location::W,
        Location::NW,
    ];

    /// Position of this location in the clockwise ring
    pub fn index(self) -> usize {
        match self {
            Location::N => 0,
            Location::NE => 1,
            Location::E => 2,
            Location::SE => 3,
            Location::S => 4,
            Location::SW => 5,
            Location::W => 6,
            Location::NW => 7,
        }
    }

    /// Advance around the ring in 45° steps (negative steps go counter-clockwise)
    pub fn rotate_cw(self, steps: i32) -> Location {
        let idx = (self.index() as i32 + steps.rem_euclid(8)).rem_euclid(8) as usize;
        Self::ALL[idx]
    }

    pub fn opposite(self) -> Location {
        self.rotate_cw(4)
    }

    pub fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    /// Mirror across the vertical axis (east and west swap)
    pub fn mirror_vertical(self) -> Location {
        match self {
            Location::N => Location::N,
            Location::S => Location::S,
            Location::E => Location::W,
            Location::W => Location::E,
            Location::NE => Location::NW,
            Location::NW => Location::NE,
            Location::SE => Location::SW,
            Location::SW => Location::SE,
        }
    }

    /// Shortest number of 45° steps between two locations (0..=4)
    pub fn separation(self, other: Location) -> u8 {
        let diff = (other.index() as i32 - self.index() as i32).rem_euclid(8) as u8;
        diff.min(8 - diff)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Location::N => "n",
            Location::NE => "ne",
            Location::E => "e",
            Location::SE => "se",
            Location::S => "s",
            Location::SW => "sw",
            Location::W => "w",
            Location::NW => "nw",
        }
    }

    /// Parse a location token, returning None for anything outside the vocabulary
    pub fn from_token(token: &str) -> Option<Location> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == token)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(&s.to_ascii_lowercase()).ok_or_else(|| format!("unknown location '{}'", s))
    }
}

/// The two orientation families a prop can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationFamily {
    Radial,
    NonRadial,
}

impl OrientationFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            OrientationFamily::Radial => "radial",
            OrientationFamily::NonRadial => "nonradial",
        }
    }
}

/// Prop orientation at a grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::In,
        Orientation::Out,
        Orientation::Clock,
        Orientation::Counter,
    ];

    pub fn family(self) -> OrientationFamily {
        match self {
            Orientation::In | Orientation::Out => OrientationFamily::Radial,
            Orientation::Clock | Orientation::Counter => OrientationFamily::NonRadial,
        }
    }

    pub fn is_radial(self) -> bool {
        self.family() == OrientationFamily::Radial
    }

    /// Flip within the same family (in/out, clock/counter)
    pub fn switched(self) -> Orientation {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::In => "in",
            Orientation::Out => "out",
            Orientation::Clock => "clock",
            Orientation::Counter => "counter",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction the prop spins during a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[default]
    #[serde(rename = "no_rot")]
    NoRotation,
}

impl RotationDirection {
    pub fn inverted(self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
            RotationDirection::NoRotation => RotationDirection::NoRotation,
        }
    }

    pub fn is_rotating(self) -> bool {
        self != RotationDirection::NoRotation
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
            RotationDirection::NoRotation => "no_rot",
        }
    }
}

/// Category of path shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    Pro,
    Anti,
    Float,
    Dash,
    Static,
}

impl MotionKind {
    pub const ALL: [MotionKind; 5] = [
        MotionKind::Pro,
        MotionKind::Anti,
        MotionKind::Float,
        MotionKind::Dash,
        MotionKind::Static,
    ];

    /// Pro, anti and float all travel between adjacent cardinal points
    pub fn is_shift(self) -> bool {
        matches!(self, MotionKind::Pro | MotionKind::Anti | MotionKind::Float)
    }

    /// Ordering used when a key has to name the two motions in a stable order
    pub fn rank(self) -> u8 {
        match self {
            MotionKind::Pro => 0,
            MotionKind::Anti => 1,
            MotionKind::Float => 2,
            MotionKind::Dash => 3,
            MotionKind::Static => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MotionKind::Pro => "pro",
            MotionKind::Anti => "anti",
            MotionKind::Float => "float",
            MotionKind::Dash => "dash",
            MotionKind::Static => "static",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two simultaneous motions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of turns a prop makes, stored as a count of half turns, or the
/// float sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TurnsRepr", into = "TurnsRepr")]
pub enum Turns {
    Half(u8),
    Float,
}

impl Turns {
    pub const ZERO: Turns = Turns::Half(0);

    /// Whole turns; values above 127 clamp to the largest representable
    /// count, 127.5 turns. Use [`Turns::from_f64`] to reject them instead.
    pub fn whole(turns: u8) -> Turns {
        Turns::Half(turns.saturating_mul(2))
    }

    /// Convert a numeric value; only non-negative multiples of 0.5 are accepted
    pub fn from_f64(value: f64) -> Option<Turns> {
        let halves = value * 2.0;
        if !value.is_finite() || value < 0.0 || halves.fract() != 0.0 || halves > u8::MAX as f64 {
            return None;
        }
        Some(Turns::Half(halves as u8))
    }

    pub fn half_turns(self) -> Option<u8> {
        match self {
            Turns::Half(n) => Some(n),
            Turns::Float => None,
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        self.half_turns().map(|n| n as f64 / 2.0)
    }

    pub fn is_zero(self) -> bool {
        self == Turns::ZERO
    }

    pub fn is_float(self) -> bool {
        self == Turns::Float
    }
}

impl Default for Turns {
    fn default() -> Self {
        Turns::ZERO
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turns::Half(n) if n % 2 == 0 => write!(f, "{}", n / 2),
            Turns::Half(n) => write!(f, "{}.5", n / 2),
            Turns::Float => f.write_str("fl"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TurnsRepr {
    Number(f64),
    Token(String),
}

impl TryFrom<TurnsRepr> for Turns {
    type Error = String;

    fn try_from(repr: TurnsRepr) -> Result<Self, Self::Error> {
        match repr {
            TurnsRepr::Number(n) => {
                Turns::from_f64(n).ok_or_else(|| format!("invalid turns value {}", n))
            }
            TurnsRepr::Token(t) if t == "fl" => Ok(Turns::Float),
            TurnsRepr::Token(t) => t
                .parse::<f64>()
                .ok()
                .and_then(Turns::from_f64)
                .ok_or_else(|| format!("invalid turns value '{}'", t)),
        }
    }
}

impl From<Turns> for TurnsRepr {
    fn from(turns: Turns) -> Self {
        match turns.as_f64() {
            Some(n) => TurnsRepr::Number(n),
            None => TurnsRepr::Token("fl".to_string()),
        }
    }
}

/// The attributes of one motion (one per color per pictograph)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionAttributes {
    pub color: Color,
    pub motion_kind: MotionKind,
    pub start_location: Location,
    pub end_location: Location,
    #[serde(default = "default_start_orientation")]
    pub start_orientation: Orientation,
    /// Derived by the orientation calculator; absent until resolved
    #[serde(default)]
    pub end_orientation: Option<Orientation>,
    #[serde(default)]
    pub rotation_direction: RotationDirection,
    #[serde(default)]
    pub turns: Turns,
}

fn default_start_orientation() -> Orientation {
    Orientation::In
}

impl MotionAttributes {
    /// Create a motion starting in `in` orientation with no turns
    pub fn new(color: Color, motion_kind: MotionKind, start: Location, end: Location) -> Self {
        Self {
            color,
            motion_kind,
            start_location: start,
            end_location: end,
            start_orientation: Orientation::In,
            end_orientation: None,
            rotation_direction: RotationDirection::NoRotation,
            turns: Turns::ZERO,
        }
    }

    pub fn with_turns(mut self, turns: Turns) -> Self {
        self.turns = turns;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationDirection) -> Self {
        self.rotation_direction = rotation;
        self
    }

    pub fn with_start_orientation(mut self, orientation: Orientation) -> Self {
        self.start_orientation = orientation;
        self
    }

    pub fn with_end_orientation(mut self, orientation: Orientation) -> Self {
        self.end_orientation = Some(orientation);
        self
    }
}

/// Fixed two-slot container holding one value per color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair<T> {
    pub blue: T,
    pub red: T,
}

impl<T> ColorPair<T> {
    pub fn new(blue: T, red: T) -> Self {
        Self { blue, red }
    }

    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::Blue => &self.blue,
            Color::Red => &self.red,
        }
    }

    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::Blue => &mut self.blue,
            Color::Red => &mut self.red,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Color, &T) -> U) -> ColorPair<U> {
        ColorPair {
            blue: f(Color::Blue, &self.blue),
            red: f(Color::Red, &self.red),
        }
    }

    /// Exchange the blue and red values
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.blue, &mut self.red);
    }
}

/// The two motions of a pictograph
pub type MotionPair = ColorPair<MotionAttributes>;

impl MotionPair {
    /// Pair two motions, placing each by its own color
    pub fn from_motions(a: MotionAttributes, b: MotionAttributes) -> Option<Self> {
        match (a.color, b.color) {
            (Color::Blue, Color::Red) => Some(Self::new(a, b)),
            (Color::Red, Color::Blue) => Some(Self::new(b, a)),
            _ => None,
        }
    }

    /// Both end orientations, once the orientation pass has run
    pub fn end_orientations(&self) -> Option<ColorPair<Orientation>> {
        Some(ColorPair::new(
            self.blue.end_orientation?,
            self.red.end_orientation?,
        ))
    }
}
