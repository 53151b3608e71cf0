//! Grid geometry: coordinates, grid modes and named anchor points

use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::ops::{Add, Mul, Neg};
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceDataError;
use crate::motion::Location;
use crate::reference::read_document;

/// A 2D point in the pictograph's coordinate system (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A displacement relative to an anchor point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Unit vector pointing from the grid center toward a location
    pub fn radial(location: Location) -> Offset {
        let s = FRAC_1_SQRT_2;
        match location {
            Location::N => Offset::new(0.0, -1.0),
            Location::NE => Offset::new(s, -s),
            Location::E => Offset::new(1.0, 0.0),
            Location::SE => Offset::new(s, s),
            Location::S => Offset::new(0.0, 1.0),
            Location::SW => Offset::new(-s, s),
            Location::W => Offset::new(-1.0, 0.0),
            Location::NW => Offset::new(-s, -s),
        }
    }

    /// Rotate a quarter turn clockwise (screen coordinates)
    pub fn quarter_turn_cw(self) -> Offset {
        Offset::new(-self.dy, self.dx)
    }
}

impl From<[f64; 2]> for Offset {
    fn from([dx, dy]: [f64; 2]) -> Self {
        Self { dx, dy }
    }
}

impl From<Offset> for [f64; 2] {
    fn from(o: Offset) -> Self {
        [o.dx, o.dy]
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;

    fn mul(self, k: f64) -> Offset {
        Offset::new(self.dx * k, self.dy * k)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// The two anchor families a grid can be drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    #[default]
    Diamond,
    Box,
}

impl GridMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GridMode::Diamond => "diamond",
            GridMode::Box => "box",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named reference point on the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridAnchor {
    pub name: String,
    pub point: Point,
}

impl GridAnchor {
    /// Name of the hand point for a location, e.g. `n_diamond_hand_point_strict`
    pub fn point_name(location: Location, mode: GridMode, strict: bool) -> String {
        format!(
            "{}_{}_hand_point{}",
            location,
            mode,
            if strict { "_strict" } else { "" }
        )
    }
}

/// The anchor coordinates of a grid, keyed by point name
#[derive(Debug, Clone)]
pub struct GridGeometry {
    anchors: HashMap<String, Point>,
}

#[derive(Deserialize)]
struct TomlGeometry {
    anchors: HashMap<String, Point>,
}

/// Canvas center of the standard grid
pub const GRID_CENTER: Point = Point { x: 475.0, y: 475.0 };
/// Distance from the center to the outer hand points
pub const HAND_RADIUS: f64 = 150.0;
/// How far normal hand points sit inside the strict ones
pub const NORMAL_INSET: f64 = 7.0;

impl GridGeometry {
    pub fn new(anchors: HashMap<String, Point>) -> Self {
        Self { anchors }
    }

    /// Load anchors from a TOML or JSON file with an `anchors` table
    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        let parsed: TomlGeometry = read_document(path)?;
        Ok(Self::new(parsed.anchors))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        let parsed: TomlGeometry = toml::from_str(content)?;
        Ok(Self::new(parsed.anchors))
    }

    /// The canonical grid: in diamond mode the cardinal points are outermost,
    /// in box mode the diagonal ones are.
    pub fn standard() -> Self {
        let mut anchors = HashMap::new();
        for mode in [GridMode::Diamond, GridMode::Box] {
            for location in Location::ALL {
                let outer = match mode {
                    GridMode::Diamond => location.is_cardinal(),
                    GridMode::Box => !location.is_cardinal(),
                };
                let radius = if outer {
                    HAND_RADIUS
                } else {
                    HAND_RADIUS * FRAC_1_SQRT_2
                };
                let dir = Offset::radial(location);
                anchors.insert(
                    GridAnchor::point_name(location, mode, true),
                    GRID_CENTER + dir * radius,
                );
                anchors.insert(
                    GridAnchor::point_name(location, mode, false),
                    GRID_CENTER + dir * (radius - NORMAL_INSET),
                );
            }
        }
        Self { anchors }
    }

    pub fn lookup(&self, name: &str) -> Option<GridAnchor> {
        self.anchors.get(name).map(|point| GridAnchor {
            name: name.to_string(),
            point: *point,
        })
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read-through cache of anchor lookups, owned by one engine instance
#[derive(Debug, Default)]
pub struct AnchorCache {
    entries: RwLock<HashMap<String, Option<GridAnchor>>>,
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a hand point, consulting the geometry only on the first request
    pub fn hand_point(
        &self,
        geometry: &GridGeometry,
        location: Location,
        mode: GridMode,
        strict: bool,
    ) -> Option<GridAnchor> {
        let name = GridAnchor::point_name(location, mode, strict);
        if let Ok(entries) = self.entries.read() {
            if let Some(hit) = entries.get(&name) {
                return hit.clone();
            }
        }

        let resolved = geometry.lookup(&name);
        // a poisoned lock only costs us the memo
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(name, resolved.clone());
        }
        resolved
    }

    /// Number of memoized names
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
