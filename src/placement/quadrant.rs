//! Quadrant rotation of base offsets
//!
//! Table offsets are authored for the first quadrant (north, or north-east
//! for diagonal locations). The arrow's actual location selects one of four
//! quarter-turn variants.

use crate::grid::Offset;
use crate::motion::{Location, RotationDirection};

/// Quadrant of a location within its ring (cardinal or diagonal), clockwise
pub fn quadrant_index(location: Location) -> usize {
    location.index() / 2
}

/// Rotate a base offset clockwise by `quadrant` quarter turns
pub fn rotate_offset(base: Offset, quadrant: usize) -> Offset {
    (0..quadrant % 4).fold(base, |offset, _| offset.quarter_turn_cw())
}

/// All four quadrant variants of an offset.
///
/// Counter-clockwise arrows use the horizontally mirrored sequence.
pub fn generate_directional_tuples(base: Offset, rotation: RotationDirection) -> [Offset; 4] {
    let start = match rotation {
        RotationDirection::CounterClockwise => Offset::new(-base.dx, base.dy),
        RotationDirection::Clockwise | RotationDirection::NoRotation => base,
    };
    [
        start,
        rotate_offset(start, 1),
        rotate_offset(start, 2),
        rotate_offset(start, 3),
    ]
}

/// The variant of `base` that applies at `location`
pub fn directional_offset(base: Offset, rotation: RotationDirection, location: Location) -> Offset {
    generate_directional_tuples(base, rotation)[quadrant_index(location)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_index() {
        assert_eq!(quadrant_index(Location::N), 0);
        assert_eq!(quadrant_index(Location::NE), 0);
        assert_eq!(quadrant_index(Location::E), 1);
        assert_eq!(quadrant_index(Location::SW), 2);
        assert_eq!(quadrant_index(Location::NW), 3);
    }

    #[test]
    fn test_clockwise_tuples() {
        let tuples = generate_directional_tuples(Offset::new(3.0, 4.0), RotationDirection::Clockwise);
        assert_eq!(
            tuples,
            [
                Offset::new(3.0, 4.0),
                Offset::new(-4.0, 3.0),
                Offset::new(-3.0, -4.0),
                Offset::new(4.0, -3.0),
            ]
        );
    }

    #[test]
    fn test_counter_clockwise_tuples() {
        let tuples =
            generate_directional_tuples(Offset::new(3.0, 4.0), RotationDirection::CounterClockwise);
        assert_eq!(
            tuples,
            [
                Offset::new(-3.0, 4.0),
                Offset::new(-4.0, -3.0),
                Offset::new(3.0, -4.0),
                Offset::new(4.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let base = Offset::new(-7.0, 2.5);
        assert_eq!(rotate_offset(base, 4), base);
        assert_eq!(rotate_offset(rotate_offset(base, 3), 1), base);
    }

    #[test]
    fn test_directional_offset_by_location() {
        let base = Offset::new(0.0, -10.0);
        assert_eq!(
            directional_offset(base, RotationDirection::Clockwise, Location::SE),
            Offset::new(10.0, 0.0)
        );
    }
}
