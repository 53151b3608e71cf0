//! Hand position tokens
//!
//! A position names where the blue and red hands are relative to each
//! other: `alpha` hands are opposite, `beta` hands share a point, `gamma`
//! hands are a quarter turn apart.

use crate::motion::Location;
use crate::motion::Location::*;

/// (position, blue location, red location)
const POSITIONS: [(&str, Location, Location); 32] = [
    ("alpha1", S, N),
    ("alpha2", SW, NE),
    ("alpha3", W, E),
    ("alpha4", NW, SE),
    ("alpha5", N, S),
    ("alpha6", NE, SW),
    ("alpha7", E, W),
    ("alpha8", SE, NW),
    ("beta1", N, N),
    ("beta2", NE, NE),
    ("beta3", E, E),
    ("beta4", SE, SE),
    ("beta5", S, S),
    ("beta6", SW, SW),
    ("beta7", W, W),
    ("beta8", NW, NW),
    ("gamma1", W, N),
    ("gamma2", NW, NE),
    ("gamma3", N, E),
    ("gamma4", NE, SE),
    ("gamma5", E, S),
    ("gamma6", SE, SW),
    ("gamma7", S, W),
    ("gamma8", SW, NW),
    ("gamma9", E, N),
    ("gamma10", SE, NE),
    ("gamma11", S, E),
    ("gamma12", SW, SE),
    ("gamma13", W, S),
    ("gamma14", NW, SW),
    ("gamma15", N, W),
    ("gamma16", NE, NW),
];

/// Position token for a pair of hand locations
pub fn position_of(blue: Location, red: Location) -> Option<&'static str> {
    POSITIONS
        .iter()
        .find(|(_, b, r)| *b == blue && *r == red)
        .map(|(name, _, _)| *name)
}

/// Hand locations of a position token
pub fn locations_of(position: &str) -> Option<(Location, Location)> {
    POSITIONS
        .iter()
        .find(|(name, _, _)| *name == position)
        .map(|(_, b, r)| (*b, *r))
}

/// The position seen in a vertical mirror
pub fn mirror_position(position: &str) -> Option<&'static str> {
    let (blue, red) = locations_of(position)?;
    position_of(blue.mirror_vertical(), red.mirror_vertical())
}
