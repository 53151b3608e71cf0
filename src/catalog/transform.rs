//! Vertical mirror and 45° rotation of catalog records
//!
//! Both transforms are total: tokens outside the known vocabulary are
//! copied unchanged.

use super::positions::{mirror_position, position_of};
use super::{AttributeRecord, PictographRecord};
use crate::motion::Location;

fn map_location(token: &Option<String>, f: impl Fn(Location) -> Location) -> Option<String> {
    token.as_ref().map(|t| match Location::from_token(t) {
        Some(loc) => f(loc).as_str().to_string(),
        None => t.clone(),
    })
}

fn flip_rotation(token: &Option<String>) -> Option<String> {
    token.as_ref().map(|t| match t.as_str() {
        "cw" => "ccw".to_string(),
        "ccw" => "cw".to_string(),
        _ => t.clone(),
    })
}

fn start_loc(attrs: &AttributeRecord) -> &Option<String> {
    &attrs.start_loc
}

fn end_loc(attrs: &AttributeRecord) -> &Option<String> {
    &attrs.end_loc
}

fn location(token: &Option<String>) -> Option<Location> {
    token.as_deref().and_then(Location::from_token)
}

/// Position of the two hands read from a pair of location fields
fn recomputed_position(
    blue: Option<&AttributeRecord>,
    red: Option<&AttributeRecord>,
    field: fn(&AttributeRecord) -> &Option<String>,
    fallback: &Option<String>,
) -> Option<String> {
    let located = blue
        .and_then(|b| location(field(b)))
        .zip(red.and_then(|r| location(field(r))));
    match located.and_then(|(b, r)| position_of(b, r)) {
        Some(position) => Some(position.to_string()),
        None => fallback.clone(),
    }
}

/// Reflect a record across the vertical axis.
///
/// East and west swap, positions follow their mirrored hand locations and
/// every rotation direction flips.
pub fn mirror_vertical(record: &PictographRecord) -> PictographRecord {
    let mirror_attributes = |attrs: &AttributeRecord| AttributeRecord {
        start_loc: map_location(&attrs.start_loc, Location::mirror_vertical),
        end_loc: map_location(&attrs.end_loc, Location::mirror_vertical),
        prop_rot_dir: flip_rotation(&attrs.prop_rot_dir),
        ..attrs.clone()
    };
    let mirror_pos = |token: &Option<String>| {
        token
            .as_ref()
            .map(|t| mirror_position(t).map_or_else(|| t.clone(), str::to_string))
    };

    PictographRecord {
        start_pos: mirror_pos(&record.start_pos),
        end_pos: mirror_pos(&record.end_pos),
        blue_attributes: record.blue_attributes.as_ref().map(mirror_attributes),
        red_attributes: record.red_attributes.as_ref().map(mirror_attributes),
        ..record.clone()
    }
}

/// Rotate a record one 45° step clockwise
pub fn rotate_45(record: &PictographRecord) -> PictographRecord {
    let rotate_attributes = |attrs: &AttributeRecord| AttributeRecord {
        start_loc: map_location(&attrs.start_loc, |l| l.rotate_cw(1)),
        end_loc: map_location(&attrs.end_loc, |l| l.rotate_cw(1)),
        ..attrs.clone()
    };
    let blue = record.blue_attributes.as_ref().map(rotate_attributes);
    let red = record.red_attributes.as_ref().map(rotate_attributes);

    PictographRecord {
        start_pos: recomputed_position(blue.as_ref(), red.as_ref(), start_loc, &record.start_pos),
        end_pos: recomputed_position(blue.as_ref(), red.as_ref(), end_loc, &record.end_pos),
        blue_attributes: blue,
        red_attributes: red,
        ..record.clone()
    }
}

/// Rotate a record by `steps` 45° steps clockwise
pub fn rotate(record: &PictographRecord, steps: u32) -> PictographRecord {
    (0..steps % 8).fold(record.clone(), |current, _| rotate_45(&current))
}
