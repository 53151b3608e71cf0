//! End orientation calculation
//!
//! Whole turns keep the prop in its orientation family; half turns cross
//! between the radial and non-radial families. Float motions have no turns
//! of their own and borrow the opposite motion's kind and rotation, which is
//! why orientations are resolved for a whole [`MotionPair`] in two phases.

use tracing::trace;

use super::hand_rotation::classify;
use super::types::{
    Color, MotionAttributes, MotionKind, MotionPair, Orientation, RotationDirection, Turns,
};
use crate::error::PlacementError;

/// Compute the end orientation of a single motion.
///
/// A `Float` kind (or float turns) is computed as a half-turn anti motion
/// spinning in `rotation`, which callers derive from the hand path when no
/// sibling supplies a concrete rotation.
pub fn end_orientation(
    start: Orientation,
    kind: MotionKind,
    turns: Turns,
    rotation: RotationDirection,
) -> Result<Orientation, PlacementError> {
    let half_turns = match (kind, turns) {
        (MotionKind::Float, _) | (_, Turns::Float) => {
            return half_turn(start, MotionKind::Anti, rotation, 1)
                .ok_or_else(|| PlacementError::invalid_rotation(kind, turns));
        }
        (_, Turns::Half(n)) => n,
    };

    if half_turns > 0 && !rotation.is_rotating() {
        return Err(PlacementError::invalid_rotation(kind, turns));
    }

    if half_turns % 2 == 0 {
        return Ok(whole_turn(start, kind, half_turns / 2));
    }

    half_turn(start, kind, rotation, half_turns)
        .ok_or_else(|| PlacementError::invalid_rotation(kind, turns))
}

fn whole_turn(start: Orientation, kind: MotionKind, turns: u8) -> Orientation {
    let keeps = match kind {
        MotionKind::Pro | MotionKind::Static | MotionKind::Float => turns % 2 == 0,
        MotionKind::Anti | MotionKind::Dash => turns % 2 == 1,
    };
    if keeps {
        start
    } else {
        start.switched()
    }
}

fn half_turn(
    start: Orientation,
    kind: MotionKind,
    rotation: RotationDirection,
    half_turns: u8,
) -> Option<Orientation> {
    let clockwise = match rotation {
        RotationDirection::Clockwise => true,
        RotationDirection::CounterClockwise => false,
        RotationDirection::NoRotation => return None,
    };
    let pro_like = matches!(kind, MotionKind::Pro | MotionKind::Static | MotionKind::Float);

    // anti spinning one way lands where pro spinning the other way does
    let base = if pro_like == clockwise {
        match start {
            Orientation::In => Orientation::Counter,
            Orientation::Out => Orientation::Clock,
            Orientation::Clock => Orientation::In,
            Orientation::Counter => Orientation::Out,
        }
    } else {
        match start {
            Orientation::In => Orientation::Clock,
            Orientation::Out => Orientation::Counter,
            Orientation::Clock => Orientation::Out,
            Orientation::Counter => Orientation::In,
        }
    };

    Some(if half_turns % 4 == 1 {
        base
    } else {
        base.switched()
    })
}

/// End orientation for a float motion, given its sibling.
///
/// A concrete pro/anti sibling lends its kind with the rotation inverted;
/// otherwise the float's own hand path decides.
pub fn float_end_orientation(
    float: &MotionAttributes,
    sibling: &MotionAttributes,
) -> Result<Orientation, PlacementError> {
    let concrete_sibling = matches!(sibling.motion_kind, MotionKind::Pro | MotionKind::Anti)
        && sibling.rotation_direction.is_rotating();

    if concrete_sibling {
        return half_turn(
            float.start_orientation,
            sibling.motion_kind,
            sibling.rotation_direction.inverted(),
            1,
        )
        .ok_or_else(|| PlacementError::invalid_rotation(float.motion_kind, float.turns));
    }

    let rotation = classify(float.start_location, float.end_location).rotation_direction();
    end_orientation(float.start_orientation, MotionKind::Float, Turns::Float, rotation)
}

fn is_float(motion: &MotionAttributes) -> bool {
    motion.motion_kind == MotionKind::Float || motion.turns.is_float()
}

/// Resolve and store the end orientation of both motions.
///
/// Non-float motions are resolved first so that a float can read its
/// sibling's settled attributes.
pub fn resolve_orientations(pair: &mut MotionPair) -> Result<(), PlacementError> {
    for color in [Color::Blue, Color::Red] {
        let motion = pair.get_mut(color);
        if is_float(motion) {
            continue;
        }
        let end = end_orientation(
            motion.start_orientation,
            motion.motion_kind,
            motion.turns,
            motion.rotation_direction,
        )?;
        trace!(%color, end = %end, "resolved end orientation");
        motion.end_orientation = Some(end);
    }

    for color in [Color::Blue, Color::Red] {
        if !is_float(pair.get(color)) {
            continue;
        }
        let end = float_end_orientation(pair.get(color), pair.get(color.other()))?;
        trace!(%color, end = %end, "resolved float end orientation");
        pair.get_mut(color).end_orientation = Some(end);
    }

    Ok(())
}
