//! Single-pictograph placement
//!
//! [`PlacementEngine`] runs the whole pipeline for one pair of motions:
//! orientation resolution, arrow location, key generation, table lookup,
//! quadrant rotation, anchoring, and the overlap pass for props.

use serde::Serialize;
use tracing::{debug, warn};

use super::beta::{BetaOutcome, BetaPositioner, OverlapClass, PropType};
use super::config::{EngineConfig, MissingAnchor};
use super::context::PlacementContext;
use super::keys::{special_orientation_key, turns_tuple, AttributeKey, PlacementKey};
use super::quadrant::{directional_offset, quadrant_index};
use super::resolver::{PlacementResolver, ResolvedOffset, SpecialLookup};
use crate::error::PlacementError;
use crate::grid::{AnchorCache, GridAnchor, GridMode, Offset, Point, GRID_CENTER};
use crate::letter::Letter;
use crate::motion::{
    calculator_for, classify, resolve_orientations, ArrowContext, Color, ColorPair, HandRotation,
    Location, MotionAttributes, MotionKind, MotionPair, Orientation,
};
use crate::reference::ReferenceData;

/// An anchor point plus the rotated offset applied to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalCoordinate {
    pub anchor: GridAnchor,
    pub offset: Offset,
    pub point: Point,
}

/// Where one arrow is drawn and how its offset was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowPlacement {
    /// Unset when the location calculator could not decide
    pub location: Option<Location>,
    pub hand_rotation: HandRotation,
    pub quadrant: Option<usize>,
    pub placement_key: String,
    pub attribute_key: String,
    pub resolved: ResolvedOffset,
    pub coordinate: Option<FinalCoordinate>,
}

/// Where one prop is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropPlacement {
    pub prop_type: PropType,
    pub location: Location,
    pub orientation: Option<Orientation>,
    pub anchor: Option<GridAnchor>,
    /// The anchor point after overlap separation
    pub point: Option<Point>,
}

/// Which prop is painted first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawOrder {
    BlueFirst,
    RedFirst,
}

/// Full result for one pictograph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub letter: Letter,
    pub grid_mode: GridMode,
    pub orientation_key: Option<String>,
    pub turns_tuple: String,
    pub arrows: ColorPair<ArrowPlacement>,
    pub props: ColorPair<PropPlacement>,
    pub draw_order: DrawOrder,
    /// Present when both props ended on the same point of a beta letter
    pub overlap: Option<BetaOutcome>,
}

/// Placement engine holding its reference data and anchor cache.
///
/// The engine is `Sync`; independent callers may place pictographs
/// concurrently and share the anchor memo.
#[derive(Debug, Default)]
pub struct PlacementEngine {
    reference: ReferenceData,
    config: EngineConfig,
    anchors: AnchorCache,
}

impl PlacementEngine {
    pub fn new(reference: ReferenceData, config: EngineConfig) -> Self {
        Self {
            reference,
            config,
            anchors: AnchorCache::new(),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of anchors memoized so far
    pub fn cached_anchors(&self) -> usize {
        self.anchors.len()
    }

    /// Place a pictograph using the configured prop type for both colors.
    ///
    /// Resolved end orientations are written back into `motions`.
    pub fn place(
        &self,
        motions: &mut MotionPair,
        letter: &Letter,
        grid_mode: GridMode,
    ) -> Result<Placement, PlacementError> {
        let props = ColorPair::new(self.config.prop_type, self.config.prop_type);
        self.place_with_props(motions, letter, grid_mode, props)
    }

    pub fn place_with_props(
        &self,
        motions: &mut MotionPair,
        letter: &Letter,
        grid_mode: GridMode,
        props: ColorPair<PropType>,
    ) -> Result<Placement, PlacementError> {
        resolve_orientations(motions)?;
        let pair: &MotionPair = motions;

        let ctx = PlacementContext::new(pair, letter, grid_mode, &self.reference.letters);
        let turns_tuple = turns_tuple(pair);
        let orientation_key = pair.end_orientations().map(special_orientation_key);
        let resolver = PlacementResolver::new(&self.reference.special, &self.reference.defaults);

        let arrows = pair.map(|color, motion| {
            self.place_arrow(
                motion,
                pair.get(color.other()),
                &ctx,
                &resolver,
                orientation_key,
                &turns_tuple,
            )
        });

        let (prop_points, overlap) = self.place_props(pair, &ctx, &props);
        let draw_order = match overlap {
            Some(BetaOutcome { swapped: true, .. }) => DrawOrder::RedFirst,
            _ => DrawOrder::BlueFirst,
        };

        let props = pair.map(|color, motion| {
            let (anchor, point) = prop_points.get(color).clone();
            PropPlacement {
                prop_type: *props.get(color),
                location: motion.end_location,
                orientation: motion.end_orientation,
                anchor,
                point,
            }
        });

        debug!(letter = %letter, %grid_mode, %turns_tuple, "placed pictograph");
        Ok(Placement {
            letter: letter.clone(),
            grid_mode,
            orientation_key: orientation_key.map(str::to_string),
            turns_tuple,
            arrows,
            props,
            draw_order,
            overlap,
        })
    }

    fn place_arrow(
        &self,
        motion: &MotionAttributes,
        sibling: &MotionAttributes,
        ctx: &PlacementContext,
        resolver: &PlacementResolver<'_>,
        orientation_key: Option<&str>,
        turns_tuple: &str,
    ) -> ArrowPlacement {
        let arrow_ctx = ArrowContext::new(ctx.letter_type, Some(sibling));
        let location = calculator_for(motion.motion_kind).calculate_location(motion, &arrow_ctx);

        let placement_key = PlacementKey::generate(motion, ctx);
        let attribute_key = AttributeKey::generate(motion, ctx).to_string();
        let mut attribute_keys = vec![attribute_key.clone(), motion.color.to_string()];
        attribute_keys.dedup();

        let special = orientation_key.map(|orientation_key| SpecialLookup {
            orientation_key,
            letter: ctx.letter.as_str(),
            turns_tuple,
            attribute_keys: &attribute_keys,
        });
        let resolved = resolver.resolve(ctx.grid_mode, special.as_ref(), &placement_key.fallback_chain());

        let mut arrow = ArrowPlacement {
            location,
            hand_rotation: classify(motion.start_location, motion.end_location),
            quadrant: None,
            placement_key: placement_key.to_string(),
            attribute_key,
            resolved,
            coordinate: None,
        };

        let Some(location) = location else {
            warn!(color = %motion.color, kind = %motion.motion_kind, "arrow location unset");
            return arrow;
        };

        // Floats spin with their hand path
        let rotation = if motion.motion_kind == MotionKind::Float || motion.turns.is_float() {
            arrow.hand_rotation.rotation_direction()
        } else {
            motion.rotation_direction
        };
        let offset = directional_offset(arrow.resolved.offset, rotation, location);
        arrow.quadrant = Some(quadrant_index(location));
        arrow.coordinate = self
            .hand_anchor(location, ctx.grid_mode, false)
            .map(|anchor| FinalCoordinate {
                point: anchor.point + offset,
                anchor,
                offset,
            });
        arrow
    }

    #[allow(clippy::type_complexity)]
    fn place_props(
        &self,
        pair: &MotionPair,
        ctx: &PlacementContext,
        props: &ColorPair<PropType>,
    ) -> (ColorPair<(Option<GridAnchor>, Option<Point>)>, Option<BetaOutcome>) {
        let anchors = pair.map(|_, motion| self.hand_anchor(motion.end_location, ctx.grid_mode, false));

        let (Some(blue), Some(red)) = (&anchors.blue, &anchors.red) else {
            let unadjusted = anchors.map(|_, anchor| (anchor.clone(), anchor.as_ref().map(|a| a.point)));
            return (unadjusted, None);
        };

        let mut points = ColorPair::new(blue.point, red.point);
        let strict = if OverlapClass::classify(props) == OverlapClass::Hands {
            self.hand_anchor(pair.red.end_location, ctx.grid_mode, true)
                .map(|anchor| anchor.point)
        } else {
            None
        };

        let positioner = BetaPositioner::new(
            self.config.small_prop_offset,
            self.config.big_prop_offset,
            self.config.hand_offset,
            &self.reference.swap_rules,
        );
        let overlap = positioner.resolve(pair, ctx, props, &mut points, strict);

        let placed = ColorPair::new(
            (anchors.blue.clone(), Some(points.blue)),
            (anchors.red.clone(), Some(points.red)),
        );
        (placed, overlap)
    }

    fn hand_anchor(&self, location: Location, mode: GridMode, strict: bool) -> Option<GridAnchor> {
        if let Some(anchor) = self
            .anchors
            .hand_point(&self.reference.geometry, location, mode, strict)
        {
            return Some(anchor);
        }

        let name = GridAnchor::point_name(location, mode, strict);
        warn!(anchor = %name, "anchor missing");
        match self.config.missing_anchor {
            MissingAnchor::Skip => None,
            MissingAnchor::GridCenter => Some(GridAnchor {
                name,
                point: GRID_CENTER,
            }),
        }
    }
}

/// Shorthand for placing one color's arrow without building an engine
pub fn arrow_location(motion: &MotionAttributes, sibling: Option<&MotionAttributes>) -> Option<Location> {
    calculator_for(motion.motion_kind).calculate_location(motion, &ArrowContext::new(None, sibling))
}

impl Placement {
    pub fn arrow(&self, color: Color) -> &ArrowPlacement {
        self.arrows.get(color)
    }

    pub fn prop(&self, color: Color) -> &PropPlacement {
        self.props.get(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGeometry;
    use crate::motion::{RotationDirection, Turns};
    use crate::placement::resolver::PlacementSource;
    use crate::placement::tables::DefaultPlacements;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn pro(color: Color, start: Location, end: Location, rot: RotationDirection) -> MotionAttributes {
        MotionAttributes::new(color, MotionKind::Pro, start, end)
            .with_turns(Turns::whole(1))
            .with_rotation(rot)
    }

    #[test]
    fn test_place_alpha_pair() {
        let engine = PlacementEngine::default();
        let mut motions = MotionPair::new(
            pro(Color::Blue, Location::S, Location::W, RotationDirection::Clockwise),
            pro(Color::Red, Location::N, Location::E, RotationDirection::Clockwise),
        );
        let placement = engine
            .place(&mut motions, &"A".into(), GridMode::Diamond)
            .expect("Should place");

        assert_eq!(motions.blue.end_orientation, Some(Orientation::Out));
        let red = placement.arrow(Color::Red);
        assert_eq!(red.location, Some(Location::NE));
        assert_eq!(red.hand_rotation, HandRotation::Clockwise);
        assert_eq!(red.placement_key, "pro_to_layer1_alpha_A");
        assert_eq!(
            red.resolved.source,
            PlacementSource::Default {
                key: "pro_to_layer1_alpha".into()
            }
        );
        assert!(red.coordinate.is_some());
        assert_eq!(placement.draw_order, DrawOrder::BlueFirst);
        assert!(placement.overlap.is_none());
    }

    #[test]
    fn test_arrow_offset_is_rotated_into_quadrant() {
        let mut defaults = DefaultPlacements::empty();
        defaults.insert(GridMode::Diamond, "pro", Offset::new(0.0, -10.0));
        let engine = PlacementEngine::new(
            ReferenceData::new().with_defaults(defaults),
            EngineConfig::default(),
        );
        let mut motions = MotionPair::new(
            pro(Color::Blue, Location::E, Location::S, RotationDirection::Clockwise),
            pro(Color::Red, Location::W, Location::N, RotationDirection::Clockwise),
        );
        let placement = engine
            .place(&mut motions, &"A".into(), GridMode::Diamond)
            .expect("Should place");

        let blue = placement.arrow(Color::Blue);
        assert_eq!(blue.location, Some(Location::SE));
        assert_eq!(blue.quadrant, Some(1));
        let coordinate = blue.coordinate.as_ref().unwrap();
        assert_eq!(coordinate.offset, Offset::new(10.0, 0.0));
        assert_eq!(coordinate.point, coordinate.anchor.point + Offset::new(10.0, 0.0));
    }

    #[test]
    fn test_float_offset_follows_hand_path() {
        let mut defaults = DefaultPlacements::empty();
        defaults.insert(GridMode::Diamond, "float", Offset::new(3.0, 4.0));
        let engine = PlacementEngine::new(
            ReferenceData::new().with_defaults(defaults),
            EngineConfig::default(),
        );
        let mut motions = MotionPair::new(
            MotionAttributes::new(Color::Blue, MotionKind::Float, Location::N, Location::W)
                .with_turns(Turns::Float),
            pro(Color::Red, Location::S, Location::E, RotationDirection::CounterClockwise),
        );
        let placement = engine
            .place(&mut motions, &"A".into(), GridMode::Diamond)
            .expect("Should place");

        let blue = placement.arrow(Color::Blue);
        assert_eq!(blue.location, Some(Location::NW));
        assert_eq!(blue.hand_rotation, HandRotation::CounterClockwise);
        assert_eq!(blue.quadrant, Some(3));
        let coordinate = blue.coordinate.as_ref().unwrap();
        assert_eq!(coordinate.offset, Offset::new(4.0, 3.0));
    }

    #[test]
    fn test_missing_rotation_is_an_error() {
        let engine = PlacementEngine::default();
        let mut motions = MotionPair::new(
            pro(Color::Blue, Location::N, Location::E, RotationDirection::NoRotation),
            pro(Color::Red, Location::S, Location::W, RotationDirection::Clockwise),
        );
        let result = engine.place(&mut motions, &"A".into(), GridMode::Diamond);
        assert!(matches!(
            result,
            Err(PlacementError::InvalidRotationDirection { .. })
        ));
    }

    #[test]
    fn test_missing_anchor_policy() {
        let reference = ReferenceData::new().with_geometry(GridGeometry::new(HashMap::new()));
        let mut motions = MotionPair::new(
            pro(Color::Blue, Location::S, Location::W, RotationDirection::Clockwise),
            pro(Color::Red, Location::N, Location::E, RotationDirection::Clockwise),
        );

        let skipping = PlacementEngine::new(reference.clone(), EngineConfig::default());
        let placement = skipping
            .place(&mut motions.clone(), &"A".into(), GridMode::Box)
            .expect("Should place");
        assert!(placement.arrow(Color::Red).coordinate.is_none());
        assert!(placement.prop(Color::Red).point.is_none());

        let centering = PlacementEngine::new(
            reference,
            EngineConfig::default().with_missing_anchor(MissingAnchor::GridCenter),
        );
        let placement = centering
            .place(&mut motions, &"A".into(), GridMode::Box)
            .expect("Should place");
        assert_eq!(
            placement.prop(Color::Red).anchor.as_ref().map(|a| a.point),
            Some(GRID_CENTER)
        );
    }

    #[test]
    fn test_anchor_lookups_are_memoized() {
        let engine = PlacementEngine::default();
        let mut motions = MotionPair::new(
            pro(Color::Blue, Location::S, Location::W, RotationDirection::Clockwise),
            pro(Color::Red, Location::N, Location::E, RotationDirection::Clockwise),
        );
        engine
            .place(&mut motions.clone(), &"A".into(), GridMode::Diamond)
            .expect("Should place");
        let after_first = engine.anchors.len();
        engine
            .place(&mut motions, &"A".into(), GridMode::Diamond)
            .expect("Should place");
        assert_eq!(engine.anchors.len(), after_first);
    }

    #[test]
    fn test_arrow_location_shorthand() {
        let motion = pro(Color::Red, Location::N, Location::E, RotationDirection::Clockwise);
        assert_eq!(arrow_location(&motion, None), Some(Location::NE));
    }
}
