//! Offset resolution against the special and default placement tables

use serde::Serialize;
use tracing::{debug, warn};

use super::tables::{DefaultPlacements, SpecialPlacements};
use crate::grid::{GridMode, Offset};

/// Where a resolved offset came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PlacementSource {
    Special {
        orientation_key: String,
        letter: String,
        turns_tuple: String,
        attribute_key: String,
    },
    Default {
        key: String,
    },
    /// Every level missed; the offset is zero
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOffset {
    pub offset: Offset,
    #[serde(flatten)]
    pub source: PlacementSource,
}

/// Address of a special placement cell plus the attribute keys to try in it
#[derive(Debug, Clone)]
pub struct SpecialLookup<'a> {
    pub orientation_key: &'a str,
    pub letter: &'a str,
    pub turns_tuple: &'a str,
    pub attribute_keys: &'a [String],
}

/// Probes the special table, then the default table's fallback chain
#[derive(Debug, Clone, Copy)]
pub struct PlacementResolver<'a> {
    special: &'a SpecialPlacements,
    defaults: &'a DefaultPlacements,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(special: &'a SpecialPlacements, defaults: &'a DefaultPlacements) -> Self {
        Self { special, defaults }
    }

    /// Resolve an offset. A miss on every level is reported and yields zero.
    pub fn resolve(
        &self,
        grid_mode: GridMode,
        special: Option<&SpecialLookup<'_>>,
        candidates: &[String],
    ) -> ResolvedOffset {
        if let Some(found) = special.and_then(|lookup| self.resolve_special(grid_mode, lookup)) {
            return found;
        }

        for key in candidates {
            debug!(%grid_mode, key = %key, "probing default placement");
            if let Some(offset) = self.defaults.get(grid_mode, key) {
                return ResolvedOffset {
                    offset,
                    source: PlacementSource::Default { key: key.clone() },
                };
            }
        }

        warn!(%grid_mode, ?candidates, "no placement found");
        ResolvedOffset {
            offset: Offset::ZERO,
            source: PlacementSource::NotFound,
        }
    }

    fn resolve_special(&self, grid_mode: GridMode, lookup: &SpecialLookup<'_>) -> Option<ResolvedOffset> {
        debug!(
            %grid_mode,
            orientation_key = lookup.orientation_key,
            letter = lookup.letter,
            turns_tuple = lookup.turns_tuple,
            "probing special placement"
        );
        let cell = self.special.cell(
            grid_mode,
            lookup.orientation_key,
            lookup.letter,
            lookup.turns_tuple,
        )?;
        lookup.attribute_keys.iter().find_map(|attr| {
            cell.get(attr).map(|offset| ResolvedOffset {
                offset: *offset,
                source: PlacementSource::Special {
                    orientation_key: lookup.orientation_key.to_string(),
                    letter: lookup.letter.to_string(),
                    turns_tuple: lookup.turns_tuple.to_string(),
                    attribute_key: attr.clone(),
                },
            })
        })
    }
}
