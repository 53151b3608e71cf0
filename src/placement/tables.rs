//! Placement override tables
//!
//! Both tables are read-only lookup resources. The special table is nested
//! `grid mode -> orientation key -> letter -> turns tuple -> attribute key`,
//! the default table is flat per grid mode.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReferenceDataError;
use crate::grid::{GridMode, Offset};
use crate::reference::read_document;

/// Offsets of one special placement cell, keyed by attribute key
pub type SpecialCell = HashMap<String, Offset>;

type TurnsLevel = HashMap<String, SpecialCell>;
type LetterLevel = HashMap<String, TurnsLevel>;
type OrientationLevel = HashMap<String, LetterLevel>;

/// Letter-specific placement overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SpecialPlacements {
    modes: HashMap<String, OrientationLevel>,
}

impl SpecialPlacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        read_document(path)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ReferenceDataError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        Ok(toml::from_str(content)?)
    }

    pub fn cell(
        &self,
        mode: GridMode,
        orientation_key: &str,
        letter: &str,
        turns_tuple: &str,
    ) -> Option<&SpecialCell> {
        self.modes
            .get(mode.as_str())?
            .get(orientation_key)?
            .get(letter)?
            .get(turns_tuple)
    }

    /// Add or replace one entry
    pub fn insert(
        &mut self,
        mode: GridMode,
        orientation_key: &str,
        letter: &str,
        turns_tuple: &str,
        attribute_key: &str,
        offset: Offset,
    ) {
        self.modes
            .entry(mode.as_str().to_string())
            .or_default()
            .entry(orientation_key.to_string())
            .or_default()
            .entry(letter.to_string())
            .or_default()
            .entry(turns_tuple.to_string())
            .or_default()
            .insert(attribute_key.to_string(), offset);
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

/// Offsets keyed by placement key, one flat table per grid mode
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DefaultPlacements {
    modes: HashMap<String, HashMap<String, Offset>>,
}

const DEFAULT_PLACEMENTS: &str = r#"
[diamond]
pro = [-10.0, -40.0]
anti = [0.0, -45.0]
float = [-5.0, -40.0]
dash = [0.0, -30.0]
static = [0.0, -20.0]
pro_to_layer1_alpha = [-12.0, -42.0]
pro_to_layer1_beta = [-20.0, -50.0]
pro_to_layer1_gamma = [-14.0, -44.0]
pro_to_layer2_alpha = [-8.0, -38.0]
anti_to_layer1_alpha = [2.0, -47.0]
anti_to_layer1_beta = [8.0, -55.0]
anti_to_layer2_alpha = [-2.0, -43.0]
dash_to_layer1_beta = [0.0, -40.0]

[box]
pro = [-10.0, -40.0]
anti = [0.0, -45.0]
float = [-5.0, -40.0]
dash = [0.0, -30.0]
static = [0.0, -20.0]
pro_to_layer1_alpha = [-12.0, -42.0]
anti_to_layer1_alpha = [2.0, -47.0]
"#;

impl DefaultPlacements {
    /// A table with no entries at all
    pub fn empty() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        read_document(path)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ReferenceDataError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        Ok(toml::from_str(content)?)
    }

    pub fn get(&self, mode: GridMode, key: &str) -> Option<Offset> {
        self.modes.get(mode.as_str())?.get(key).copied()
    }

    pub fn insert(&mut self, mode: GridMode, key: &str, offset: Offset) {
        self.modes
            .entry(mode.as_str().to_string())
            .or_default()
            .insert(key.to_string(), offset);
    }
}

impl Default for DefaultPlacements {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_PLACEMENTS).expect("Default placements should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_bare_kinds() {
        let defaults = DefaultPlacements::default();
        for kind in ["pro", "anti", "float", "dash", "static"] {
            assert!(defaults.get(GridMode::Diamond, kind).is_some(), "{kind}");
            assert!(defaults.get(GridMode::Box, kind).is_some(), "{kind}");
        }
    }

    #[test]
    fn test_special_from_json() {
        let special = SpecialPlacements::from_json_str(
            r#"{
                "diamond": {
                    "from_layer1": {
                        "A": { "(0, 1)": { "blue": [5, -10], "red": [-5, 10] } }
                    }
                }
            }"#,
        )
        .expect("Should parse");
        let cell = special
            .cell(GridMode::Diamond, "from_layer1", "A", "(0, 1)")
            .unwrap();
        assert_eq!(cell["blue"], Offset::new(5.0, -10.0));
        assert!(special.cell(GridMode::Box, "from_layer1", "A", "(0, 1)").is_none());
    }

    #[test]
    fn test_special_insert_then_lookup() {
        let mut special = SpecialPlacements::new();
        assert!(special.is_empty());
        special.insert(GridMode::Box, "from_layer2", "G", "(s, 1, 1)", "pro", Offset::new(1.0, 2.0));
        let cell = special.cell(GridMode::Box, "from_layer2", "G", "(s, 1, 1)").unwrap();
        assert_eq!(cell.get("pro"), Some(&Offset::new(1.0, 2.0)));
    }

    #[test]
    fn test_default_from_json() {
        let defaults = DefaultPlacements::from_json_str(r#"{"diamond": {"anti": [0, -30]}}"#)
            .expect("Should parse");
        assert_eq!(defaults.get(GridMode::Diamond, "anti"), Some(Offset::new(0.0, -30.0)));
        assert_eq!(defaults.get(GridMode::Diamond, "pro"), None);
    }
}
