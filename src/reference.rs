//! Reference data bundle and file loading
//!
//! All classification and override tables are injected into the engine
//! through [`ReferenceData`]. Each resource can be loaded from TOML or JSON;
//! the format is chosen from the file extension.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ReferenceDataError;
use crate::grid::GridGeometry;
use crate::letter::LetterCatalog;
use crate::placement::beta::SwapRules;
use crate::placement::tables::{DefaultPlacements, SpecialPlacements};

/// Read and deserialize a `.toml` or `.json` document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ReferenceDataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("toml") => {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        _ => Err(ReferenceDataError::unknown_format(path)),
    }
}

/// Everything the engine looks up, supplied at construction
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub letters: LetterCatalog,
    pub geometry: GridGeometry,
    pub special: SpecialPlacements,
    pub defaults: DefaultPlacements,
    pub swap_rules: SwapRules,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_letters(mut self, letters: LetterCatalog) -> Self {
        self.letters = letters;
        self
    }

    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_special(mut self, special: SpecialPlacements) -> Self {
        self.special = special;
        self
    }

    pub fn with_defaults(mut self, defaults: DefaultPlacements) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_swap_rules(mut self, swap_rules: SwapRules) -> Self {
        self.swap_rules = swap_rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result: Result<HashMap<String, String>, _> = read_document(Path::new("data.yaml"));
        assert!(matches!(result, Err(ReferenceDataError::UnknownFormat { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<HashMap<String, String>, _> =
            read_document(Path::new("/nonexistent/placements.json"));
        assert!(matches!(result, Err(ReferenceDataError::Io(_))));
    }

    #[test]
    fn test_reads_toml_and_json() {
        let dir = std::env::temp_dir();
        let toml_path = dir.join("pictograph_reference_test.toml");
        let json_path = dir.join("pictograph_reference_test.json");
        std::fs::write(&toml_path, "key = \"value\"\n").unwrap();
        std::fs::write(&json_path, "{\"key\": \"value\"}").unwrap();

        let from_toml: HashMap<String, String> = read_document(&toml_path).unwrap();
        let from_json: HashMap<String, String> = read_document(&json_path).unwrap();
        assert_eq!(from_toml, from_json);

        let _ = std::fs::remove_file(toml_path);
        let _ = std::fs::remove_file(json_path);
    }
}
