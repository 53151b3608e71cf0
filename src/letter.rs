//! Letter classification reference data
//!
//! A letter names the shape of a pictograph. The placement engine never
//! interprets a letter beyond the membership sets defined here: its type
//! group, whether it takes the shortened dash suffix, whether the pictograph
//! ends with both props at the same point, and a handful of exception sets.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceDataError;
use crate::reference::read_document;

/// Classification label of a pictograph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Letter(String);

impl Letter {
    pub fn new(letter: impl Into<String>) -> Self {
        Self(letter.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Letter {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Letter type groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterType {
    /// Two shifts
    DualShift,
    /// One shift and one static
    Shift,
    /// One shift and one dash
    CrossShift,
    /// One dash and one static
    Dash,
    /// Two dashes
    DualDash,
    /// Two statics
    Static,
}

/// Membership sets for every known letter
#[derive(Debug, Clone)]
pub struct LetterCatalog {
    types: HashMap<String, LetterType>,
    dash_suffix: HashSet<String>,
    beta_ending: HashSet<String>,
    always_special: HashSet<String>,
    hybrid: HashSet<String>,
}

#[derive(Deserialize)]
struct TomlCatalog {
    types: TomlTypes,
    #[serde(default)]
    sets: TomlSets,
}

#[derive(Deserialize)]
struct TomlTypes {
    #[serde(default)]
    dual_shift: Vec<String>,
    #[serde(default)]
    shift: Vec<String>,
    #[serde(default)]
    cross_shift: Vec<String>,
    #[serde(default)]
    dash: Vec<String>,
    #[serde(default)]
    dual_dash: Vec<String>,
    #[serde(default)]
    r#static: Vec<String>,
}

#[derive(Default, Deserialize)]
struct TomlSets {
    /// Defaults to every cross-shift and dual-dash letter when omitted
    dash_suffix: Option<Vec<String>>,
    #[serde(default)]
    beta_ending: Vec<String>,
    #[serde(default)]
    always_special: Vec<String>,
    #[serde(default)]
    hybrid: Vec<String>,
}

const DEFAULT_CATALOG: &str = r#"
[types]
dual_shift = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L",
              "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V"]
shift = ["W", "X", "Y", "Z", "Σ", "Δ", "θ", "Ω"]
cross_shift = ["W-", "X-", "Y-", "Z-", "Σ-", "Δ-", "θ-", "Ω-"]
dash = ["Φ", "Ψ", "Λ"]
dual_dash = ["Φ-", "Ψ-", "Λ-"]
static = ["α", "β", "Γ"]

[sets]
beta_ending = ["G", "H", "I", "J", "K", "L", "Y", "Z", "Y-", "Z-", "Ψ", "Ψ-", "β"]
always_special = ["S", "T"]
hybrid = ["C", "F", "I", "L", "O", "R", "U", "V"]
"#;

impl LetterCatalog {
    /// Load a catalog from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        let parsed: TomlCatalog = read_document(path)?;
        Ok(Self::from_parsed(parsed))
    }

    /// Load a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        let parsed: TomlCatalog = toml::from_str(content)?;
        Ok(Self::from_parsed(parsed))
    }

    fn from_parsed(parsed: TomlCatalog) -> Self {
        let mut types = HashMap::new();
        let groups = [
            (parsed.types.dual_shift, LetterType::DualShift),
            (parsed.types.shift, LetterType::Shift),
            (parsed.types.cross_shift, LetterType::CrossShift),
            (parsed.types.dash, LetterType::Dash),
            (parsed.types.dual_dash, LetterType::DualDash),
            (parsed.types.r#static, LetterType::Static),
        ];
        for (letters, letter_type) in groups {
            for letter in letters {
                types.insert(letter, letter_type);
            }
        }

        let dash_suffix = match parsed.sets.dash_suffix {
            Some(letters) => letters.into_iter().collect(),
            None => types
                .iter()
                .filter(|(_, t)| matches!(t, LetterType::CrossShift | LetterType::DualDash))
                .map(|(l, _)| l.clone())
                .collect(),
        };

        Self {
            types,
            dash_suffix,
            beta_ending: parsed.sets.beta_ending.into_iter().collect(),
            always_special: parsed.sets.always_special.into_iter().collect(),
            hybrid: parsed.sets.hybrid.into_iter().collect(),
        }
    }

    pub fn letter_type(&self, letter: &Letter) -> Option<LetterType> {
        self.types.get(letter.as_str()).copied()
    }

    pub fn takes_dash_suffix(&self, letter: &Letter) -> bool {
        self.dash_suffix.contains(letter.as_str())
    }

    pub fn ends_at_beta(&self, letter: &Letter) -> bool {
        self.beta_ending.contains(letter.as_str())
    }

    pub fn is_always_special(&self, letter: &Letter) -> bool {
        self.always_special.contains(letter.as_str())
    }

    pub fn is_hybrid(&self, letter: &Letter) -> bool {
        self.hybrid.contains(letter.as_str())
    }

    /// Number of letters with a known type
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for LetterCatalog {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CATALOG).expect("Default letter catalog should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_types() {
        let catalog = LetterCatalog::default();
        assert_eq!(catalog.letter_type(&"A".into()), Some(LetterType::DualShift));
        assert_eq!(catalog.letter_type(&"W-".into()), Some(LetterType::CrossShift));
        assert_eq!(catalog.letter_type(&"Λ".into()), Some(LetterType::Dash));
        assert_eq!(catalog.letter_type(&"β".into()), Some(LetterType::Static));
        assert_eq!(catalog.letter_type(&"?".into()), None);
        assert_eq!(catalog.len(), 22 + 8 + 8 + 3 + 3 + 3);
    }

    #[test]
    fn test_dash_suffix_defaults_to_dash_groups() {
        let catalog = LetterCatalog::default();
        assert!(catalog.takes_dash_suffix(&"W-".into()));
        assert!(catalog.takes_dash_suffix(&"Φ-".into()));
        assert!(!catalog.takes_dash_suffix(&"W".into()));
        assert!(!catalog.takes_dash_suffix(&"Φ".into()));
    }

    #[test]
    fn test_default_beta_ending_letters() {
        let catalog = LetterCatalog::default();
        for letter in ["G", "L", "Y", "Z", "Y-", "Z-", "Ψ", "β"] {
            assert!(catalog.ends_at_beta(&letter.into()), "{} ends at beta", letter);
        }
        for letter in ["A", "W", "X", "Σ", "Δ", "X-", "Δ-"] {
            assert!(!catalog.ends_at_beta(&letter.into()), "{} does not end at beta", letter);
        }
    }

    #[test]
    fn test_explicit_sets() {
        let catalog = LetterCatalog::from_toml_str(
            r#"
[types]
dual_shift = ["A"]

[sets]
dash_suffix = ["A"]
beta_ending = ["A"]
"#,
        )
        .expect("Should parse");
        assert!(catalog.takes_dash_suffix(&"A".into()));
        assert!(catalog.ends_at_beta(&"A".into()));
        assert!(!catalog.is_always_special(&"A".into()));
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(LetterCatalog::from_toml_str("not [valid").is_err());
    }
}
