//! Configuration for the placement engine

use super::beta::PropType;

/// What to do when the grid geometry has no anchor for a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAnchor {
    /// Leave the final coordinate unset
    #[default]
    Skip,
    /// Place relative to the grid center instead
    GridCenter,
}

/// Configuration options for placement computation
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Separation applied to each of two small props sharing a point
    pub small_prop_offset: f64,

    /// Separation applied to each of two big props sharing a point
    pub big_prop_offset: f64,

    /// Separation applied to each of two bare hands sharing a point
    pub hand_offset: f64,

    /// Prop drawn for both colors unless a request says otherwise
    pub prop_type: PropType,

    pub missing_anchor: MissingAnchor,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            small_prop_offset: 25.0,
            big_prop_offset: 45.0,
            hand_offset: 10.0,
            prop_type: PropType::Staff,
            missing_anchor: MissingAnchor::Skip,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_small_prop_offset(mut self, offset: f64) -> Self {
        self.small_prop_offset = offset;
        self
    }

    pub fn with_big_prop_offset(mut self, offset: f64) -> Self {
        self.big_prop_offset = offset;
        self
    }

    pub fn with_hand_offset(mut self, offset: f64) -> Self {
        self.hand_offset = offset;
        self
    }

    pub fn with_prop_type(mut self, prop_type: PropType) -> Self {
        self.prop_type = prop_type;
        self
    }

    pub fn with_missing_anchor(mut self, policy: MissingAnchor) -> Self {
        self.missing_anchor = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.small_prop_offset, 25.0);
        assert_eq!(config.big_prop_offset, 45.0);
        assert_eq!(config.prop_type, PropType::Staff);
        assert_eq!(config.missing_anchor, MissingAnchor::Skip);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_small_prop_offset(10.0)
            .with_big_prop_offset(20.0)
            .with_hand_offset(5.0)
            .with_prop_type(PropType::Hand)
            .with_missing_anchor(MissingAnchor::GridCenter);

        assert_eq!(config.small_prop_offset, 10.0);
        assert_eq!(config.big_prop_offset, 20.0);
        assert_eq!(config.hand_offset, 5.0);
        assert_eq!(config.prop_type, PropType::Hand);
        assert_eq!(config.missing_anchor, MissingAnchor::GridCenter);
    }
}
