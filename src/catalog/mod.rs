//! Reference catalog records and their symmetry transforms
//!
//! Catalog entries are kept close to their stored JSON form: every token is
//! a plain string, and fields this crate does not know about are carried
//! through untouched.

pub mod positions;
pub mod transform;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use positions::{locations_of, mirror_position, position_of};
pub use transform::{mirror_vertical, rotate, rotate_45};

/// One stored pictograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictographRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue_attributes: Option<AttributeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_attributes: Option<AttributeRecord>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The stored attributes of one motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_rot_dir: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PictographRecord {
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
