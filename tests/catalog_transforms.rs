//! Integration tests for the catalog symmetry transforms on stored JSON records.

use pictograph_placement::{mirror_vertical, rotate, rotate_45, PictographRecord};
use pretty_assertions::assert_eq;

const RECORD: &str = r#"{
    "letter": "C",
    "start_pos": "gamma1",
    "end_pos": "gamma3",
    "timing": "split",
    "direction": "opp",
    "blue_attributes": {
        "motion_type": "pro",
        "start_loc": "w",
        "end_loc": "n",
        "prop_rot_dir": "cw",
        "turns": 1,
        "start_ori": "in"
    },
    "red_attributes": {
        "motion_type": "anti",
        "start_loc": "n",
        "end_loc": "e",
        "prop_rot_dir": "ccw",
        "turns": 0.5
    }
}"#;

fn record() -> PictographRecord {
    PictographRecord::from_json_str(RECORD).expect("Should parse")
}

#[test]
fn test_mirror_twice_restores_the_json() {
    let original: serde_json::Value = serde_json::from_str(RECORD).unwrap();
    let twice = mirror_vertical(&mirror_vertical(&record()));
    assert_eq!(serde_json::to_value(&twice).unwrap(), original);
}

#[test]
fn test_mirror_remaps_every_token() {
    let mirrored = mirror_vertical(&record());
    assert_eq!(mirrored.start_pos.as_deref(), Some("gamma9"));
    assert_eq!(mirrored.end_pos.as_deref(), Some("gamma15"));

    let blue = mirrored.blue_attributes.as_ref().unwrap();
    assert_eq!(blue.start_loc.as_deref(), Some("e"));
    assert_eq!(blue.end_loc.as_deref(), Some("n"));
    assert_eq!(blue.prop_rot_dir.as_deref(), Some("ccw"));
    assert_eq!(blue.extra["start_ori"], "in");

    let red = mirrored.red_attributes.as_ref().unwrap();
    assert_eq!(red.end_loc.as_deref(), Some("w"));
    assert_eq!(red.prop_rot_dir.as_deref(), Some("cw"));
    assert_eq!(mirrored.extra["timing"], "split");
}

#[test]
fn test_rotation_walks_the_gamma_positions() {
    let mut current = record();
    let mut starts = Vec::new();
    for _ in 0..8 {
        current = rotate_45(&current);
        starts.push(current.start_pos.clone().unwrap());
    }
    assert_eq!(
        starts,
        vec!["gamma2", "gamma3", "gamma4", "gamma5", "gamma6", "gamma7", "gamma8", "gamma1"]
    );
    assert_eq!(current, record());
}

#[test]
fn test_rotation_keeps_rotation_direction() {
    let rotated = rotate(&record(), 3);
    assert_eq!(
        rotated.blue_attributes.unwrap().prop_rot_dir.as_deref(),
        Some("cw")
    );
}
