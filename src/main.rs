//! Pictograph placement CLI
//!
//! Usage:
//!   pictograph-place [OPTIONS] [FILE]
//!
//! Options:
//!   --special <FILE>      Special placement table (TOML or JSON)
//!   --defaults <FILE>     Default placement table (TOML or JSON)
//!   --letters <FILE>      Letter catalog (TOML or JSON)
//!   --geometry <FILE>     Grid anchor coordinates (TOML or JSON)
//!   --swap-rules <FILE>   Small-prop swap rules (TOML or JSON)
//!   --mirror              Mirror a JSON pictograph record instead
//!   --rotate <STEPS>      Rotate a JSON pictograph record by 45° steps
//!   -h, --help            Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use pictograph_placement::{
    mirror_vertical, rotate, Color, ColorPair, DefaultPlacements, EngineConfig, GridGeometry,
    GridMode, Letter, LetterCatalog, Location, MotionAttributes, MotionKind, MotionPair,
    Orientation, PictographRecord, PlacementEngine, PropType, ReferenceData, ReferenceDataError,
    RotationDirection, SpecialPlacements, SwapRules, Turns,
};

#[derive(Parser)]
#[command(name = "pictograph-place")]
#[command(about = "Resolve arrow and prop placement for a pictograph")]
struct Cli {
    /// Request file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Special placement table
    #[arg(long)]
    special: Option<PathBuf>,

    /// Default placement table
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Letter catalog
    #[arg(long)]
    letters: Option<PathBuf>,

    /// Grid anchor coordinates
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Small-prop swap rules
    #[arg(long)]
    swap_rules: Option<PathBuf>,

    /// Treat the input as a JSON pictograph record and mirror it vertically
    #[arg(long, conflicts_with = "rotate")]
    mirror: bool,

    /// Treat the input as a JSON pictograph record and rotate it by 45° steps
    #[arg(long, value_name = "STEPS")]
    rotate: Option<u32>,
}

/// A placement request as read from TOML or JSON
#[derive(Debug, Deserialize)]
struct PlacementRequest {
    letter: Letter,
    #[serde(default)]
    grid_mode: GridMode,
    prop_type: Option<PropType>,
    blue: MotionRequest,
    red: MotionRequest,
}

#[derive(Debug, Deserialize)]
struct MotionRequest {
    motion_kind: MotionKind,
    start_location: Location,
    end_location: Location,
    start_orientation: Option<Orientation>,
    #[serde(default)]
    rotation_direction: RotationDirection,
    #[serde(default)]
    turns: Turns,
}

impl MotionRequest {
    fn into_attributes(self, color: Color) -> MotionAttributes {
        let motion = MotionAttributes::new(color, self.motion_kind, self.start_location, self.end_location)
            .with_rotation(self.rotation_direction)
            .with_turns(self.turns);
        match self.start_orientation {
            Some(orientation) => motion.with_start_orientation(orientation),
            None => motion,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let output = if cli.mirror || cli.rotate.is_some() {
        transform_record(&source, cli.mirror, cli.rotate.unwrap_or(0))
    } else {
        load_reference(&cli).and_then(|reference| place_request(&source, cli.input.as_deref(), reference))
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_reference(cli: &Cli) -> Result<ReferenceData, String> {
    fn load<T>(
        path: &Option<PathBuf>,
        loader: fn(&Path) -> Result<T, ReferenceDataError>,
    ) -> Result<Option<T>, String> {
        path.as_deref()
            .map(|p| loader(p).map_err(|e| format!("loading '{}': {}", p.display(), e)))
            .transpose()
    }

    let mut reference = ReferenceData::new();
    if let Some(special) = load(&cli.special, SpecialPlacements::from_file)? {
        reference = reference.with_special(special);
    }
    if let Some(defaults) = load(&cli.defaults, DefaultPlacements::from_file)? {
        reference = reference.with_defaults(defaults);
    }
    if let Some(letters) = load(&cli.letters, LetterCatalog::from_file)? {
        reference = reference.with_letters(letters);
    }
    if let Some(geometry) = load(&cli.geometry, GridGeometry::from_file)? {
        reference = reference.with_geometry(geometry);
    }
    if let Some(rules) = load(&cli.swap_rules, SwapRules::from_file)? {
        reference = reference.with_swap_rules(rules);
    }
    Ok(reference)
}

fn parse_request(source: &str, path: Option<&Path>) -> Result<PlacementRequest, String> {
    let is_json = match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("json"),
        None => source.trim_start().starts_with('{'),
    };
    if is_json {
        serde_json::from_str(source).map_err(|e| format!("invalid request: {}", e))
    } else {
        toml::from_str(source).map_err(|e| format!("invalid request: {}", e))
    }
}

fn place_request(source: &str, path: Option<&Path>, reference: ReferenceData) -> Result<String, String> {
    let request = parse_request(source, path)?;

    let mut config = EngineConfig::new();
    if let Some(prop_type) = request.prop_type {
        config = config.with_prop_type(prop_type);
    }
    let engine = PlacementEngine::new(reference, config);

    let mut motions: MotionPair = ColorPair::new(
        request.blue.into_attributes(Color::Blue),
        request.red.into_attributes(Color::Red),
    );
    let placement = engine
        .place(&mut motions, &request.letter, request.grid_mode)
        .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&placement).map_err(|e| e.to_string())
}

fn transform_record(source: &str, mirror: bool, steps: u32) -> Result<String, String> {
    let record = PictographRecord::from_json_str(source)
        .map_err(|e| format!("invalid pictograph record: {}", e))?;
    let rotated = rotate(&record, steps);
    let transformed = if mirror { mirror_vertical(&rotated) } else { rotated };
    serde_json::to_string_pretty(&transformed).map_err(|e| e.to_string())
}
