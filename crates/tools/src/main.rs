use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::{FeatureRecord, PolygonCatalog};
use foundation::math::Vec3;
use layers::MapFeature;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{MapConfig, TownMap};

#[derive(Parser, Debug)]
#[command(name = "townmap", about = "Inspect draw.io town maps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the scene for a diagram and summarize it.
    Inspect {
        diagram: PathBuf,
        /// Detail model catalog (JSON keyed by lod2 id).
        #[arg(long)]
        polygons: Option<PathBuf>,
        /// Map configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Orbit the floor centre at this polar angle before reporting
        /// detail visibility.
        #[arg(long)]
        pitch: Option<f64>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct InspectReport {
    diagram_hash: String,
    polygons_hash: Option<String>,
    records: usize,
    by_kind: BTreeMap<String, usize>,
    features: usize,
    nodes: usize,
    floor: [f64; 4],
    polar_deg: f64,
    details: Vec<DetailReport>,
    pending_images: usize,
}

#[derive(Debug, Serialize)]
struct DetailReport {
    label: String,
    visible: bool,
    scale: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Cli::parse().command {
        Command::Inspect {
            diagram,
            polygons,
            config,
            pitch,
            json,
        } => cmd_inspect(&diagram, polygons.as_deref(), config.as_deref(), pitch, json),
    }
}

fn cmd_inspect(
    diagram: &Path,
    polygons: Option<&Path>,
    config: Option<&Path>,
    pitch: Option<f64>,
    json: bool,
) -> Result<(), String> {
    let text = fs::read_to_string(diagram).map_err(|e| format!("read {diagram:?}: {e}"))?;

    let (catalog, polygons_hash) = match polygons {
        Some(path) => {
            let bytes = fs::read(path).map_err(|e| format!("read {path:?}: {e}"))?;
            let body = std::str::from_utf8(&bytes).map_err(|e| format!("utf8 {path:?}: {e}"))?;
            let catalog = PolygonCatalog::from_json_str(body).map_err(|e| format!("parse {path:?}: {e}"))?;
            (catalog, Some(blake3::hash(&bytes).to_hex().to_string()))
        }
        None => (PolygonCatalog::new(), None),
    };

    let config: MapConfig = match config {
        Some(path) => {
            let body = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            serde_json::from_str(&body).map_err(|e| format!("parse {path:?}: {e}"))?
        }
        None => MapConfig::default(),
    };

    let records = formats::load_records(&text);
    let mut map = TownMap::headless(config);
    map.load(&records, catalog, |i, n| {
        if n > 0 && (i + 1) % 100 == 0 {
            info!(done = i + 1, total = n, "generating");
        }
    });
    let pending_images = map.fulfil_detail_models().len();

    if let Some(deg) = pitch {
        orbit_floor_centre(&mut map, deg);
    }
    let pose = map.on_frame(0.0);

    let floor = map.floor();
    let report = InspectReport {
        diagram_hash: blake3::hash(text.as_bytes()).to_hex().to_string(),
        polygons_hash,
        records: records.len(),
        by_kind: count_by_kind(&records),
        features: map.registry().len(),
        nodes: map.world().len(),
        floor: [floor.p1.x, floor.p1.z, floor.p2.x, floor.p2.z],
        polar_deg: pose.polar_deg,
        details: detail_reports(&map),
        pending_images,
    };

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| format!("encode report: {e}"))?;
        println!("{out}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn count_by_kind(records: &[FeatureRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.feature_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// Keep the configured eye distance, swing to `polar_deg` over the floor centre.
fn orbit_floor_centre(map: &mut TownMap, polar_deg: f64) {
    let floor = *map.floor();
    let target = Vec3::new((floor.p1.x + floor.p2.x) / 2.0, 0.0, (floor.p1.z + floor.p2.z) / 2.0);
    let distance = map.rig().pose().distance.max(0.1);
    let p = polar_deg.clamp(0.0, 90.0).to_radians();
    let eye = target + Vec3::new(p.sin() * distance, p.cos() * distance, 0.0);
    map.set_camera(eye, target);
}

fn detail_reports(map: &TownMap) -> Vec<DetailReport> {
    map.registry()
        .iter()
        .filter_map(|f| match f {
            MapFeature::Place(place) => place.detail().map(|d| (place, d)),
            _ => None,
        })
        .map(|(place, detail)| {
            let node = map.world().get(detail.building());
            DetailReport {
                label: place.base.identity.label.clone(),
                visible: node.is_some_and(|n| n.visible),
                scale: node.map_or(0.0, |n| n.transform.scale.x),
            }
        })
        .collect()
}

fn print_report(r: &InspectReport) {
    println!("diagram   {}", r.diagram_hash);
    if let Some(h) = &r.polygons_hash {
        println!("polygons  {h}");
    }
    println!("records   {}", r.records);
    for (kind, n) in &r.by_kind {
        println!("  {kind:<16} {n}");
    }
    println!("features  {}", r.features);
    println!("nodes     {}", r.nodes);
    println!(
        "floor     ({:.3}, {:.3}) .. ({:.3}, {:.3})",
        r.floor[0], r.floor[1], r.floor[2], r.floor[3]
    );
    println!("polar     {}", r.polar_deg);
    for d in &r.details {
        let state = if d.visible { "shown" } else { "hidden" };
        println!("  detail {:<20} {state} scale={:.3}", d.label, d.scale);
    }
    if r.pending_images > 0 {
        println!("images    {} pending", r.pending_images);
    }
}
