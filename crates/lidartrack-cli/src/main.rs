use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

use lidartrack::bump::{Bump, BumpModel};
use lidartrack::plateau::{Plateau, PlateauModel};
use lidartrack::scan::{DirectionalScanner, Stroke};
use lidartrack::tracker::{StructureTracker, TrackerModel};

mod scanner;

use scanner::{GridDirectionalScanner, GridTileSet};

#[derive(Parser)]
#[command(name = "lidartrack")]
#[command(about = "Track a linear archaeomorphological structure across a LiDAR point cloud")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Track a carriage track (flat plateau) or a ridge/hollow (bump) from
    /// a CSV point cloud and a seed stroke.
    Track {
        /// CSV file with an `x,y,z` header, coordinates in meters.
        #[arg(long)]
        points: String,
        /// Stroke start, `x,y` in meters.
        #[arg(long, value_parser = parse_point)]
        p1: (f64, f64),
        /// Stroke end, `x,y` in meters.
        #[arg(long, value_parser = parse_point)]
        p2: (f64, f64),
        /// Track a ridge/hollow bump instead of a flat plateau.
        #[arg(long)]
        ridge: bool,
        /// Ridge (true) or hollow (false) orientation; only meaningful
        /// with `--ridge`.
        #[arg(long, default_value_t = true)]
        over: bool,
        /// Tile grid cell size, in meters.
        #[arg(long, default_value_t = 0.5)]
        cell_size: f64,
        /// Half-width of each cross-section scan band, in meters.
        #[arg(long, default_value_t = 4.0)]
        band_width: f64,
        /// Spacing between successive scans, in meters.
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Track {
            points,
            p1,
            p2,
            ridge,
            over,
            cell_size,
            band_width,
            step,
        } => track(points, p1, p2, ridge, over, cell_size, band_width, step),
    }
}

fn read_points(path: &str) -> Result<Vec<(f32, f32, f32)>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("opening {path}"))?;
    let mut pts = Vec::new();
    for record in reader.records() {
        let record = record?;
        let x: f32 = record.get(0).context("missing x")?.trim().parse()?;
        let y: f32 = record.get(1).context("missing y")?.trim().parse()?;
        let z: f32 = record.get(2).context("missing z")?.trim().parse()?;
        pts.push((x, y, z));
    }
    Ok(pts)
}

#[allow(clippy::too_many_arguments)]
fn track(
    points_path: String,
    p1: (f64, f64),
    p2: (f64, f64),
    ridge: bool,
    over: bool,
    cell_size: f64,
    band_width: f64,
    step: f64,
) -> Result<()> {
    let points = read_points(&points_path)?;
    tracing::info!(path = %points_path, count = points.len(), "loaded points");

    let tiles = GridTileSet::from_points(points, cell_size);
    let mut scanner = GridDirectionalScanner::new(cell_size, band_width, step);
    let stroke = Stroke { p1, p2 };

    let summary = if ridge {
        let model = BumpModel::default();
        let tracker_model = TrackerModel::default();
        let tracker = StructureTracker::<Bump>::new(&model, &tracker_model);
        let structure = tracker.detect(stroke, &tiles, &mut scanner, over);
        let volume = structure.volume(scanner.scan_period() as f32, |b| b.area_bounds());
        json!({
            "kind": "ridge",
            "status": format!("{:?}", structure.status()),
            "accepted": structure.count_of_accepted(),
            "spread": structure.spread(),
            "holes": structure.holes(),
            "mean_width": structure.mean_width(),
            "mean_height": structure.mean_height(),
            "slope": structure.slope(),
            "relative_shift_length": structure.relative_shift_length(),
            "volume_mean": volume.mean,
            "volume_lower": volume.lower,
            "volume_upper": volume.upper,
        })
    } else {
        let model = PlateauModel::default();
        let tracker_model = TrackerModel::default();
        let tracker = StructureTracker::<Plateau>::new(&model, &tracker_model);
        let structure = tracker.detect(stroke, &tiles, &mut scanner, over);
        json!({
            "kind": "carriage_track",
            "status": format!("{:?}", structure.status()),
            "accepted": structure.count_of_accepted(),
            "spread": structure.spread(),
            "holes": structure.holes(),
            "mean_width": structure.mean_width(),
            "mean_height": structure.mean_height(),
            "slope": structure.slope(),
            "relative_shift_length": structure.relative_shift_length(),
        })
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
