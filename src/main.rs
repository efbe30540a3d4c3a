// src/main.rs

// Declare modules
pub mod config;
pub mod emitter;
pub mod geometry;
pub mod grid;
pub mod navigation;
pub mod render;
pub mod resize;
pub mod source;
pub mod transcode;

use crate::{
    config::GridConfig, geometry::GeometryTracker, navigation::Navigator, source::ImageRecord,
};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Displays a directory's images as a grid using the kitty graphics
/// protocol, tracking the terminal's pixel dimensions across resizes.
#[derive(Parser, Debug)]
#[command(name = "icat-grid", version, about)]
struct Args {
    /// Directory to scan for images
    directory: PathBuf,

    /// Scan the directory recursively
    #[arg(short, long)]
    recursive: bool,

    /// Maximum number of images to display
    #[arg(short = 'n', long, default_value_t = 100)]
    max_images: usize,

    /// Grid columns (0 resolves to the default of 4)
    #[arg(long, default_value_t = 0)]
    columns: u32,

    /// Grid rows (0 resolves to the default of 4)
    #[arg(long, default_value_t = 0)]
    rows: u32,
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Starting icat-grid in {}", args.directory.display());

    // --- Discovery ---
    let mut paths = source::discover(&args.directory, args.recursive)
        .with_context(|| format!("failed to discover images in {}", args.directory.display()))?;
    if paths.len() > args.max_images {
        info!(
            "limiting display to the first {} of {} discovered image(s)",
            args.max_images,
            paths.len()
        );
        paths.truncate(args.max_images);
    }
    let records = ImageRecord::from_paths(paths);
    if records.is_empty() {
        info!("no images found in {}", args.directory.display());
        return Ok(());
    }

    // --- Geometry ---
    // Subscribe before spawning any thread so the listener inherits the
    // blocked-SIGWINCH mask and becomes the signal's sole consumer.
    let signals = resize::subscribe()?;
    let tracker = GeometryTracker::new();
    tracker
        .refresh()
        .context("initial terminal geometry query failed")?;
    let _listener = resize::spawn_refresh_listener(tracker.clone(), signals)
        .context("failed to spawn resize listener thread")?;

    // --- Render pass ---
    // One snapshot per pass; a resize mid-pass applies to the next pass.
    let grid_config = GridConfig::new(args.columns, args.rows);
    let snapshot = tracker.snapshot();
    let mut out = BufWriter::new(io::stdout().lock());
    let emitted = render::render_grid(&records, grid_config, snapshot, &mut out)
        .context("failed to render image grid")?;
    info!("rendered {} of {} image(s)", emitted, records.len());

    // --- Navigation bring-up ---
    let navigator = Navigator::new(records.len(), grid_config);
    debug!("initial selection: {:?}", navigator.state());

    Ok(())
}
