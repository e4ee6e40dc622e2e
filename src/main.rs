use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use log::debug;
use track_heatmap::{
    generate_heatmap, read_track, render_heatmap, HeatmapConfig, RenderConfig, Track,
};

/// Render a GPS track as a character-grid heatmap.
///
/// Input lines are `lat lon time` triples; a blank line separates segments.
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a GPS track as a character-grid heatmap", long_about = None)]
struct Cli {
    /// Degrees of longitude per grid column
    cell_width: f64,

    /// Degrees of latitude per grid row
    cell_height: f64,

    /// Display characters, from the emptiest bucket to the fullest
    palette: String,

    /// Number of counts covered by each palette bucket
    bucket_width: u64,

    /// Read the track from a file instead of stdin
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Emit the heatmap grid as JSON instead of characters
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Validate the whole configuration surface before touching the core.
    if !(cli.cell_width > 0.0) || !(cli.cell_height > 0.0) {
        bail!(
            "cell dimensions must be positive, got {} x {}",
            cli.cell_width,
            cli.cell_height
        );
    }
    let render_config = RenderConfig::new(&cli.palette, cli.bucket_width)?;
    let heatmap_config = HeatmapConfig::new(cli.cell_width, cli.cell_height);

    let track: Track = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_track(BufReader::new(file)).context("failed to read track")?
        }
        None => read_track(io::stdin().lock()).context("failed to read track from stdin")?,
    };
    debug!(
        "[Cli] Track: {} segments, lengths {:?}",
        track.segment_count(),
        track.segment_lengths()
    );

    let heatmap = generate_heatmap(&track, &heatmap_config).context("failed to build heatmap")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer(&mut out, &heatmap).context("failed to serialize heatmap")?;
        writeln!(out)?;
    } else {
        render_heatmap(&mut out, &heatmap, &render_config).context("failed to render heatmap")?;
    }
    Ok(())
}
