//! Diarview - waveform viewer for RTTM diarization annotations.
//!
//! This crate loads a WAV file plus an RTTM annotation file, optionally
//! restricts the view to a time window, and renders a waveform plot with
//! each annotated segment colored by its speaker/language label.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clip;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod render;
pub mod rttm;
pub mod session;
pub mod viewer;

use clap::Parser;
use cli::{Cli, ViewArgs};
use config::Config;
use session::Session;
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for diarview.
///
/// With headless output flags and both input paths the requested artifacts
/// are written and the process exits; otherwise the viewer window opens,
/// prefilled with whatever paths were given.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.view.verbose, cli.view.quiet);

    // Load configuration
    let config = config::load_default_config()?;

    if cli.view.wants_headless()
        && let (Some(audio), Some(rttm)) = (&cli.audio, &cli.rttm)
    {
        return run_headless(audio, rttm, &cli.view, &config);
    }

    viewer::run_viewer(&config, cli.audio, cli.rttm)
}

/// Produce the requested artifacts without opening a window.
fn run_headless(audio: &Path, rttm: &Path, args: &ViewArgs, config: &Config) -> Result<()> {
    info!("Loading audio: {}", audio.display());
    info!("Loading annotations: {}", rttm.display());

    let session = Session::new(audio.to_path_buf(), rttm.to_path_buf());
    let view = session.load_view(args.window())?;

    if let Some(requested) = view.clamped_end {
        warn!(
            "Requested end time {requested:.2}s exceeds the audio duration of {:.2}s; \
             truncating to end-of-file",
            view.total_duration
        );
    }

    info!(
        "Loaded {:.2}s of audio at {} Hz with {} segment(s)",
        view.display_duration_secs(),
        view.sample_rate,
        view.segments.len()
    );

    if let Some(path) = &args.save_plot {
        let plot = render::render(
            &view.samples,
            view.sample_rate,
            &view.segments,
            view.time_offset,
            &config.display.render_options(),
        );
        render::write_png(path, &plot)?;
        info!("Wrote plot: {}", path.display());
    }

    if let Some(path) = &args.export {
        export::export_segments(path, &view.segments, &view.export_context())?;
        info!("Wrote segment table: {}", path.display());
    }

    if let Some(path) = &args.clip_out {
        clip::write_clip_wav(path, &view.samples, view.sample_rate)?;
        info!("Wrote clip: {}", path.display());
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}
