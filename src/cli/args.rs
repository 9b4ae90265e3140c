//! CLI argument definitions.

use crate::clip::TimeWindow;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Waveform viewer for RTTM speaker/language diarization annotations.
///
/// With no output flags the GUI opens, prefilled with whatever paths were
/// given. With `--save-plot`, `--export`, or `--clip-out` and both input
/// paths present, the tool runs headless and exits.
#[derive(Debug, Parser)]
#[command(name = "diarview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// WAV audio file to load.
    pub audio: Option<PathBuf>,

    /// RTTM annotation file to load.
    pub rttm: Option<PathBuf>,

    /// View options.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Options controlling the displayed view and headless outputs.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Window start time in seconds.
    #[arg(long, value_parser = parse_seconds, requires = "end", env = "DIARVIEW_START")]
    pub start: Option<f64>,

    /// Window end time in seconds.
    #[arg(long, value_parser = parse_seconds, requires = "start", env = "DIARVIEW_END")]
    pub end: Option<f64>,

    /// Write the rendered plot to a PNG file (headless).
    #[arg(long, value_name = "PNG", requires = "rttm")]
    pub save_plot: Option<PathBuf>,

    /// Export the displayed segments to a .csv, .json, or .txt file (headless).
    #[arg(long, value_name = "FILE", requires = "rttm")]
    pub export: Option<PathBuf>,

    /// Write the displayed audio to a WAV file (headless).
    #[arg(long, value_name = "WAV", requires = "rttm")]
    pub clip_out: Option<PathBuf>,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-warning log output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ViewArgs {
    /// Whether any headless output was requested.
    #[must_use]
    pub fn wants_headless(&self) -> bool {
        self.save_plot.is_some() || self.export.is_some() || self.clip_out.is_some()
    }

    /// The requested time window, if both bounds were given.
    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TimeWindow::from_range(start, end)),
            _ => None,
        }
    }
}

/// Parse a non-negative seconds value.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid time in seconds"))?;
    if value < 0.0 {
        return Err(format!("time must be non-negative, got {value}"));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_and_window() {
        let cli = Cli::try_parse_from([
            "diarview",
            "rec.wav",
            "rec.rttm",
            "--start",
            "3.0",
            "--end",
            "8.0",
        ])
        .unwrap();

        assert_eq!(cli.audio.unwrap(), PathBuf::from("rec.wav"));
        assert_eq!(cli.rttm.unwrap(), PathBuf::from("rec.rttm"));
        let window = cli.view.window().unwrap();
        assert_eq!(window.start, 3.0);
        assert_eq!(window.duration, 5.0);
    }

    #[test]
    fn test_start_requires_end() {
        let result = Cli::try_parse_from(["diarview", "rec.wav", "rec.rttm", "--start", "3.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_time_rejected() {
        let result = Cli::try_parse_from([
            "diarview",
            "rec.wav",
            "rec.rttm",
            "--start",
            "-1.0",
            "--end",
            "2.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_headless_outputs_require_inputs() {
        let result = Cli::try_parse_from(["diarview", "--save-plot", "out.png"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "diarview",
            "rec.wav",
            "rec.rttm",
            "--save-plot",
            "out.png",
        ])
        .unwrap();
        assert!(cli.view.wants_headless());
    }

    #[test]
    fn test_no_flags_is_gui_mode() {
        let cli = Cli::try_parse_from(["diarview"]).unwrap();
        assert!(!cli.view.wants_headless());
        assert!(cli.view.window().is_none());
    }
}
