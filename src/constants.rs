//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and the window title.
pub const APP_NAME: &str = "diarview";

/// RTTM record layout.
///
/// RTTM lines are whitespace-delimited; fields are positional.
pub mod rttm {
    /// Minimum number of fields in a valid RTTM line.
    pub const MIN_FIELDS: usize = 8;

    /// Index of the segment start time field (seconds).
    pub const FIELD_START: usize = 3;

    /// Index of the segment duration field (seconds).
    pub const FIELD_DURATION: usize = 4;

    /// Index of the speaker/language label field.
    pub const FIELD_LABEL: usize = 7;

    /// File extension for RTTM annotation files.
    pub const EXTENSION: &str = "rttm";
}

/// Plot geometry and drawing defaults.
pub mod plot {
    /// Default plot width in pixels.
    pub const DEFAULT_WIDTH: u32 = 1120;

    /// Default plot height in pixels.
    pub const DEFAULT_HEIGHT: u32 = 400;

    /// Margin around the trace area in pixels (room for shell-drawn labels).
    pub const MARGIN: u32 = 24;

    /// Opacity of segment traces.
    pub const SEGMENT_ALPHA: f32 = 0.8;

    /// Opacity of the full-audio underlay trace.
    pub const UNDERLAY_ALPHA: f32 = 0.2;

    /// Plot background color.
    pub const BACKGROUND: [u8; 3] = [245, 245, 245];

    /// Grid line color.
    pub const GRID: [u8; 3] = [215, 215, 220];

    /// Full-audio underlay trace color.
    pub const UNDERLAY: [u8; 3] = [128, 128, 128];

    /// Zero-amplitude axis line color.
    pub const AXIS: [u8; 3] = [96, 96, 96];

    /// Target number of time-axis ticks.
    pub const TIME_TICKS: usize = 10;

    /// Amplitude tick values, top to bottom.
    pub const AMP_TICKS: [f32; 5] = [1.0, 0.5, 0.0, -0.5, -1.0];
}

/// Categorical label palette.
///
/// Twenty distinguishable colors; labels past the palette size wrap around.
pub const LABEL_PALETTE: [[u8; 3]; 20] = [
    [31, 119, 180],
    [174, 199, 232],
    [255, 127, 14],
    [255, 187, 120],
    [44, 160, 44],
    [152, 223, 138],
    [214, 39, 40],
    [255, 152, 150],
    [148, 103, 189],
    [197, 176, 213],
    [140, 86, 75],
    [196, 156, 148],
    [227, 119, 194],
    [247, 182, 210],
    [127, 127, 127],
    [199, 199, 199],
    [188, 189, 34],
    [219, 219, 141],
    [23, 190, 207],
    [158, 218, 229],
];

/// Export file extensions by format.
pub mod export_extensions {
    /// CSV segment table extension.
    pub const CSV: &str = "csv";
    /// JSON result document extension.
    pub const JSON: &str = "json";
    /// Audacity label track extension.
    pub const AUDACITY: &str = "txt";
}

/// Viewer window defaults.
pub mod viewer {
    /// Default window width in pixels.
    pub const WINDOW_WIDTH: i32 = 1280;

    /// Default window height in pixels.
    pub const WINDOW_HEIGHT: i32 = 640;

    /// Width of the control column in pixels.
    pub const CONTROL_WIDTH: i32 = 260;

    /// Window title.
    pub const WINDOW_TITLE: &str = "Diarization Waveform Viewer";
}
