//! Segment table export writers.
//!
//! The displayed segment sequence can be exported as a CSV table, a JSON
//! result document, or an Audacity label track. Format is selected by the
//! output file extension.

mod audacity;
mod csv;
mod json;
mod writer;

pub use audacity::AudacityWriter;
pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use writer::SegmentWriter;

use std::path::{Path, PathBuf};

use crate::clip::TimeWindow;
use crate::constants::export_extensions;
use crate::error::{Error, Result};
use crate::rttm::Segment;

/// Export format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated segment table.
    Csv,
    /// JSON result document with summary.
    Json,
    /// Audacity label track (tab-separated).
    Audacity,
}

impl ExportFormat {
    /// Resolve the format from an output path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownExportFormat`] for unrecognized extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            e if e == export_extensions::CSV => Ok(Self::Csv),
            e if e == export_extensions::JSON => Ok(Self::Json),
            e if e == export_extensions::AUDACITY => Ok(Self::Audacity),
            _ => Err(Error::UnknownExportFormat { extension }),
        }
    }
}

/// Context shared by all export formats.
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Path of the source audio file.
    pub source_file: PathBuf,
    /// Duration of the displayed audio in seconds.
    pub audio_duration_secs: f64,
    /// The requested time window, if the view was clipped.
    pub window: Option<TimeWindow>,
}

/// Export segments to `path`, format chosen by extension.
///
/// # Errors
///
/// Returns an error for unknown extensions or write failures.
pub fn export_segments(
    path: &Path,
    segments: &[Segment],
    context: &ExportContext,
) -> Result<()> {
    let format = ExportFormat::from_path(path)?;

    let mut writer: Box<dyn SegmentWriter> = match format {
        ExportFormat::Csv => Box::new(CsvWriter::new(path, context)?),
        ExportFormat::Json => Box::new(JsonWriter::new(path, context)),
        ExportFormat::Audacity => Box::new(AudacityWriter::new(path)?),
    };

    writer.write_header()?;
    for segment in segments {
        writer.write_segment(segment)?;
    }
    writer.finalize()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.JSON")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("labels.txt")).unwrap(),
            ExportFormat::Audacity
        );
    }

    #[test]
    fn test_format_unknown_extension() {
        let err = ExportFormat::from_path(Path::new("out.parquet")).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownExportFormat { extension } if extension == "parquet"
        ));
    }

    #[test]
    fn test_format_missing_extension() {
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }
}
