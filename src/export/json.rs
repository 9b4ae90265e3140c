//! JSON result document writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::{ExportContext, SegmentWriter};
use crate::rttm::Segment;

/// JSON result file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Source audio file name.
    pub source_file: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// The requested time window, if the view was clipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<JsonWindow>,
    /// Segment rows.
    pub segments: Vec<JsonSegment>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Time window in JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonWindow {
    /// Window start in seconds.
    pub start: f64,
    /// Window end in seconds.
    pub end: f64,
}

/// Single segment in JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Speaker/language label.
    pub label: String,
}

/// Summary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Total number of segments.
    pub total_segments: usize,
    /// Number of distinct labels.
    pub unique_labels: usize,
    /// Displayed audio duration in seconds.
    pub audio_duration_seconds: f64,
}

/// Writer for JSON segment output files.
///
/// Segments are collected and the document is written on `finalize`.
pub struct JsonWriter {
    output_path: PathBuf,
    context: ExportContext,
    segments: Vec<Segment>,
}

impl JsonWriter {
    /// Create a new JSON writer.
    #[must_use]
    pub fn new(path: &Path, context: &ExportContext) -> Self {
        Self {
            output_path: path.to_path_buf(),
            context: context.clone(),
            segments: Vec::new(),
        }
    }
}

impl SegmentWriter for JsonWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        self.segments.push(segment.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let mut labels: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !labels.contains(&segment.label.as_str()) {
                labels.push(&segment.label);
            }
        }

        let document = JsonResultFile {
            source_file: self.context.source_file.display().to_string(),
            generated_at: Utc::now(),
            window: self.context.window.map(|w| JsonWindow {
                start: w.start,
                end: w.end(),
            }),
            segments: self
                .segments
                .iter()
                .map(|s| JsonSegment {
                    start: s.start,
                    end: s.end(),
                    duration: s.duration,
                    label: s.label.clone(),
                })
                .collect(),
            summary: JsonSummary {
                total_segments: self.segments.len(),
                unique_labels: labels.len(),
                audio_duration_seconds: self.context.audio_duration_secs,
            },
        };

        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &document).map_err(|e| {
            Error::JsonWrite {
                path: self.output_path.clone(),
                source: e,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::clip::TimeWindow;
    use tempfile::NamedTempFile;

    fn seg(start: f64, duration: f64, label: &str) -> Segment {
        Segment {
            start,
            duration,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_json_document_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let context = ExportContext {
            source_file: PathBuf::from("rec.wav"),
            audio_duration_secs: 5.0,
            window: Some(TimeWindow::new(3.0, 5.0)),
        };

        let mut writer = JsonWriter::new(file.path(), &context);
        writer.write_header().unwrap();
        writer.write_segment(&seg(0.0, 2.0, "A")).unwrap();
        writer.write_segment(&seg(2.5, 1.0, "B")).unwrap();
        writer.write_segment(&seg(4.0, 0.5, "A")).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let parsed: JsonResultFile = serde_json::from_str(&contents).unwrap();

        assert_eq!(parsed.source_file, "rec.wav");
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(parsed.segments[1].end, 3.5);
        assert_eq!(parsed.summary.total_segments, 3);
        assert_eq!(parsed.summary.unique_labels, 2);

        let window = parsed.window.unwrap();
        assert_eq!(window.start, 3.0);
        assert_eq!(window.end, 8.0);
    }

    #[test]
    fn test_json_without_window_omits_field() {
        let file = NamedTempFile::new().unwrap();
        let context = ExportContext {
            source_file: PathBuf::from("rec.wav"),
            audio_duration_secs: 5.0,
            window: None,
        };

        let mut writer = JsonWriter::new(file.path(), &context);
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(!contents.contains("\"window\""));
    }
}
