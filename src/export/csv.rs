//! CSV segment table writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::export::{ExportContext, SegmentWriter};
use crate::rttm::Segment;

/// CSV format segment writer.
pub struct CsvWriter {
    writer: BufWriter<File>,
    source_file: String,
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path, context: &ExportContext) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            source_file: context.source_file.display().to_string(),
        })
    }
}

impl SegmentWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "Start (s),End (s),Label,File")?;
        Ok(())
    }

    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        writeln!(
            self.writer,
            "{:.1},{:.1},{},{}",
            segment.start,
            segment.end(),
            escape_csv(&segment.label),
            escape_csv(&self.source_file),
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn context() -> ExportContext {
        ExportContext {
            source_file: PathBuf::from("/audio/meeting.wav"),
            audio_duration_secs: 10.0,
            window: None,
        }
    }

    fn seg(start: f64, duration: f64, label: &str) -> Segment {
        Segment {
            start,
            duration,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(file.path(), &context()).unwrap();

        writer.write_header().unwrap();
        writer.write_segment(&seg(2.0, 3.0, "A")).unwrap();
        writer.write_segment(&seg(5.5, 1.0, "B")).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "Start (s),End (s),Label,File");
        assert_eq!(lines.next().unwrap(), "2.0,5.0,A,/audio/meeting.wav");
        assert_eq!(lines.next().unwrap(), "5.5,6.5,B,/audio/meeting.wav");
    }

    #[test]
    fn test_csv_escapes_label_with_comma() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(file.path(), &context()).unwrap();

        writer.write_header().unwrap();
        writer.write_segment(&seg(0.0, 1.0, "english, us")).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("\"english, us\""));
    }

    #[test]
    fn test_escape_csv_quotes() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a\"b"), "\"a\"\"b\"");
    }
}
