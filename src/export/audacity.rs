//! Audacity label track writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::export::SegmentWriter;
use crate::rttm::Segment;

/// Audacity label track writer.
///
/// Rows are `start<TAB>end<TAB>label`, importable via Audacity's
/// File > Import > Labels.
pub struct AudacityWriter {
    writer: BufWriter<File>,
}

impl AudacityWriter {
    /// Create a new Audacity writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl SegmentWriter for AudacityWriter {
    fn write_header(&mut self) -> Result<()> {
        // Audacity label tracks have no header.
        Ok(())
    }

    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        writeln!(
            self.writer,
            "{:.1}\t{:.1}\t{}",
            segment.start,
            segment.end(),
            segment.label,
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_audacity_rows() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = AudacityWriter::new(file.path()).unwrap();

        writer.write_header().unwrap();
        writer
            .write_segment(&Segment {
                start: 2.0,
                duration: 3.0,
                label: "english".to_string(),
            })
            .unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "2.0\t5.0\tenglish\n");
    }

    #[test]
    fn test_audacity_no_header() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = AudacityWriter::new(file.path()).unwrap();
        writer.write_header().unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.is_empty());
    }
}
