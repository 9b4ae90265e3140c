//! Export writer trait definition.

use crate::error::Result;
use crate::rttm::Segment;

/// Trait for writing segment tables.
pub trait SegmentWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single segment.
    fn write_segment(&mut self, segment: &Segment) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
