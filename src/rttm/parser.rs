//! Whole-file RTTM parsing.

use std::path::Path;

use crate::error::{Error, Result};
use crate::rttm::decoder::{Segment, decode_line};

/// Parse an RTTM file into segments.
///
/// `offset` (seconds) is added to every parsed start time. This is used
/// when segments were annotated relative to a sub-clip but need to be
/// expressed on the original recording's timeline.
///
/// Empty lines are skipped; every other line must decode. The parse aborts
/// on the first malformed record, carrying its 1-based line number.
///
/// # Errors
///
/// Returns [`Error::AnnotationRead`] if the file cannot be read and
/// [`Error::MalformedRecord`] for the first undecodable line.
pub fn parse_rttm_file(path: &Path, offset: f64) -> Result<Vec<Segment>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::AnnotationRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut segments = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut segment = decode_line(line).map_err(|message| Error::MalformedRecord {
            line: idx + 1,
            message,
        })?;
        segment.start += offset;
        segments.push(segment);
    }

    Ok(segments)
}

/// Read the raw lines of an RTTM file.
///
/// The window-clipping path decodes lines itself against the requested
/// window, so the file is read once up front and the lines handed over.
///
/// # Errors
///
/// Returns [`Error::AnnotationRead`] if the file cannot be read.
pub fn read_rttm_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::AnnotationRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(contents.lines().map(str::to_string).collect())
}
