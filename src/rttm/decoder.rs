//! Shared RTTM line decoder.
//!
//! Both the whole-file parser and the window clipper decode lines through
//! this single function, so field layout and failure behavior stay in one
//! place.

use crate::constants::rttm::{FIELD_DURATION, FIELD_LABEL, FIELD_START, MIN_FIELDS};

/// A labeled time interval within an audio recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start time in seconds from the beginning of the timeline.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Opaque speaker/language label.
    pub label: String,
}

impl Segment {
    /// End time in seconds (`start + duration`).
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Decode one RTTM line into a [`Segment`].
///
/// Splits on whitespace and extracts the start time, duration, and label
/// fields by position. The caller is responsible for skipping empty lines
/// and for attaching line-number context to the error message.
///
/// # Errors
///
/// Returns a description of the failure if the line has fewer than the
/// required number of fields or the start/duration fields are not numeric.
pub fn decode_line(line: &str) -> Result<Segment, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} fields, found {}",
            fields.len()
        ));
    }

    let start: f64 = fields[FIELD_START]
        .parse()
        .map_err(|_| format!("invalid start time '{}'", fields[FIELD_START]))?;

    let duration: f64 = fields[FIELD_DURATION]
        .parse()
        .map_err(|_| format!("invalid duration '{}'", fields[FIELD_DURATION]))?;

    Ok(Segment {
        start,
        duration,
        label: fields[FIELD_LABEL].to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_line() {
        let segment =
            decode_line("SPEAKER file 1 2.0 3.0 <NA> <NA> A <NA> <NA>").unwrap();
        assert_eq!(segment.start, 2.0);
        assert_eq!(segment.duration, 3.0);
        assert_eq!(segment.label, "A");
    }

    #[test]
    fn test_decode_exactly_eight_fields() {
        let segment = decode_line("SPEAKER file 1 0.5 1.5 <NA> <NA> spk0").unwrap();
        assert_eq!(segment.start, 0.5);
        assert_eq!(segment.label, "spk0");
    }

    #[test]
    fn test_decode_too_few_fields() {
        let err = decode_line("SPEAKER file 1 2.0").unwrap_err();
        assert!(err.contains("found 4"));
    }

    #[test]
    fn test_decode_non_numeric_start() {
        let err = decode_line("SPEAKER file 1 abc 3.0 <NA> <NA> A").unwrap_err();
        assert!(err.contains("invalid start time 'abc'"));
    }

    #[test]
    fn test_decode_non_numeric_duration() {
        let err = decode_line("SPEAKER file 1 2.0 xyz <NA> <NA> A").unwrap_err();
        assert!(err.contains("invalid duration 'xyz'"));
    }

    #[test]
    fn test_decode_collapses_repeated_whitespace() {
        let segment = decode_line("SPEAKER  file\t1   2.0  3.0 <NA> <NA> A").unwrap();
        assert_eq!(segment.start, 2.0);
        assert_eq!(segment.duration, 3.0);
    }

    #[test]
    fn test_segment_end() {
        let segment = Segment {
            start: 1.5,
            duration: 2.5,
            label: "B".to_string(),
        };
        assert_eq!(segment.end(), 4.0);
    }
}
