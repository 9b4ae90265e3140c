//! Per-request view loading.
//!
//! A [`Session`] holds the selected file paths explicitly, and every
//! render request loads fresh data through it; nothing is shared between
//! renders.

use std::path::PathBuf;

use crate::audio::load_audio_file;
use crate::clip::{TimeWindow, clip};
use crate::error::{Error, Result};
use crate::export::ExportContext;
use crate::rttm::{Segment, parse_rttm_file, read_rttm_lines};

/// The selected input files for one viewing session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Path to the WAV audio file.
    pub audio_path: PathBuf,
    /// Path to the RTTM annotation file.
    pub rttm_path: PathBuf,
}

/// Everything needed to render and export one view.
#[derive(Debug, Clone)]
pub struct LoadedView {
    /// Samples of the displayed range.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Segments of the displayed range, times relative to its start.
    pub segments: Vec<Segment>,
    /// Offset of the displayed range on the original timeline, seconds.
    pub time_offset: f64,
    /// Total duration of the source audio in seconds.
    pub total_duration: f64,
    /// The requested window, if the view was clipped.
    pub window: Option<TimeWindow>,
    /// The originally requested end time, when it exceeded the audio and
    /// was truncated.
    pub clamped_end: Option<f64>,
    /// Path of the source audio file.
    pub source_file: PathBuf,
}

impl Session {
    /// Create a session over the two selected files.
    #[must_use]
    pub fn new(audio_path: PathBuf, rttm_path: PathBuf) -> Self {
        Self {
            audio_path,
            rttm_path,
        }
    }

    /// Load the view for an optional time window.
    ///
    /// Without a window the whole file is decoded and the annotation file
    /// parsed as-is. With a window the audio and annotations are clipped,
    /// the window end truncated to the audio duration when it runs past
    /// end-of-file (recorded in [`LoadedView::clamped_end`] so the shell
    /// can warn).
    ///
    /// # Errors
    ///
    /// Propagates decode, annotation, and clipping errors; a window start
    /// beyond the audio duration is [`Error::InvalidTimeRange`].
    pub fn load_view(&self, window: Option<TimeWindow>) -> Result<LoadedView> {
        let audio = load_audio_file(&self.audio_path)?;
        let total_duration = audio.duration_secs();

        let Some(requested) = window else {
            let segments = parse_rttm_file(&self.rttm_path, 0.0)?;
            return Ok(LoadedView {
                samples: audio.samples,
                sample_rate: audio.sample_rate,
                segments,
                time_offset: 0.0,
                total_duration,
                window: None,
                clamped_end: None,
                source_file: self.audio_path.clone(),
            });
        };

        if requested.start < 0.0 || requested.start > total_duration {
            return Err(Error::InvalidTimeRange {
                start: requested.start,
                total: total_duration,
            });
        }

        let clamped_end = (requested.end() > total_duration).then(|| requested.end());

        let lines = read_rttm_lines(&self.rttm_path)?;
        let clipped = clip(&audio, &lines, requested)?;

        Ok(LoadedView {
            samples: clipped.samples,
            sample_rate: clipped.sample_rate,
            segments: clipped.segments,
            time_offset: requested.start,
            total_duration,
            window: Some(TimeWindow::from_range(
                requested.start,
                requested.end().min(total_duration),
            )),
            clamped_end,
            source_file: self.audio_path.clone(),
        })
    }
}

impl LoadedView {
    /// Duration of the displayed range in seconds.
    #[must_use]
    pub fn display_duration_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.samples.len() as f64;
        n / f64::from(self.sample_rate)
    }

    /// Export context for the segment writers.
    #[must_use]
    pub fn export_context(&self) -> ExportContext {
        ExportContext {
            source_file: self.source_file.clone(),
            audio_duration_secs: self.display_duration_secs(),
            window: self.window,
        }
    }
}
