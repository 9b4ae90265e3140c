//! Waveform plot rendering.
//!
//! Produces a self-contained plot artifact: an RGB pixel buffer with the
//! full-audio trace in low-opacity gray, each annotated segment's sample
//! range in its label color, plus legend entries and tick positions for
//! the shell to label. Text and fonts are the shell's concern.

mod palette;
mod png;
mod raster;

pub use palette::LabelPalette;
pub use png::write_png;
pub use raster::Canvas;

use crate::constants::plot;
use crate::rttm::Segment;

/// Rendering options.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Plot width in pixels.
    pub width: u32,
    /// Plot height in pixels.
    pub height: u32,
    /// Opacity of segment traces.
    pub segment_alpha: f32,
    /// Opacity of the full-audio underlay.
    pub underlay_alpha: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: plot::DEFAULT_WIDTH,
            height: plot::DEFAULT_HEIGHT,
            segment_alpha: plot::SEGMENT_ALPHA,
            underlay_alpha: plot::UNDERLAY_ALPHA,
        }
    }
}

/// A time-axis tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTick {
    /// X pixel position of the tick.
    pub x: u32,
    /// Tick value in seconds on the original timeline.
    pub seconds: f64,
}

/// An amplitude-axis tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmpTick {
    /// Y pixel position of the tick.
    pub y: u32,
    /// Amplitude value.
    pub value: f32,
}

/// A legend entry in color-assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Segment label.
    pub label: String,
    /// Assigned color.
    pub color: [u8; 3],
}

/// A rendered waveform plot.
#[derive(Debug, Clone)]
pub struct WaveformPlot {
    /// Plot width in pixels.
    pub width: u32,
    /// Plot height in pixels.
    pub height: u32,
    /// Packed RGB8 pixel buffer, row-major.
    pub pixels: Vec<u8>,
    /// Legend entries in first-seen label order.
    pub legend: Vec<LegendEntry>,
    /// Time-axis ticks.
    pub time_ticks: Vec<TimeTick>,
    /// Amplitude-axis ticks.
    pub amp_ticks: Vec<AmpTick>,
}

/// Render samples and segments into a [`WaveformPlot`].
///
/// The full trace is drawn as a per-column min/max envelope in low-opacity
/// gray; each segment's sample range is drawn over it in its label color.
/// Segment sample ranges past the end of the buffer are clamped. Time tick
/// values are sample position converted to seconds plus `time_offset`, so
/// windowed clips display on the original timeline.
///
/// Deterministic: identical inputs produce identical pixels.
#[must_use]
pub fn render(
    samples: &[f32],
    sample_rate: u32,
    segments: &[Segment],
    time_offset: f64,
    opts: &RenderOptions,
) -> WaveformPlot {
    let width = opts.width.max(plot::MARGIN * 2 + 16) as usize;
    let height = opts.height.max(plot::MARGIN * 2 + 16) as usize;
    let margin = plot::MARGIN as usize;
    let plot_w = width - 2 * margin;
    let plot_h = height - 2 * margin;

    let mut canvas = Canvas::new(width, height, plot::BACKGROUND);
    let palette = LabelPalette::from_segments(segments);

    let n = samples.len();
    #[allow(clippy::cast_precision_loss)]
    let duration = n as f64 / f64::from(sample_rate);

    // Amplitude grid and ticks.
    let mut amp_ticks = Vec::with_capacity(plot::AMP_TICKS.len());
    for &value in &plot::AMP_TICKS {
        let y = y_for(value, margin, plot_h);
        let color = if value == 0.0 { plot::AXIS } else { plot::GRID };
        #[allow(clippy::cast_possible_wrap)]
        canvas.hline(
            margin as i64,
            (margin + plot_w - 1) as i64,
            y as i64,
            color,
            1.0,
        );
        #[allow(clippy::cast_possible_truncation)]
        amp_ticks.push(AmpTick { y: y as u32, value });
    }

    // Time grid and ticks.
    let mut time_ticks = Vec::new();
    if duration > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let step = nice_step(duration / plot::TIME_TICKS as f64);
        let mut t = (time_offset / step).ceil() * step;
        let end = time_offset + duration;
        while t <= end + step * 1e-9 {
            let frac = (t - time_offset) / duration;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let x = margin + (frac * (plot_w - 1) as f64).round() as usize;
            #[allow(clippy::cast_possible_wrap)]
            canvas.vline(
                x as i64,
                margin as i64,
                (margin + plot_h - 1) as i64,
                plot::GRID,
                1.0,
            );
            #[allow(clippy::cast_possible_truncation)]
            time_ticks.push(TimeTick {
                x: x as u32,
                seconds: t,
            });
            t += step;
        }
    }

    // Full-audio underlay envelope.
    if n > 0 {
        for col in 0..plot_w {
            let (s0, s1) = column_bounds(col, plot_w, n);
            draw_envelope_column(
                &mut canvas,
                samples,
                s0,
                s1,
                margin + col,
                margin,
                plot_h,
                plot::UNDERLAY,
                opts.underlay_alpha,
            );
        }
    }

    // Segment traces over the underlay.
    if n > 0 {
        let rate = f64::from(sample_rate);
        for segment in segments {
            let Some(color) = palette.color(&segment.label) else {
                continue;
            };

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seg_start = ((segment.start.max(0.0) * rate) as usize).min(n);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seg_end = ((segment.end().max(0.0) * rate) as usize).min(n);
            if seg_start >= seg_end {
                continue;
            }

            let col0 = seg_start * plot_w / n;
            let col1 = (seg_end * plot_w).div_ceil(n).min(plot_w);
            for col in col0..col1 {
                let (s0, s1) = column_bounds(col, plot_w, n);
                let lo = s0.max(seg_start);
                let hi = s1.min(seg_end);
                if lo >= hi {
                    continue;
                }
                draw_envelope_column(
                    &mut canvas,
                    samples,
                    lo,
                    hi,
                    margin + col,
                    margin,
                    plot_h,
                    color,
                    opts.segment_alpha,
                );
            }
        }
    }

    let legend = palette
        .entries()
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            color: *color,
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    let (width, height) = (width as u32, height as u32);
    WaveformPlot {
        width,
        height,
        pixels: canvas.into_pixels(),
        legend,
        time_ticks,
        amp_ticks,
    }
}

/// Sample range `[s0, s1)` covered by a plot column.
fn column_bounds(col: usize, plot_w: usize, n: usize) -> (usize, usize) {
    let s0 = col * n / plot_w;
    let s1 = ((col + 1) * n / plot_w).max(s0 + 1).min(n);
    (s0, s1.max(s0))
}

/// Draw the min/max envelope of `samples[s0..s1]` at column `x`.
#[allow(clippy::too_many_arguments)]
fn draw_envelope_column(
    canvas: &mut Canvas,
    samples: &[f32],
    s0: usize,
    s1: usize,
    x: usize,
    margin: usize,
    plot_h: usize,
    color: [u8; 3],
    alpha: f32,
) {
    if s0 >= s1 || s0 >= samples.len() {
        return;
    }
    let s1 = s1.min(samples.len());

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &s in &samples[s0..s1] {
        lo = lo.min(s);
        hi = hi.max(s);
    }

    let y_hi = y_for(hi, margin, plot_h);
    let y_lo = y_for(lo, margin, plot_h);
    #[allow(clippy::cast_possible_wrap)]
    canvas.vline(x as i64, y_hi as i64, y_lo as i64, color, alpha);
}

/// Y pixel for an amplitude value; +1.0 maps to the top of the trace area.
fn y_for(amp: f32, margin: usize, plot_h: usize) -> usize {
    let clamped = amp.clamp(-1.0, 1.0);
    let frac = f64::from(1.0 - clamped) / 2.0;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let offset = (frac * (plot_h - 1) as f64).round() as usize;
    margin + offset
}

/// Round `raw` up to a 1/2/5 x 10^k step.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}
