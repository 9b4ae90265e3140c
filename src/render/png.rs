//! PNG encoding of plot artifacts.

use std::path::Path;

use crate::error::{Error, Result};
use crate::render::WaveformPlot;

/// Write a plot to a PNG file.
///
/// # Errors
///
/// Returns [`Error::PlotEncode`] if the image cannot be encoded or
/// written.
pub fn write_png(path: &Path, plot: &WaveformPlot) -> Result<()> {
    image::save_buffer(
        path,
        &plot.pixels,
        plot.width,
        plot.height,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| Error::PlotEncode {
        path: path.to_path_buf(),
        source: e,
    })
}
