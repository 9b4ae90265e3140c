//! Configuration type definitions.

use crate::constants::{plot, viewer};
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plot display settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Viewer window settings.
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Plot display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Plot width in pixels.
    pub plot_width: u32,

    /// Plot height in pixels.
    pub plot_height: u32,

    /// Opacity of segment traces (0.0-1.0).
    pub segment_alpha: f32,

    /// Opacity of the full-audio underlay trace (0.0-1.0).
    pub underlay_alpha: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            plot_width: plot::DEFAULT_WIDTH,
            plot_height: plot::DEFAULT_HEIGHT,
            segment_alpha: plot::SEGMENT_ALPHA,
            underlay_alpha: plot::UNDERLAY_ALPHA,
        }
    }
}

impl DisplayConfig {
    /// Render options derived from these settings.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.plot_width,
            height: self.plot_height,
            segment_alpha: self.segment_alpha.clamp(0.0, 1.0),
            underlay_alpha: self.underlay_alpha.clamp(0.0, 1.0),
        }
    }
}

/// Viewer window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window width in pixels.
    pub window_width: i32,

    /// Window height in pixels.
    pub window_height: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: viewer::WINDOW_WIDTH,
            window_height: viewer::WINDOW_HEIGHT,
        }
    }
}
