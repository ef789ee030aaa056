//! Viewport configuration
//!
//! Every option has a default, so a config file only lists what it changes:
//!
//! ```toml
//! padding = 12.0
//! border_thickness = 0.0
//! scrollbar_color = 0x44aa88
//! ```

use serde::Deserialize;
use vista_core::Color;

use crate::error::Result;

/// Appearance and behavior options for a [`Viewport`](crate::Viewport)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background fill as `0xRRGGBB`
    pub background_color: u32,
    pub background_alpha: f32,
    /// Border stroke as `0xRRGGBB`
    pub border_color: u32,
    /// Border stroke width; 0 disables the border
    pub border_thickness: f32,
    /// Inset between the viewport edge and the content on every side
    pub padding: f32,
    pub scrollbar_width: f32,
    pub scrollbar_color: u32,
    pub scrollbar_alpha: f32,
    /// Minimum scrollbar handle length in pixels
    pub min_handle_size: f32,
    /// Clip content to the padded viewport area
    pub mask_enabled: bool,
    /// Ease programmatic scrolls instead of jumping
    pub smooth_scroll: bool,
    pub smooth_duration_ms: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: 0x1a1a2e,
            background_alpha: 0.85,
            border_color: 0xffffff,
            border_thickness: 2.0,
            padding: 10.0,
            scrollbar_width: 6.0,
            scrollbar_color: 0x888888,
            scrollbar_alpha: 0.8,
            min_handle_size: 20.0,
            mask_enabled: true,
            smooth_scroll: true,
            smooth_duration_ms: 120,
        }
    }
}

impl ViewportConfig {
    /// Parse a config from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Config with no border, mask or smoothing
    pub fn plain() -> Self {
        Self {
            border_thickness: 0.0,
            mask_enabled: false,
            smooth_scroll: false,
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, color: u32, thickness: f32) -> Self {
        self.border_color = color;
        self.border_thickness = thickness;
        self
    }

    pub fn without_border(mut self) -> Self {
        self.border_thickness = 0.0;
        self
    }

    pub fn with_background(mut self, color: u32, alpha: f32) -> Self {
        self.background_color = color;
        self.background_alpha = alpha;
        self
    }

    pub fn with_scrollbar(mut self, width: f32, color: u32, alpha: f32) -> Self {
        self.scrollbar_width = width;
        self.scrollbar_color = color;
        self.scrollbar_alpha = alpha;
        self
    }

    pub fn with_mask(mut self, enabled: bool) -> Self {
        self.mask_enabled = enabled;
        self
    }

    pub fn with_smooth_scroll(mut self, enabled: bool) -> Self {
        self.smooth_scroll = enabled;
        self
    }

    /// Padding, never negative
    pub fn effective_padding(&self) -> f32 {
        self.padding.max(0.0)
    }

    pub fn background(&self) -> Color {
        Color::from_hex(self.background_color).with_alpha(self.background_alpha)
    }

    /// Border stroke, if enabled
    pub fn border(&self) -> Option<(f32, Color)> {
        (self.border_thickness > 0.0)
            .then(|| (self.border_thickness, Color::from_hex(self.border_color)))
    }

    pub fn scrollbar_fill(&self) -> Color {
        Color::from_hex(self.scrollbar_color).with_alpha(self.scrollbar_alpha)
    }

    /// Track fill, a fainter version of the handle color
    pub fn scrollbar_track_fill(&self) -> Color {
        Color::from_hex(self.scrollbar_color).with_alpha(self.scrollbar_alpha * 0.3)
    }

    /// Smoothing duration in seconds
    pub fn smooth_duration(&self) -> f32 {
        self.smooth_duration_ms as f32 / 1000.0
    }
}
