//! What the exporter needs to know to snapshot the canvas.
//!
//! Rasterising and saving happen outside the core; this only names the
//! artifact and sizes it.

use serde::{Deserialize, Serialize};

use crate::CanvasState;

/// Parameters handed to the external exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Suggested file name, e.g. `business-card-Alex-Morgan.png`.
    pub file_name: String,
    /// Canvas width in CSS pixels.
    pub width: u32,
    /// Canvas height in CSS pixels.
    pub height: u32,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: u32,
}

impl ExportRequest {
    /// Describe an export of `state`, naming the file after `name`.
    #[must_use]
    pub fn for_state(state: &CanvasState, name: Option<&str>, pixel_ratio: u32) -> Self {
        Self {
            file_name: export_file_name(name),
            width: state.width(),
            height: state.height(),
            pixel_ratio,
        }
    }

    /// Output width in device pixels.
    #[must_use]
    pub const fn output_width(&self) -> u32 {
        self.width.saturating_mul(self.pixel_ratio)
    }

    /// Output height in device pixels.
    #[must_use]
    pub const fn output_height(&self) -> u32 {
        self.height.saturating_mul(self.pixel_ratio)
    }
}

/// `business-card-<name>.png`, with whitespace runs in `name` collapsed to
/// `-`. Falls back to `design` when no usable name is given.
#[must_use]
pub fn export_file_name(name: Option<&str>) -> String {
    let slug = name
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join("-"))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "design".to_string());
    format!("business-card-{slug}.png")
}
