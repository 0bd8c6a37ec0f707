//! Editor session configuration.
//!
//! Every field has a default, so a config file only needs to name the
//! values it changes:
//!
//! ```json
//! { "history_depth": 100, "default_template": "bold" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CardError, CardResult, DEFAULT_HEIGHT, DEFAULT_HISTORY_DEPTH, DEFAULT_WIDTH};

/// Default position delta applied to cloned elements.
pub const DEFAULT_CLONE_OFFSET: f32 = 20.0;

/// Default export pixel ratio.
pub const DEFAULT_PIXEL_RATIO: u32 = 4;

/// Configuration for an [`Editor`](crate::Editor) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo snapshots retained (`0` = unbounded).
    pub history_depth: usize,
    /// Canvas width used before any template sets one.
    pub canvas_width: u32,
    /// Canvas height used before any template sets one.
    pub canvas_height: u32,
    /// Offset applied on both axes when cloning an element.
    pub clone_offset: f32,
    /// Template applied when the session starts.
    pub default_template: String,
    /// Pixel ratio requested from the exporter.
    pub export_pixel_ratio: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            clone_offset: DEFAULT_CLONE_OFFSET,
            default_template: "modern".to_string(),
            export_pixel_ratio: DEFAULT_PIXEL_RATIO,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Serialization`] for malformed JSON and
    /// [`CardError::Config`] for out-of-range values.
    pub fn from_json(json: &str) -> CardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Io`] if the file can't be read, otherwise the
    /// same errors as [`EditorConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading editor config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Config`] describing the first invalid field.
    pub fn validate(&self) -> CardResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CardError::Config(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.export_pixel_ratio == 0 {
            return Err(CardError::Config(
                "export_pixel_ratio must be at least 1".to_string(),
            ));
        }
        if !self.clone_offset.is_finite() {
            return Err(CardError::Config("clone_offset must be finite".to_string()));
        }
        if self.default_template.is_empty() {
            return Err(CardError::Config(
                "default_template must name a template".to_string(),
            ));
        }
        Ok(())
    }
}
