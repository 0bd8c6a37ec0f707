//! Canvas backdrop settings and the built-in gradient presets.

use serde::{Deserialize, Serialize};

/// Luminance at or above which a backdrop takes dark foreground content.
const LIGHT_THRESHOLD: f32 = 0.7;

/// How the backdrop is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Flat `color1`.
    Solid,
    /// Linear blend from `color1` to `color2` along `direction`.
    #[default]
    Gradient,
    /// Soft multi-point blend seeded from `color1`.
    Mesh,
}

/// Gradient directions, named after the CSS `to <side>` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// Bottom to top.
    ToTop,
    /// Bottom-left to top-right.
    ToTopRight,
    /// Left to right.
    ToRight,
    /// Top-left to bottom-right.
    #[default]
    ToBottomRight,
    /// Top to bottom.
    ToBottom,
    /// Top-right to bottom-left.
    ToBottomLeft,
    /// Right to left.
    ToLeft,
    /// Bottom-right to top-left.
    ToTopLeft,
}

impl GradientDirection {
    /// CSS keyword form, e.g. `"to bottom right"`.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::ToTop => "to top",
            Self::ToTopRight => "to top right",
            Self::ToRight => "to right",
            Self::ToBottomRight => "to bottom right",
            Self::ToBottom => "to bottom",
            Self::ToBottomLeft => "to bottom left",
            Self::ToLeft => "to left",
            Self::ToTopLeft => "to top left",
        }
    }
}

/// Backdrop of the canvas.
///
/// `noise` (nominally `[0, 0.5]`) and `blur` (nominally `[0, 100]`) are
/// always present and only take effect if the renderer consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Fill mode.
    pub kind: BackgroundKind,
    /// Primary color as hex.
    pub color1: String,
    /// Secondary color as hex (gradient only).
    pub color2: String,
    /// Gradient direction (gradient only).
    pub direction: GradientDirection,
    /// Grain overlay intensity.
    pub noise: f32,
    /// Blur radius.
    pub blur: f32,
}

impl Default for Background {
    fn default() -> Self {
        GRADIENT_PRESETS[0].to_background()
    }
}

impl Background {
    /// A flat single-color backdrop.
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            kind: BackgroundKind::Solid,
            color2: color.clone(),
            color1: color,
            direction: GradientDirection::default(),
            noise: 0.0,
            blur: 0.0,
        }
    }

    /// Whether foreground content should be drawn light on this backdrop.
    ///
    /// Decided from the relative luminance of `color1`; unparsable colors
    /// count as dark. Saturated mid-tones (orange, teal) count as dark.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        parse_hex(&self.color1).map_or(true, |rgb| luminance(rgb) < LIGHT_THRESHOLD)
    }
}

/// A partial background update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundPatch {
    /// Fill mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<BackgroundKind>,
    /// Primary color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color1: Option<String>,
    /// Secondary color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color2: Option<String>,
    /// Gradient direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<GradientDirection>,
    /// Grain intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<f32>,
    /// Blur radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl BackgroundPatch {
    /// Merge this patch into `background`.
    pub fn apply(&self, background: &mut Background) {
        if let Some(kind) = self.kind {
            background.kind = kind;
        }
        if let Some(c) = &self.color1 {
            background.color1.clone_from(c);
        }
        if let Some(c) = &self.color2 {
            background.color2.clone_from(c);
        }
        if let Some(d) = self.direction {
            background.direction = d;
        }
        if let Some(n) = self.noise {
            background.noise = n;
        }
        if let Some(b) = self.blur {
            background.blur = b;
        }
    }
}

/// A named two-stop gradient offered by the theme picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    /// Display name.
    pub name: &'static str,
    /// Start color.
    pub color1: &'static str,
    /// End color.
    pub color2: &'static str,
}

/// Built-in gradients. The first entry is the default backdrop.
pub const GRADIENT_PRESETS: [GradientPreset; 6] = [
    GradientPreset {
        name: "Ocean",
        color1: "#2563eb",
        color2: "#4f46e5",
    },
    GradientPreset {
        name: "Sunset",
        color1: "#f97316",
        color2: "#eab308",
    },
    GradientPreset {
        name: "Berry",
        color1: "#ec4899",
        color2: "#ef4444",
    },
    GradientPreset {
        name: "Emerald",
        color1: "#10b981",
        color2: "#06b6d4",
    },
    GradientPreset {
        name: "Midnight",
        color1: "#0f172a",
        color2: "#581c87",
    },
    GradientPreset {
        name: "Clean",
        color1: "#f3f4f6",
        color2: "#e5e7eb",
    },
];

impl GradientPreset {
    /// Look up a preset by name, ignoring case.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        GRADIENT_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Patch that switches a background to this gradient, keeping its
    /// direction and post-processing values.
    #[must_use]
    pub fn to_patch(self) -> BackgroundPatch {
        BackgroundPatch {
            kind: Some(BackgroundKind::Gradient),
            color1: Some(self.color1.to_string()),
            color2: Some(self.color2.to_string()),
            ..BackgroundPatch::default()
        }
    }

    /// A complete background using this gradient.
    #[must_use]
    pub fn to_background(self) -> Background {
        Background {
            kind: BackgroundKind::Gradient,
            color1: self.color1.to_string(),
            color2: self.color2.to_string(),
            direction: GradientDirection::ToBottomRight,
            noise: 0.03,
            blur: 0.0,
        }
    }
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn luminance([r, g, b]: [u8; 3]) -> f32 {
    (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) / 255.0
}
