//! Canvas elements - the placeable objects of a card design.
//!
//! Every element shares a common base (id, position, [`Style`]) and carries a
//! kind-specific [`ElementBody`]. Fields that only make sense for some kinds
//! (size, border radius, icon glyph) live inside the body variant that uses
//! them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph advance as a fraction of the font size, used to estimate
/// the footprint of auto-sized text.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its hyphenated string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of element kinds. Fixed when an element is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Auto-sized text.
    Text,
    /// Raster or vector image referenced by URI.
    Image,
    /// QR code encoding a payload string.
    QrCode,
    /// Rectangle, optionally with rounded corners.
    Box,
    /// Ellipse inscribed in its size box.
    Circle,
    /// Glyph from the fixed [`IconKind`] set.
    Icon,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Image,
        Self::QrCode,
        Self::Box,
        Self::Circle,
        Self::Icon,
    ];

    /// Whether elements of this kind carry an explicit size.
    #[must_use]
    pub const fn has_size(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Icon glyphs available to icon elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Telephone handset.
    #[default]
    Phone,
    /// Envelope.
    Mail,
    /// Globe (website).
    Globe,
    /// Map pin (address).
    MapPin,
    /// Briefcase (company).
    Briefcase,
    /// Sparkles; stands in for a missing logo.
    Sparkles,
}

/// Top-left offset in canvas pixel space. Not bounded by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left edge.
    pub x: f32,
    /// Pixels from the top edge.
    pub y: f32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset this position by a delta.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Presentation attributes shared by every element kind.
///
/// Values are not validated; renderers clamp at paint time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Font size in pixels.
    pub font_size: f32,
    /// CSS-style numeric weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Foreground or fill color as hex.
    pub color: String,
    /// Font family name.
    pub font_family: String,
    /// Opacity, nominally in `[0, 1]`.
    pub opacity: f32,
    /// Extra tracking between glyphs in pixels.
    pub letter_spacing: f32,
    /// Rotation in degrees, nominally in `[-180, 180]`.
    pub rotation: f32,
    /// Paint order key. Higher paints on top; ties keep insertion order.
    pub z_index: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: 400,
            color: "#111827".to_string(),
            font_family: "Inter".to_string(),
            opacity: 1.0,
            letter_spacing: 0.0,
            rotation: 0.0,
            z_index: 0,
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementBody {
    /// Literal text; sized by its content and font.
    Text {
        /// Text content.
        content: String,
    },
    /// An image.
    Image {
        /// Image source URI or `data:` URI.
        src: String,
        /// Display size.
        size: Size,
    },
    /// A QR code.
    QrCode {
        /// Encoded payload string.
        payload: String,
        /// Display size.
        size: Size,
    },
    /// A rectangle.
    Box {
        /// Box size.
        size: Size,
        /// Corner radius in pixels.
        border_radius: f32,
    },
    /// An ellipse.
    Circle {
        /// Bounding size.
        size: Size,
    },
    /// An icon glyph.
    Icon {
        /// Which glyph.
        icon: IconKind,
        /// Display size.
        size: Size,
    },
}

impl ElementBody {
    /// Default body for a kind.
    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text {
                content: "Your text".to_string(),
            },
            ElementKind::Image => Self::Image {
                src: String::new(),
                size: Size::new(120.0, 120.0),
            },
            ElementKind::QrCode => Self::QrCode {
                payload: "https://example.com".to_string(),
                size: Size::new(100.0, 100.0),
            },
            ElementKind::Box => Self::Box {
                size: Size::new(120.0, 80.0),
                border_radius: 0.0,
            },
            ElementKind::Circle => Self::Circle {
                size: Size::new(100.0, 100.0),
            },
            ElementKind::Icon => Self::Icon {
                icon: IconKind::default(),
                size: Size::new(24.0, 24.0),
            },
        }
    }

    /// The kind tag of this body.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::QrCode { .. } => ElementKind::QrCode,
            Self::Box { .. } => ElementKind::Box,
            Self::Circle { .. } => ElementKind::Circle,
            Self::Icon { .. } => ElementKind::Icon,
        }
    }

    /// Text content, image source or QR payload. `None` for shapes and icons.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Image { src, .. } => Some(src),
            Self::QrCode { payload, .. } => Some(payload),
            Self::Box { .. } | Self::Circle { .. } | Self::Icon { .. } => None,
        }
    }

    /// Explicit size. `None` for text.
    #[must_use]
    pub const fn size(&self) -> Option<Size> {
        match self {
            Self::Text { .. } => None,
            Self::Image { size, .. }
            | Self::QrCode { size, .. }
            | Self::Box { size, .. }
            | Self::Circle { size }
            | Self::Icon { size, .. } => Some(*size),
        }
    }

    fn size_mut(&mut self) -> Option<&mut Size> {
        match self {
            Self::Text { .. } => None,
            Self::Image { size, .. }
            | Self::QrCode { size, .. }
            | Self::Box { size, .. }
            | Self::Circle { size }
            | Self::Icon { size, .. } => Some(size),
        }
    }

    fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text { content } => Some(content),
            Self::Image { src, .. } => Some(src),
            Self::QrCode { payload, .. } => Some(payload),
            Self::Box { .. } | Self::Circle { .. } | Self::Icon { .. } => None,
        }
    }
}

/// A canvas element: common base plus a kind-specific body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, immutable after creation.
    pub id: ElementId,
    /// Kind-specific payload.
    pub body: ElementBody,
    /// Top-left position.
    pub position: Position,
    /// Presentation attributes.
    pub style: Style,
}

impl Element {
    /// Create a new element of `kind` with default content, position and style.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        let mut style = Style::default();
        if matches!(kind, ElementKind::Box | ElementKind::Circle) {
            style.color = "#3b82f6".to_string();
        }
        Self {
            id: ElementId::new(),
            body: ElementBody::default_for(kind),
            position: Position::new(40.0, 40.0),
            style,
        }
    }

    /// Create a new element of `kind` and merge `overrides` into it.
    #[must_use]
    pub fn create(kind: ElementKind, overrides: &ElementPatch) -> Self {
        let mut element = Self::new(kind);
        overrides.apply(&mut element);
        element
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.style.z_index = z_index;
        self
    }

    /// The kind tag.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    /// Explicit size. `None` for text.
    #[must_use]
    pub const fn size(&self) -> Option<Size> {
        self.body.size()
    }

    /// Text content, image source or QR payload.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.body.content()
    }

    /// Icon glyph for icon elements.
    #[must_use]
    pub const fn icon(&self) -> Option<IconKind> {
        match self.body {
            ElementBody::Icon { icon, .. } => Some(icon),
            _ => None,
        }
    }

    /// Corner radius for box elements.
    #[must_use]
    pub const fn border_radius(&self) -> Option<f32> {
        match self.body {
            ElementBody::Box { border_radius, .. } => Some(border_radius),
            _ => None,
        }
    }

    /// Copy this element under a fresh id, shifted by `offset` on both axes.
    #[must_use]
    pub fn duplicate(&self, offset: f32) -> Self {
        Self {
            id: ElementId::new(),
            body: self.body.clone(),
            position: self.position.offset(offset, offset),
            style: self.style.clone(),
        }
    }

    /// Footprint used for hit testing.
    ///
    /// Text has no stored size, so its box is estimated from the character
    /// count and font metrics.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.size().unwrap_or_else(|| {
            let content = self.content().unwrap_or_default();
            estimate_text_size(content, self.style.font_size, self.style.letter_spacing)
        })
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let b = self.bounds();
        let p = self.position;
        x >= p.x && x <= p.x + b.width && y >= p.y && y <= p.y + b.height
    }
}

/// Estimate the rendered size of a single line of text.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_text_size(content: &str, font_size: f32, letter_spacing: f32) -> Size {
    let chars = content.chars().count() as f32;
    Size::new(
        chars * (font_size * GLYPH_WIDTH_RATIO + letter_spacing),
        font_size * LINE_HEIGHT_RATIO,
    )
}

/// A partial element update. `None` fields are left untouched.
///
/// Fields that have no meaning for the target's kind are ignored, and `id`
/// and kind can never be changed through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    /// Text content, image source or QR payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Icon glyph (icon elements only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKind>,
    /// Absolute position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Size (ignored for text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Font weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// Color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Letter spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// Corner radius (box elements only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    /// Paint order key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl ElementPatch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the icon glyph.
    #[must_use]
    pub fn with_icon(mut self, icon: IconKind) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Set the font weight.
    #[must_use]
    pub fn with_font_weight(mut self, font_weight: u16) -> Self {
        self.font_weight = Some(font_weight);
        self
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the font family.
    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the letter spacing.
    #[must_use]
    pub fn with_letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = Some(letter_spacing);
        self
    }

    /// Set the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_border_radius(mut self, border_radius: f32) -> Self {
        self.border_radius = Some(border_radius);
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Whether the patch sets no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `element`.
    pub fn apply(&self, element: &mut Element) {
        if let Some(content) = &self.content {
            if let Some(slot) = element.body.content_mut() {
                slot.clone_from(content);
            }
        }
        if let (Some(new_icon), ElementBody::Icon { icon, .. }) = (self.icon, &mut element.body) {
            *icon = new_icon;
        }
        if let Some(size) = self.size {
            if let Some(slot) = element.body.size_mut() {
                *slot = size;
            }
        }
        if let (Some(radius), ElementBody::Box { border_radius, .. }) =
            (self.border_radius, &mut element.body)
        {
            *border_radius = radius;
        }
        if let Some(position) = self.position {
            element.position = position;
        }

        let style = &mut element.style;
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.font_weight {
            style.font_weight = v;
        }
        if let Some(v) = &self.color {
            style.color.clone_from(v);
        }
        if let Some(v) = &self.font_family {
            style.font_family.clone_from(v);
        }
        if let Some(v) = self.opacity {
            style.opacity = v;
        }
        if let Some(v) = self.letter_spacing {
            style.letter_spacing = v;
        }
        if let Some(v) = self.rotation {
            style.rotation = v;
        }
        if let Some(v) = self.z_index {
            style.z_index = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_has_no_size() {
        let text = Element::new(ElementKind::Text);
        assert_eq!(text.kind(), ElementKind::Text);
        assert!(text.size().is_none());
        assert!(!ElementKind::Text.has_size());
    }

    #[test]
    fn test_sized_kinds_default_to_non_zero_size() {
        for kind in ElementKind::ALL.into_iter().filter(|k| k.has_size()) {
            let size = Element::new(kind).size().expect("sized kind");
            assert!(size.width > 0.0 && size.height > 0.0, "{kind:?}");
        }
    }

    #[test]
    fn test_create_merges_overrides() {
        let patch = ElementPatch::new()
            .with_content("Hi")
            .with_font_size(40.0)
            .with_position(10.0, 20.0);
        let element = Element::create(ElementKind::Text, &patch);

        assert_eq!(element.content(), Some("Hi"));
        assert!((element.style.font_size - 40.0).abs() < f32::EPSILON);
        assert_eq!(element.position, Position::new(10.0, 20.0));
    }

    #[test]
    fn test_patch_ignores_fields_meaningless_for_kind() {
        let mut text = Element::new(ElementKind::Text);
        ElementPatch::new()
            .with_size(300.0, 300.0)
            .with_border_radius(8.0)
            .with_icon(IconKind::Globe)
            .apply(&mut text);
        assert!(text.size().is_none());
        assert!(text.border_radius().is_none());
        assert!(text.icon().is_none());

        let mut circle = Element::new(ElementKind::Circle);
        ElementPatch::new().with_content("nope").apply(&mut circle);
        assert!(circle.content().is_none());
    }

    #[test]
    fn test_patch_accepts_nonsensical_values() {
        let mut element = Element::new(ElementKind::Box);
        ElementPatch::new()
            .with_opacity(-1.0)
            .with_size(0.0, 0.0)
            .apply(&mut element);
        assert!((element.style.opacity + 1.0).abs() < f32::EPSILON);
        assert_eq!(element.size(), Some(Size::new(0.0, 0.0)));
    }

    #[test]
    fn test_patch_sets_font_family_on_any_kind() {
        let patch = ElementPatch::new().with_font_family("Georgia");
        assert_eq!(patch.font_family.as_deref(), Some("Georgia"));

        for kind in [ElementKind::Text, ElementKind::Box] {
            let mut element = Element::new(kind);
            patch.apply(&mut element);
            assert_eq!(element.style.font_family, "Georgia");
        }
    }

    #[test]
    fn test_patch_updates_icon_and_radius() {
        let mut icon = Element::new(ElementKind::Icon);
        ElementPatch::new().with_icon(IconKind::MapPin).apply(&mut icon);
        assert_eq!(icon.icon(), Some(IconKind::MapPin));

        let mut rect = Element::new(ElementKind::Box);
        ElementPatch::new().with_border_radius(12.0).apply(&mut rect);
        assert_eq!(rect.border_radius(), Some(12.0));
    }

    #[test]
    fn test_duplicate_copies_everything_but_id() {
        let original = Element::create(
            ElementKind::Icon,
            &ElementPatch::new()
                .with_icon(IconKind::Mail)
                .with_color("#ff0000")
                .with_position(5.0, 5.0),
        );
        let copy = original.duplicate(20.0);

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.body, original.body);
        assert_eq!(copy.style, original.style);
        assert_eq!(copy.position, Position::new(25.0, 25.0));
    }

    #[test]
    fn test_contains_point_uses_estimated_text_box() {
        let text = Element::create(
            ElementKind::Text,
            &ElementPatch::new()
                .with_content("Hello")
                .with_font_size(20.0)
                .with_position(0.0, 0.0),
        );
        // 5 chars * 12px wide, 24px tall
        assert!(text.contains_point(59.0, 23.0));
        assert!(!text.contains_point(61.0, 10.0));
    }

    #[test]
    fn test_element_id_parse() {
        let id = ElementId::new();
        assert_eq!(ElementId::parse(&id.to_string()), Some(id));
        assert_eq!(ElementId::parse("not-a-uuid"), None);
    }

    #[test]
    fn test_body_serializes_with_type_tag() {
        let element = Element::create(
            ElementKind::QrCode,
            &ElementPatch::new().with_content("tel:123"),
        );
        let json = serde_json::to_value(&element).expect("serialize");
        assert_eq!(json["body"]["type"], "qr_code");
        assert_eq!(json["body"]["payload"], "tel:123");
    }
}
