//! Predefined designs that replace the whole canvas when applied.
//!
//! The built-in registry holds the three business-card layouts (`modern`,
//! `minimal`, `bold`) filled with sample contact details, a `flashcard`
//! and a `blank` canvas. [`TemplateRegistry::with_details`] builds the same
//! set around caller-supplied [`CardDetails`], including an optional logo
//! and the frosted-glass overlay.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::element::estimate_text_size;
use crate::{
    Background, Element, ElementKind, ElementPatch, GradientPreset, IconKind, ImagePayload,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

/// Inner margin of the card layouts.
const PADDING: f32 = 40.0;

/// Diameter of the glass highlight circles.
const GLOW_SIZE: f32 = 256.0;

/// How far the highlight circles hang past the card edge.
const GLOW_BLEED: f32 = 96.0;

/// Grouping shown in the template picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// Contact cards.
    BusinessCard,
    /// Study cards.
    Flashcard,
    /// Empty starting points.
    Blank,
}

/// Canvas dimensions carried by a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The document part of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasFragment {
    /// Elements, in insertion order.
    pub elements: Vec<Element>,
    /// Backdrop.
    pub background: Background,
    /// Canvas size; `None` keeps the live canvas size.
    pub dimensions: Option<Dimensions>,
}

/// A named, predefined design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Registry key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Picker grouping.
    pub category: TemplateCategory,
    /// Document replacing the live canvas.
    pub fragment: CanvasFragment,
}

/// Contact details poured into the business-card layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    /// Full name; the bold layout splits it on the first space.
    pub full_name: String,
    /// Job title.
    pub job_title: String,
    /// Company name.
    pub company: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Website.
    pub website: String,
    /// Postal address.
    pub address: String,
    /// Logo image source, usually a `data:` URI. `None` shows no logo.
    pub logo: Option<String>,
    /// Lay a translucent sheet and two soft highlight circles over the
    /// backdrop.
    pub glass: bool,
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            full_name: "Alex Morgan".to_string(),
            job_title: "Full Stack Engineer".to_string(),
            company: "Future Systems Inc.".to_string(),
            email: "alex@example.com".to_string(),
            phone: "+1 234 567 890".to_string(),
            website: "www.example.com".to_string(),
            address: "Nairobi, Kenya".to_string(),
            logo: None,
            glass: true,
        }
    }
}

impl CardDetails {
    /// Use an uploaded image as the logo.
    #[must_use]
    pub fn with_logo(mut self, logo: &ImagePayload) -> Self {
        self.logo = Some(logo.data_uri.clone());
        self
    }

    /// Remove the logo.
    #[must_use]
    pub fn without_logo(mut self) -> Self {
        self.logo = None;
        self
    }

    /// Toggle the glass overlay.
    #[must_use]
    pub fn with_glass(mut self, glass: bool) -> Self {
        self.glass = glass;
        self
    }
}

/// Read-only lookup of templates by id, in picker order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// The built-in registry with sample contact details.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<TemplateRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::with_details(&CardDetails::default()))
    }

    /// Build the standard template set around `details`.
    #[must_use]
    pub fn with_details(details: &CardDetails) -> Self {
        Self {
            templates: vec![
                modern(details),
                minimal(details),
                bold(details),
                flashcard(),
                blank(),
            ],
        }
    }

    /// Get a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates in picker order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Templates in one category.
    pub fn by_category(&self, category: TemplateCategory) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Accumulates template elements with ascending z-indexes.
struct Layout {
    elements: Vec<Element>,
    ink: String,
}

impl Layout {
    /// Start a business-card layout, with the glass overlay at the bottom
    /// of the stack when enabled.
    #[allow(clippy::cast_precision_loss)]
    fn card(background: &Background, d: &CardDetails) -> Self {
        let mut layout = Self::new(background);
        if d.glass {
            let (width, height) = (DEFAULT_WIDTH as f32, DEFAULT_HEIGHT as f32);
            layout
                .push(
                    ElementKind::Box,
                    ElementPatch::new()
                        .with_position(0.0, 0.0)
                        .with_size(width, height)
                        .with_color("#ffffff")
                        .with_opacity(0.1),
                )
                .push(
                    ElementKind::Circle,
                    ElementPatch::new()
                        .with_position(width - GLOW_SIZE + GLOW_BLEED, -GLOW_BLEED)
                        .with_size(GLOW_SIZE, GLOW_SIZE)
                        .with_color("#ffffff")
                        .with_opacity(0.2),
                )
                .push(
                    ElementKind::Circle,
                    ElementPatch::new()
                        .with_position(-GLOW_BLEED, height - GLOW_SIZE + GLOW_BLEED)
                        .with_size(GLOW_SIZE, GLOW_SIZE)
                        .with_color("#000000")
                        .with_opacity(0.1),
                );
        }
        layout
    }

    fn new(background: &Background) -> Self {
        let ink = if background.is_dark() {
            "#ffffff"
        } else {
            "#0f172a"
        };
        Self {
            elements: Vec::new(),
            ink: ink.to_string(),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn push(&mut self, kind: ElementKind, patch: ElementPatch) -> &mut Self {
        let z = self.elements.len() as i32;
        let patch = ElementPatch {
            color: patch.color.clone().or_else(|| Some(self.ink.clone())),
            ..patch
        };
        self.elements
            .push(Element::create(kind, &patch).with_z_index(z));
        self
    }

    fn text(&mut self, x: f32, y: f32, content: &str, font_size: f32, weight: u16) -> &mut Self {
        self.push(
            ElementKind::Text,
            ElementPatch::new()
                .with_content(content)
                .with_position(x, y)
                .with_font_size(font_size)
                .with_font_weight(weight),
        )
    }

    fn icon(&mut self, x: f32, y: f32, icon: IconKind) -> &mut Self {
        self.push(
            ElementKind::Icon,
            ElementPatch::new()
                .with_icon(icon)
                .with_position(x, y)
                .with_size(16.0, 16.0)
                .with_opacity(0.7),
        )
    }

    fn image(&mut self, x: f32, y: f32, width: f32, height: f32, src: &str) -> &mut Self {
        self.push(
            ElementKind::Image,
            ElementPatch::new()
                .with_content(src)
                .with_position(x, y)
                .with_size(width, height),
        )
    }

    /// Restyle the most recently pushed element.
    fn style(&mut self, patch: &ElementPatch) -> &mut Self {
        if let Some(last) = self.elements.last_mut() {
            patch.apply(last);
        }
        self
    }

    fn finish(self) -> Vec<Element> {
        self.elements
    }
}

#[allow(clippy::cast_precision_loss)]
fn centered_x(content: &str, font_size: f32, letter_spacing: f32) -> f32 {
    let width = estimate_text_size(content, font_size, letter_spacing).width;
    ((DEFAULT_WIDTH as f32 - width) / 2.0).max(0.0)
}

fn card_template(id: &str, name: &str, background: Background, elements: Vec<Element>) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        category: TemplateCategory::BusinessCard,
        fragment: CanvasFragment {
            elements,
            background,
            dimensions: Some(Dimensions {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
            }),
        },
    }
}

fn preset_background(name: &str) -> Background {
    GradientPreset::find(name).map_or_else(Background::default, GradientPreset::to_background)
}

/// Name and title top-left (below the logo, if any), contact grid along the
/// bottom edge. Without a logo a sparkles glyph sits top-right.
#[allow(clippy::cast_precision_loss)]
fn modern(d: &CardDetails) -> Template {
    let background = preset_background("Ocean");
    let mut layout = Layout::card(&background, d);
    let right = DEFAULT_WIDTH as f32 - PADDING;

    let name_y = if let Some(logo) = &d.logo {
        layout.image(PADDING, PADDING, 96.0, 48.0, logo);
        PADDING + 72.0
    } else {
        layout
            .icon(right - 48.0, PADDING, IconKind::Sparkles)
            .style(&ElementPatch::new().with_size(48.0, 48.0).with_opacity(0.2));
        PADDING
    };

    layout
        .text(PADDING, name_y, &d.full_name, 36.0, 700)
        .text(PADDING, name_y + 50.0, &d.job_title, 18.0, 500)
        .style(&ElementPatch::new().with_opacity(0.6))
        .push(
            ElementKind::Box,
            ElementPatch::new()
                .with_position(PADDING, 220.0)
                .with_size(right - PADDING, 1.0)
                .with_opacity(0.2),
        )
        .icon(PADDING, 245.0, IconKind::Mail)
        .text(64.0, 243.0, &d.email, 14.0, 500)
        .icon(PADDING, 275.0, IconKind::Phone)
        .text(64.0, 273.0, &d.phone, 14.0, 500)
        .text(290.0, 243.0, &d.website, 14.0, 500)
        .icon(right - 16.0, 245.0, IconKind::Globe)
        .text(290.0, 273.0, &d.company, 14.0, 500)
        .icon(right - 16.0, 275.0, IconKind::MapPin);

    card_template("modern", "Modern", background, layout.finish())
}

/// Everything centred: logo, name, pill-style title, one contact line.
#[allow(clippy::cast_precision_loss)]
fn minimal(d: &CardDetails) -> Template {
    let background = preset_background("Clean");
    let mut layout = Layout::card(&background, d);
    let title = d.job_title.to_uppercase();
    let contact = [d.email.as_str(), d.website.as_str(), d.phone.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("  |  ");

    let title_size = estimate_text_size(&title, 12.0, 2.0);
    let pill_x = centered_x(&title, 12.0, 2.0) - 16.0;

    let shift = if let Some(logo) = &d.logo {
        let (width, height) = (128.0, 64.0);
        layout.image((DEFAULT_WIDTH as f32 - width) / 2.0, 36.0, width, height, logo);
        24.0
    } else {
        0.0
    };

    layout
        .text(
            centered_x(&d.full_name, 30.0, -1.0),
            100.0 + shift,
            &d.full_name,
            30.0,
            800,
        )
        .style(&ElementPatch::new().with_letter_spacing(-1.0))
        .push(
            ElementKind::Box,
            ElementPatch::new()
                .with_position(pill_x, 152.0 + shift)
                .with_size(title_size.width + 32.0, title_size.height + 8.0)
                .with_border_radius(999.0)
                .with_opacity(0.05),
        )
        .text(pill_x + 16.0, 156.0 + shift, &title, 12.0, 700)
        .style(&ElementPatch::new().with_letter_spacing(2.0))
        .text(centered_x(&contact, 12.0, 0.0), 220.0 + shift, &contact, 12.0, 500)
        .style(&ElementPatch::new().with_opacity(0.8));

    card_template("minimal", "Minimal", background, layout.finish())
}

/// Oversized split name on the left, labelled contact column on the right.
#[allow(clippy::cast_precision_loss)]
fn bold(d: &CardDetails) -> Template {
    let background = preset_background("Midnight");
    let mut layout = Layout::card(&background, d);
    let panel_x = DEFAULT_WIDTH as f32 * 2.0 / 3.0;
    let column_x = panel_x + 20.0;
    let mut names = d.full_name.splitn(2, ' ');
    let first = names.next().unwrap_or_default().to_uppercase();
    let last = names.next().unwrap_or_default().to_uppercase();
    let accent = if background.is_dark() {
        "#bfdbfe"
    } else {
        "#2563eb"
    };

    layout
        .push(
            ElementKind::Box,
            ElementPatch::new()
                .with_position(panel_x, 0.0)
                .with_size(DEFAULT_WIDTH as f32 - panel_x, DEFAULT_HEIGHT as f32)
                .with_color("#000000")
                .with_opacity(0.1),
        );
    if let Some(logo) = &d.logo {
        layout.image(PADDING + 16.0, PADDING, 80.0, 40.0, logo);
    }
    layout
        .text(PADDING + 16.0, 90.0, &first, 48.0, 900)
        .text(PADDING + 16.0, 136.0, &last, 48.0, 900)
        .style(&ElementPatch::new().with_opacity(0.5))
        .text(PADDING + 16.0, 210.0, &d.job_title, 20.0, 700)
        .style(&ElementPatch::new().with_color(accent));

    let sections: [(&str, Vec<&str>, f32); 3] = [
        ("COMPANY", vec![d.company.as_str()], 80.0),
        ("CONTACT", vec![d.email.as_str(), d.phone.as_str()], 136.0),
        ("WEB", vec![d.website.as_str()], 210.0),
    ];
    for (label, lines, y) in sections {
        layout
            .text(column_x, y, label, 10.0, 500)
            .style(&ElementPatch::new().with_opacity(0.5));
        let mut line_y = y + 16.0;
        for line in lines {
            layout.text(column_x, line_y, line, 12.0, 500);
            line_y += 16.0;
        }
    }

    card_template("bold", "Bold", background, layout.finish())
}

fn flashcard() -> Template {
    let background = Background::solid("#ffffff");
    let mut layout = Layout::new(&background);
    layout
        .push(
            ElementKind::Box,
            ElementPatch::new()
                .with_position(24.0, 24.0)
                .with_size(552.0, 352.0)
                .with_border_radius(24.0)
                .with_color("#f1f5f9"),
        )
        .text(60.0, 60.0, "QUESTION", 12.0, 700)
        .style(&ElementPatch::new().with_letter_spacing(2.0).with_opacity(0.5))
        .text(60.0, 150.0, "What is the capital of Kenya?", 28.0, 700)
        .text(60.0, 300.0, "Nairobi", 18.0, 500)
        .style(&ElementPatch::new().with_opacity(0.4));

    Template {
        id: "flashcard".to_string(),
        name: "Flashcard".to_string(),
        category: TemplateCategory::Flashcard,
        fragment: CanvasFragment {
            elements: layout.finish(),
            background,
            dimensions: Some(Dimensions {
                width: 600,
                height: 400,
            }),
        },
    }
}

fn blank() -> Template {
    Template {
        id: "blank".to_string(),
        name: "Blank".to_string(),
        category: TemplateCategory::Blank,
        fragment: CanvasFragment {
            elements: Vec::new(),
            background: Background::solid("#ffffff"),
            dimensions: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Size};

    #[test]
    fn test_builtin_ids_unique_and_ordered() {
        let ids: Vec<&str> = TemplateRegistry::builtin().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["modern", "minimal", "bold", "flashcard", "blank"]);
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(
            TemplateRegistry::builtin(),
            TemplateRegistry::builtin()
        ));
    }

    #[test]
    fn test_by_category() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.by_category(TemplateCategory::BusinessCard).count(), 3);
        assert_eq!(registry.by_category(TemplateCategory::Blank).count(), 1);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_details_flow_into_cards() {
        let details = CardDetails {
            full_name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            ..CardDetails::default()
        };
        let registry = TemplateRegistry::with_details(&details);

        let modern = registry.get("modern").expect("modern");
        let contents: Vec<&str> = modern
            .fragment
            .elements
            .iter()
            .filter_map(Element::content)
            .collect();
        assert!(contents.contains(&"Grace Hopper"));
        assert!(contents.contains(&"grace@navy.mil"));

        let bold = registry.get("bold").expect("bold");
        let contents: Vec<&str> = bold
            .fragment
            .elements
            .iter()
            .filter_map(Element::content)
            .collect();
        assert!(contents.contains(&"GRACE"));
        assert!(contents.contains(&"HOPPER"));
    }

    #[test]
    fn test_ink_follows_background() {
        let registry = TemplateRegistry::builtin();
        let first_text = |id: &str| {
            registry
                .get(id)
                .and_then(|t| t.fragment.elements.iter().find(|e| e.kind() == ElementKind::Text))
                .map(|e| e.style.color.clone())
        };
        assert_eq!(first_text("modern").as_deref(), Some("#ffffff"));
        assert_eq!(first_text("minimal").as_deref(), Some("#0f172a"));
    }

    #[test]
    fn test_layout_z_indexes_ascend() {
        for template in TemplateRegistry::builtin().iter() {
            let z: Vec<i32> = template
                .fragment
                .elements
                .iter()
                .map(|e| e.style.z_index)
                .collect();
            assert!(z.windows(2).all(|w| w[0] < w[1]), "{}", template.id);
        }
    }

    #[test]
    fn test_single_word_name_in_bold() {
        let details = CardDetails {
            full_name: "Prince".to_string(),
            ..CardDetails::default()
        };
        let bold = TemplateRegistry::with_details(&details);
        let bold = bold.get("bold").expect("bold");
        assert!(bold
            .fragment
            .elements
            .iter()
            .any(|e| e.content() == Some("PRINCE")));
    }

    fn card<'a>(registry: &'a TemplateRegistry, id: &str) -> &'a [Element] {
        &registry.get(id).expect("card template").fragment.elements
    }

    const LOGO_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_glass_overlay_sits_under_content() {
        let glass = TemplateRegistry::builtin();
        let plain = TemplateRegistry::with_details(&CardDetails::default().with_glass(false));

        for id in ["modern", "minimal", "bold"] {
            let with = card(glass, id);
            let without = card(&plain, id);
            assert_eq!(with.len(), without.len() + 3, "{id}");

            let overlay = &with[..3];
            assert_eq!(overlay[0].kind(), ElementKind::Box);
            assert_eq!(overlay[0].size(), Some(Size::new(540.0, 340.0)));
            assert_eq!(overlay[1].kind(), ElementKind::Circle);
            assert_eq!(overlay[1].style.color, "#ffffff");
            assert_eq!(overlay[2].kind(), ElementKind::Circle);
            assert_eq!(overlay[2].style.color, "#000000");
            assert!(overlay.iter().all(|e| e.style.opacity <= 0.2));
            assert!(overlay[1].position.y < 0.0 && overlay[2].position.x < 0.0);
        }
    }

    #[test]
    fn test_logo_placed_per_layout() {
        let payload = ImagePayload::from_bytes(LOGO_PNG).expect("png");
        let details = CardDetails::default().with_logo(&payload);
        let registry = TemplateRegistry::with_details(&details);

        let logo_at = |id: &str| {
            card(&registry, id)
                .iter()
                .find(|e| e.kind() == ElementKind::Image)
                .map(|e| (e.content().map(str::to_string), e.position))
        };

        let src = Some(payload.data_uri.clone());
        assert_eq!(logo_at("modern"), Some((src.clone(), Position::new(40.0, 40.0))));
        assert_eq!(logo_at("bold"), Some((src.clone(), Position::new(56.0, 40.0))));
        let (minimal_src, minimal_pos) = logo_at("minimal").expect("minimal logo");
        assert_eq!(minimal_src, src);
        assert!((minimal_pos.x - 206.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_modern_sparkles_only_without_logo() {
        let has_sparkles = |registry: &TemplateRegistry| {
            card(registry, "modern")
                .iter()
                .any(|e| e.icon() == Some(IconKind::Sparkles))
        };
        assert!(has_sparkles(TemplateRegistry::builtin()));

        let payload = ImagePayload::from_bytes(LOGO_PNG).expect("png");
        let with_logo = CardDetails::default().with_logo(&payload);
        assert!(!has_sparkles(&TemplateRegistry::with_details(&with_logo)));

        let removed = with_logo.without_logo();
        assert_eq!(removed.logo, None);
        let registry = TemplateRegistry::with_details(&removed);
        assert!(has_sparkles(&registry));
        assert!(!card(&registry, "modern")
            .iter()
            .any(|e| e.kind() == ElementKind::Image));
    }

    #[test]
    fn test_logo_pushes_modern_name_down() {
        let name_y = |details: &CardDetails| {
            let registry = TemplateRegistry::with_details(details);
            card(&registry, "modern")
                .iter()
                .find(|e| e.content() == Some(details.full_name.as_str()))
                .map(|e| e.position.y)
        };
        let payload = ImagePayload::from_bytes(LOGO_PNG).expect("png");
        assert_eq!(name_y(&CardDetails::default()), Some(40.0));
        assert_eq!(name_y(&CardDetails::default().with_logo(&payload)), Some(112.0));
    }
}
