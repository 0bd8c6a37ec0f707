//! The editable document and the mutation API that transforms it.
//!
//! Every mutation consumes a [`CanvasState`] and returns the next one. No
//! mutation fails: operations that target an unknown id hand the state back
//! unchanged, because an edit racing a delete is an ordinary UI event.

use serde::{Deserialize, Serialize};

use crate::{
    Background, BackgroundPatch, CardError, CardResult, Element, ElementId, ElementKind,
    ElementPatch, Template,
};

/// Default canvas width in pixels (business-card stage).
pub const DEFAULT_WIDTH: u32 = 540;

/// Default canvas height in pixels (business-card stage).
pub const DEFAULT_HEIGHT: u32 = 340;

/// Direction for [`CanvasState::reorder_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reorder {
    /// Raise the z-index by one.
    Forward,
    /// Lower the z-index by one, never below zero.
    Backward,
}

/// The editable document: elements, backdrop, dimensions and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    /// Elements in insertion order. Paint order is by z-index.
    elements: Vec<Element>,
    /// Currently selected element, if any.
    selected_id: Option<ElementId>,
    /// Canvas backdrop.
    background: Background,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Whether the renderer should overlay an alignment grid.
    show_grid: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl CanvasState {
    /// Create an empty canvas with the default backdrop.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            elements: Vec::new(),
            selected_id: None,
            background: Background::default(),
            width,
            height,
            show_grid: false,
        }
    }

    // ------------------------------------------------------------------
    // Read access for renderers and exporters
    // ------------------------------------------------------------------

    /// Elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Whether an element with `id` exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// The selected element id. May dangle if a caller selected an unknown id.
    #[must_use]
    pub const fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    /// The selected element, if the selection points at one.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selected_id.and_then(|id| self.element(id))
    }

    /// The canvas backdrop.
    #[must_use]
    pub const fn background(&self) -> &Background {
        &self.background
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the alignment grid is shown.
    #[must_use]
    pub const fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the canvas has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements sorted for painting: ascending z-index, ties in insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // sort_by_key is stable, so equal z-indexes keep insertion order
        ordered.sort_by_key(|e| e.style.z_index);
        ordered
    }

    /// Find the topmost element containing the given canvas coordinates.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Z-index that places a new element above every existing one.
    #[must_use]
    pub fn next_z_index(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.style.z_index.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Build (but do not insert) a new element stacked on top of the canvas.
    ///
    /// An explicit `z_index` in `overrides` wins over the stacking default.
    #[must_use]
    pub fn new_element(&self, kind: ElementKind, overrides: &ElementPatch) -> Element {
        let mut element = Element::new(kind).with_z_index(self.next_z_index());
        overrides.apply(&mut element);
        element
    }

    // ------------------------------------------------------------------
    // Mutation API
    // ------------------------------------------------------------------

    /// Append a newly created element and select it.
    #[must_use]
    pub fn add_element(self, kind: ElementKind, overrides: &ElementPatch) -> Self {
        let element = self.new_element(kind, overrides);
        self.insert_element(element)
    }

    /// Append an already built element and select it.
    ///
    /// An element whose id is already present is re-issued a fresh id so
    /// ids stay unique.
    #[must_use]
    pub fn insert_element(mut self, mut element: Element) -> Self {
        if self.contains(element.id) {
            element.id = ElementId::new();
        }
        self.selected_id = Some(element.id);
        self.elements.push(element);
        self
    }

    /// Merge `patch` into the element with `id`. No-op if `id` is unknown.
    #[must_use]
    pub fn update_element(mut self, id: ElementId, patch: &ElementPatch) -> Self {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => patch.apply(element),
            None => {
                tracing::trace!("update_element: no element {id}");
            }
        }
        self
    }

    /// Move the element with `id` by a drag delta. No-op if `id` is unknown.
    #[must_use]
    pub fn translate_element(mut self, id: ElementId, dx: f32, dy: f32) -> Self {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            element.position = element.position.offset(dx, dy);
        }
        self
    }

    /// Remove the element with `id`, clearing the selection if it pointed there.
    #[must_use]
    pub fn delete_element(mut self, id: ElementId) -> Self {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.elements.len() == before {
            tracing::trace!("delete_element: no element {id}");
        }
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        self
    }

    /// Set the selection. The id is not checked against the elements.
    #[must_use]
    pub fn select_element(mut self, id: Option<ElementId>) -> Self {
        self.selected_id = id;
        self
    }

    /// Step the z-index of the element with `id` by one. Siblings are not
    /// renumbered.
    #[must_use]
    pub fn reorder_element(mut self, id: ElementId, direction: Reorder) -> Self {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            let z = &mut element.style.z_index;
            match direction {
                Reorder::Forward => *z = z.saturating_add(1),
                Reorder::Backward if *z > 0 => *z -= 1,
                Reorder::Backward => {}
            }
        }
        self
    }

    /// Duplicate the element with `id` under a fresh id, shifted by `offset`
    /// on both axes, and select the copy. No-op if `id` is unknown.
    #[must_use]
    pub fn clone_element(self, id: ElementId, offset: f32) -> Self {
        match self.element(id).map(|e| e.duplicate(offset)) {
            Some(copy) => self.insert_element(copy),
            None => self,
        }
    }

    /// Merge `patch` into the backdrop.
    #[must_use]
    pub fn update_background(mut self, patch: &BackgroundPatch) -> Self {
        patch.apply(&mut self.background);
        self
    }

    /// Replace elements and backdrop (and dimensions, when the template
    /// carries them) from `template`, clearing the selection.
    ///
    /// Template elements are issued fresh ids. The grid toggle is kept.
    /// Resetting undo history is the owner's job; see
    /// [`Editor::apply_template`](crate::Editor::apply_template).
    #[must_use]
    pub fn apply_template(mut self, template: &Template) -> Self {
        let fragment = &template.fragment;
        self.elements = fragment
            .elements
            .iter()
            .map(|e| Element {
                id: ElementId::new(),
                ..e.clone()
            })
            .collect();
        self.background = fragment.background.clone();
        if let Some(dims) = fragment.dimensions {
            self.width = dims.width;
            self.height = dims.height;
        }
        self.selected_id = None;
        self
    }

    /// Change the canvas dimensions. Elements are not moved.
    #[must_use]
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Show or hide the alignment grid.
    #[must_use]
    pub fn set_show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize the state to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string(self).map_err(CardError::Serialization)
    }

    /// Deserialize a state from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }
}
