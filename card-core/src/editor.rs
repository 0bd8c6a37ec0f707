//! Editing session: the live canvas, its undo history and configuration.
//!
//! The [`Editor`] is the single owner of the current [`CanvasState`]. Every
//! mutation routes through the pure transformations on [`CanvasState`];
//! history is only touched by [`Editor::commit`], [`Editor::undo`],
//! [`Editor::revert`] and template application. Callers decide what counts
//! as a committed edit (end of a drag, a field losing focus) so that
//! history does not fill with one entry per keystroke.

use crate::{
    BackgroundPatch, CanvasState, CardError, CardResult, EditorConfig, ElementId, ElementKind,
    ElementPatch, ExportRequest, GradientPreset, History, ImagePayload, Operation, Reorder,
    Template, TemplateRegistry,
};

/// A single-user editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    state: CanvasState,
    history: History,
    config: EditorConfig,
    registry: TemplateRegistry,
}

impl Editor {
    /// Start a session on the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Config`] if the config is invalid and
    /// [`CardError::TemplateNotFound`] if `default_template` is not registered.
    pub fn new(config: EditorConfig) -> CardResult<Self> {
        Self::with_registry(config, TemplateRegistry::builtin().clone())
    }

    /// Start a session on a custom template registry.
    ///
    /// The canvas starts at the configured size and then takes on the
    /// configured default template.
    ///
    /// # Errors
    ///
    /// Same as [`Editor::new`].
    pub fn with_registry(config: EditorConfig, registry: TemplateRegistry) -> CardResult<Self> {
        config.validate()?;
        let mut editor = Self {
            state: CanvasState::new(config.canvas_width, config.canvas_height),
            history: History::new(config.history_depth),
            registry,
            config,
        };
        let default_template = editor.config.default_template.clone();
        editor.apply_template_id(&default_template)?;
        Ok(editor)
    }

    /// The live canvas.
    #[must_use]
    pub const fn state(&self) -> &CanvasState {
        &self.state
    }

    /// The undo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Templates this session can apply.
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    fn mutate(&mut self, f: impl FnOnce(CanvasState) -> CanvasState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add and select a new element, returning its id.
    pub fn add_element(&mut self, kind: ElementKind, overrides: &ElementPatch) -> ElementId {
        let element = self.state.new_element(kind, overrides);
        let id = element.id;
        tracing::debug!(?kind, %id, "Adding element");
        self.mutate(|s| s.insert_element(element));
        id
    }

    /// Add an image element from raw file bytes, returning its id.
    ///
    /// `overrides.content` is ignored; the image source is always the
    /// encoded file.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidImage`] if the bytes are not an image.
    /// The canvas is left untouched in that case.
    pub fn add_image(&mut self, bytes: &[u8], overrides: &ElementPatch) -> CardResult<ElementId> {
        let payload = ImagePayload::from_bytes(bytes)?;
        tracing::debug!(format = ?payload.format, len = bytes.len(), "Adding image");
        let overrides = ElementPatch {
            content: Some(payload.data_uri),
            ..overrides.clone()
        };
        Ok(self.add_element(ElementKind::Image, &overrides))
    }

    /// Merge `patch` into an element. Unknown ids are ignored.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        tracing::debug!(%id, "Updating element");
        self.mutate(|s| s.update_element(id, patch));
    }

    /// Move an element by a drag delta.
    pub fn translate_element(&mut self, id: ElementId, dx: f32, dy: f32) {
        self.mutate(|s| s.translate_element(id, dx, dy));
    }

    /// Remove an element. Unknown ids are ignored.
    pub fn delete_element(&mut self, id: ElementId) {
        tracing::debug!(%id, "Deleting element");
        self.mutate(|s| s.delete_element(id));
    }

    /// Set or clear the selection.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.mutate(|s| s.select_element(id));
    }

    /// Step an element's z-index.
    pub fn reorder_element(&mut self, id: ElementId, direction: Reorder) {
        tracing::debug!(%id, ?direction, "Reordering element");
        self.mutate(|s| s.reorder_element(id, direction));
    }

    /// Duplicate an element at the configured offset, returning the copy's
    /// id, or `None` if `id` is unknown.
    pub fn clone_element(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.state.contains(id) {
            tracing::trace!(%id, "clone_element: no such element");
            return None;
        }
        let offset = self.config.clone_offset;
        self.mutate(|s| s.clone_element(id, offset));
        tracing::debug!(source = %id, "Cloned element");
        self.state.selected_id()
    }

    /// Merge `patch` into the backdrop.
    pub fn update_background(&mut self, patch: &BackgroundPatch) {
        self.mutate(|s| s.update_background(patch));
    }

    /// Switch the backdrop to a named gradient preset. Returns `false` if
    /// no preset has that name.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let Some(preset) = GradientPreset::find(name) else {
            tracing::trace!("apply_preset: unknown preset {name}");
            return false;
        };
        self.update_background(&preset.to_patch());
        true
    }

    /// Change canvas dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.mutate(|s| s.resize(width, height));
    }

    /// Show or hide the alignment grid.
    pub fn set_show_grid(&mut self, show: bool) {
        self.mutate(|s| s.set_show_grid(show));
    }

    /// Replace the document with `template` and empty the undo history.
    pub fn apply_template(&mut self, template: &Template) {
        tracing::info!(template = %template.id, "Applying template");
        self.mutate(|s| s.apply_template(template));
        self.history.clear();
    }

    /// Replace the document with the registered template `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TemplateNotFound`] if `id` is not registered.
    /// The canvas and history are left untouched in that case.
    pub fn apply_template_id(&mut self, id: &str) -> CardResult<()> {
        let template = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| CardError::TemplateNotFound(id.to_string()))?;
        self.apply_template(&template);
        Ok(())
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Record the current canvas as a history entry.
    pub fn commit(&mut self) {
        self.history.push(self.state.clone());
        tracing::debug!(cursor = self.history.index(), "Committed snapshot");
    }

    /// Step back one history entry. Returns `false` at the bottom of history.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = std::mem::take(&mut self.state);
        self.state = self.history.undo(current);
        tracing::debug!(cursor = self.history.index(), "Undo");
        true
    }

    /// Discard uncommitted edits by restoring the snapshot under the cursor.
    pub fn revert(&mut self) {
        let current = std::mem::take(&mut self.state);
        self.state = self.history.revert(current);
    }

    /// Whether [`Editor::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    // ------------------------------------------------------------------
    // Operations and export
    // ------------------------------------------------------------------

    /// Apply a serialized operation.
    ///
    /// Operations that omit a target id act on the selection and are
    /// skipped when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown template ids and invalid image bytes.
    pub fn apply(&mut self, operation: Operation) -> CardResult<()> {
        let selected = self.state.selected_id();
        let target = |id: Option<ElementId>| id.or(selected);

        match operation {
            Operation::Add { kind, overrides } => {
                self.add_element(kind, &overrides);
            }
            Operation::AddImage { bytes, overrides } => {
                self.add_image(&bytes, &overrides)?;
            }
            Operation::Update { id, patch } => {
                if let Some(id) = target(id) {
                    self.update_element(id, &patch);
                }
            }
            Operation::Translate { id, dx, dy } => {
                if let Some(id) = target(id) {
                    self.translate_element(id, dx, dy);
                }
            }
            Operation::Delete { id } => {
                if let Some(id) = target(id) {
                    self.delete_element(id);
                }
            }
            Operation::Select { id } => self.select_element(id),
            Operation::Reorder { id, direction } => {
                if let Some(id) = target(id) {
                    self.reorder_element(id, direction);
                }
            }
            Operation::Clone { id } => {
                if let Some(id) = target(id) {
                    self.clone_element(id);
                }
            }
            Operation::UpdateBackground { patch } => self.update_background(&patch),
            Operation::ApplyPreset { name } => {
                self.apply_preset(&name);
            }
            Operation::ApplyTemplate { template_id } => self.apply_template_id(&template_id)?,
            Operation::Resize { width, height } => self.resize(width, height),
            Operation::SetShowGrid { show } => self.set_show_grid(show),
            Operation::Commit => self.commit(),
            Operation::Undo => {
                self.undo();
            }
            Operation::Revert => self.revert(),
        }
        Ok(())
    }

    /// Describe an export of the live canvas under `name`.
    #[must_use]
    pub fn export_request(&self, name: Option<&str>) -> ExportRequest {
        ExportRequest::for_state(&self.state, name, self.config.export_pixel_ratio)
    }
}
