//! WebAssembly bindings for card-core.
//!
//! The browser front end owns a [`WasmEditor`], sends it JSON-encoded
//! [`Operation`]s and re-renders from the state JSON it returns.

use wasm_bindgen::prelude::*;

use crate::{Editor, EditorConfig, ElementPatch, Operation};

/// Initialize the card editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create a session. `config_json` may be empty for defaults.
    ///
    /// # Errors
    ///
    /// Returns an error string if the config is invalid or names an unknown
    /// default template.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmEditor, String> {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).map_err(|e| e.to_string())?
        };
        let editor = Editor::new(config).map_err(|e| e.to_string())?;
        Ok(Self { editor })
    }

    /// Get the current canvas state as JSON.
    #[wasm_bindgen(js_name = getStateJson)]
    #[must_use]
    pub fn get_state_json(&self) -> String {
        self.editor.state().to_json().unwrap_or_default()
    }

    /// Element ids in paint order (bottom first), as a JSON array.
    #[wasm_bindgen(js_name = getPaintOrderJson)]
    #[must_use]
    pub fn get_paint_order_json(&self) -> String {
        let ids: Vec<String> = self
            .editor
            .state()
            .paint_order()
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        serde_json::to_string(&ids).unwrap_or_default()
    }

    /// Apply one JSON-encoded operation.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not an operation or the
    /// operation fails.
    #[wasm_bindgen(js_name = applyOperation)]
    pub fn apply_operation(&mut self, json: &str) -> Result<(), String> {
        let operation: Operation = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor.apply(operation).map_err(|e| e.to_string())
    }

    /// Add an image element from file bytes read by the page.
    ///
    /// # Errors
    ///
    /// Returns an error string if the bytes are not a recognised image.
    #[wasm_bindgen(js_name = addImage)]
    pub fn add_image(&mut self, bytes: &[u8]) -> Result<String, String> {
        self.editor
            .add_image(bytes, &ElementPatch::new())
            .map(|id| id.to_string())
            .map_err(|e| e.to_string())
    }

    /// Hit-test canvas coordinates, returning the topmost element id.
    #[wasm_bindgen(js_name = elementAt)]
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<String> {
        self.editor.state().element_at(x, y).map(|id| id.to_string())
    }

    /// Record the current state in history.
    pub fn commit(&mut self) {
        self.editor.commit();
    }

    /// Step back one history entry.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Registered templates as a JSON array of `{id, name, category}`.
    #[wasm_bindgen(js_name = getTemplatesJson)]
    #[must_use]
    pub fn get_templates_json(&self) -> String {
        let entries: Vec<serde_json::Value> = self
            .editor
            .registry()
            .iter()
            .map(|t| serde_json::json!({ "id": t.id, "name": t.name, "category": t.category }))
            .collect();
        serde_json::to_string(&entries).unwrap_or_default()
    }

    /// Export parameters for the current canvas as JSON.
    #[wasm_bindgen(js_name = getExportRequestJson)]
    #[must_use]
    pub fn get_export_request_json(&self, name: &str) -> String {
        serde_json::to_string(&self.editor.export_request(Some(name))).unwrap_or_default()
    }
}
