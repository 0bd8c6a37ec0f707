//! Serializable editor operations.
//!
//! One variant per mutation, plus the history controls. Hosts that talk to
//! the core through JSON (the CLI replay script, the WASM binding) send
//! these. Element-targeting variants take an optional `id`; when it is
//! omitted the operation targets the current selection.
//!
//! ```json
//! [
//!   { "op": "add", "kind": "text", "overrides": { "content": "Hi" } },
//!   { "op": "commit" },
//!   { "op": "update", "patch": { "font_size": 40 } },
//!   { "op": "undo" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::{BackgroundPatch, ElementId, ElementKind, ElementPatch, Reorder};

/// A single editor operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Create and select a new element.
    Add {
        /// Element kind.
        kind: ElementKind,
        /// Fields overriding the kind defaults.
        #[serde(default)]
        overrides: ElementPatch,
    },
    /// Add an image element from raw file bytes.
    AddImage {
        /// File contents.
        bytes: Vec<u8>,
        /// Fields overriding the image defaults.
        #[serde(default)]
        overrides: ElementPatch,
    },
    /// Merge fields into an element.
    Update {
        /// Target; the selection when omitted.
        #[serde(default)]
        id: Option<ElementId>,
        /// Fields to merge.
        patch: ElementPatch,
    },
    /// Move an element by a drag delta.
    Translate {
        /// Target; the selection when omitted.
        #[serde(default)]
        id: Option<ElementId>,
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Remove an element.
    Delete {
        /// Target; the selection when omitted.
        #[serde(default)]
        id: Option<ElementId>,
    },
    /// Set or clear the selection.
    Select {
        /// New selection; `null` clears it.
        id: Option<ElementId>,
    },
    /// Step an element's z-index.
    Reorder {
        /// Target; the selection when omitted.
        #[serde(default)]
        id: Option<ElementId>,
        /// Which way to step.
        direction: Reorder,
    },
    /// Duplicate an element.
    Clone {
        /// Target; the selection when omitted.
        #[serde(default)]
        id: Option<ElementId>,
    },
    /// Merge fields into the backdrop.
    UpdateBackground {
        /// Fields to merge.
        patch: BackgroundPatch,
    },
    /// Switch the backdrop to a named gradient preset.
    ApplyPreset {
        /// Preset name, case-insensitive.
        name: String,
    },
    /// Replace the document with a registered template.
    ApplyTemplate {
        /// Registry id.
        template_id: String,
    },
    /// Change canvas dimensions.
    Resize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Show or hide the alignment grid.
    SetShowGrid {
        /// Grid visibility.
        show: bool,
    },
    /// Record the current state in history.
    Commit,
    /// Step back one history entry.
    Undo,
    /// Drop uncommitted edits.
    Revert,
}

impl Operation {
    /// Whether this operation changes the document (as opposed to history).
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Commit | Self::Undo | Self::Revert)
    }

    /// Parse a JSON array of operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown operation.
    pub fn parse_script(json: &str) -> crate::CardResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let ops = Operation::parse_script(
            r#"[
                {"op": "add", "kind": "text", "overrides": {"content": "Hi"}},
                {"op": "commit"},
                {"op": "update", "patch": {"font_size": 40}},
                {"op": "reorder", "direction": "backward"},
                {"op": "select", "id": null},
                {"op": "undo"}
            ]"#,
        )
        .expect("valid script");

        assert_eq!(ops.len(), 6);
        assert_eq!(
            ops[0],
            Operation::Add {
                kind: ElementKind::Text,
                overrides: ElementPatch::new().with_content("Hi"),
            }
        );
        assert!(matches!(ops[2], Operation::Update { id: None, .. }));
        assert!(!ops[1].is_mutation());
        assert!(ops[3].is_mutation());
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(Operation::parse_script(r#"[{"op": "redo"}]"#).is_err());
    }
}
