//! # Card Core
//!
//! Editable-canvas state model for business-card and flashcard editors.
//! Compiles to WASM so a browser front end can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 card-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Canvas State            │
//! │  - Kind bodies   │  - Ordered elements      │
//! │  - Style         │  - Background, size      │
//! │  - Patches       │  - Selection             │
//! ├─────────────────────────────────────────────┤
//! │  History         │  Templates               │
//! │  - Snapshots     │  - Business cards        │
//! │  - Linear undo   │  - Flashcard, blank      │
//! ├─────────────────────────────────────────────┤
//! │  Editor: session owner, operations, export  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering, rasterised export and file reading stay outside: they read
//! the current [`CanvasState`] and feed results back in as mutations.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod background;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod export;
pub mod history;
pub mod image;
pub mod operation;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use background::{
    Background, BackgroundKind, BackgroundPatch, GradientDirection, GradientPreset,
    GRADIENT_PRESETS,
};
pub use canvas::{CanvasState, Reorder, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use config::EditorConfig;
pub use editor::Editor;
pub use element::{
    Element, ElementBody, ElementId, ElementKind, ElementPatch, IconKind, Position, Size, Style,
};
pub use error::{CardError, CardResult};
pub use export::{export_file_name, ExportRequest};
pub use history::{History, DEFAULT_HISTORY_DEPTH};
pub use image::{ImageFormat, ImagePayload};
pub use operation::Operation;
pub use template::{
    CanvasFragment, CardDetails, Dimensions, Template, TemplateCategory, TemplateRegistry,
};

/// Card core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
