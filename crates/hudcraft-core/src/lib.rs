//! HUDCraft Core Library
//!
//! Platform-agnostic document model and editing logic for the HUDCraft
//! overlay configuration editor: the anchor-relative layout engine, the
//! configuration classifier and snapshot history.

pub mod anchor;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod document;
pub mod drag;
pub mod editor;
pub mod form;
pub mod history;
pub mod input;
pub mod module;
pub mod snap;

pub use anchor::{Align, AnchorParseError, AnchorType, Margins, Offset, Placement};
pub use classify::{Classification, Group, classify};
pub use config::EditorConfig;
pub use defaults::ConfigVersion;
pub use document::{Document, DocumentError, NAMESPACE_KEY, Section, Value};
pub use drag::{DragController, DragState, DragTarget};
pub use editor::Editor;
pub use form::FieldControl;
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::{MouseButton, PointerEvent};
pub use module::HudModule;
pub use snap::{AnchorTarget, SnapResult};
