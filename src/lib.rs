//! Headless core of a paginated whiteboard editor.
//!
//! The [`Editor`] state machine consumes [`Action`]s and keeps an undoable
//! [`Document`] of notebooks, pages and vector elements. Rendering, text
//! measurement and page templates are supplied by the embedding application.

pub mod editor;
pub mod geometry;
pub mod history;
pub mod ids;
pub mod model;
pub mod settings;
pub mod templates;
pub mod text_metrics;

pub use editor::{
    Action, Camera, Collaborators, Editor, ElementProperties, ElementRef, InteractionState,
    RenderView, Selection, Tool,
};
pub use geometry::ResizeHandle;
pub use model::{Document, Element, ElementKind};
pub use settings::{EditorSettings, SettingsError, load_settings, save_settings};
pub use templates::{BuiltinTemplates, Template, TemplateSource};
pub use text_metrics::{EstimatedMetrics, TextMeasure, TextMetrics};
