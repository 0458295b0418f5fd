//! Export templates: seed files for third-party tools.
//!
//! - `types`: template definition, per-format payloads, rendered artifact
//! - `catalog`: built-in templates and tool-key lookup
//! - `render`: per-format rendering rules

pub mod catalog;
pub mod render;
pub mod types;

pub use catalog::{builtin_templates, ExportTemplateCatalog};
pub use render::render;
pub use types::{Column, ColumnType, ExportTemplate, RenderedArtifact, TemplateBody};
