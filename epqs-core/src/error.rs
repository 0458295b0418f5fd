//! Catalog construction errors.
//!
//! Catalogs are built once at start-up; any of these means the built-in
//! tables are inconsistent and the engine refuses to start.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate key '{key}' in {catalog} catalog")]
    DuplicateKey { catalog: &'static str, key: String },

    #[error("Workflows '{first}' and '{second}' both derive the key '{key}'")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("Workflow '{key}' has no steps")]
    EmptyWorkflow { key: String },

    #[error("Workflow '{workflow}' references unknown tool '{tool}'")]
    UnknownStepTool { workflow: String, tool: String },
}
