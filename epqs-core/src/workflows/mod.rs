//! Multi-tool workflow guides.

pub mod catalog;
pub mod types;

pub use catalog::{builtin_workflows, WorkflowCatalog};
pub use types::{derive_key, WorkflowDefinition, WorkflowStep, HOST_TOOL_KEY};
