//! External tool integrations.
//!
//! - `types`: descriptor record, status and integration method tags
//! - `catalog`: built-in tool table, ordered catalog and persisted overrides

pub mod catalog;
pub mod types;

pub use catalog::{builtin_integrations, IntegrationCatalog, IntegrationOverrides};
pub use types::{IntegrationDescriptor, IntegrationMethod, IntegrationStatus};
