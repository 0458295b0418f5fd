//! Configuration module for EPQS.
//!
//! Persists the integration overrides in a key-value slot (SQLite by default).

mod settings;

pub use settings::{MemorySlot, SettingsError, SettingsSlot, SettingsStore, STORAGE_KEY};
