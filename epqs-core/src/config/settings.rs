//! Integration settings persistence.
//!
//! The whole integration catalog is stored as one JSON object under
//! [`STORAGE_KEY`]. Loading never fails: a missing or unreadable record yields
//! an empty override and start-up continues with the built-in tools.
//! Saving is best effort.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::db::Database;
use crate::integrations::{IntegrationCatalog, IntegrationOverrides};

/// Fixed storage key of the integration override record.
pub const STORAGE_KEY: &str = "epqs_integration_settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Settings storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Storage Slot
// =============================================================================

/// A durable key-value slot holding serialized settings.
pub trait SettingsSlot {
    /// Returns the stored value, or `None` if nothing was stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Removes the value; removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), SettingsError>;
}

impl SettingsSlot for Database {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.get_setting(key)?)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        Ok(self.set_setting(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        Ok(self.delete_setting(key)?)
    }
}

/// Process-local slot. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }
}

impl SettingsSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        self.values.remove(key);
        Ok(())
    }
}

// =============================================================================
// Settings Store
// =============================================================================

/// Loads and saves the integration override record.
#[derive(Debug)]
pub struct SettingsStore<S> {
    slot: S,
}

impl<S: SettingsSlot> SettingsStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// The raw stored record, if any.
    pub fn stored_json(&self) -> Result<Option<String>, SettingsError> {
        self.slot.read(STORAGE_KEY)
    }

    /// Reads the override record, surfacing every failure.
    ///
    /// A missing record is an empty override, not an error.
    pub fn try_load(&self) -> Result<IntegrationOverrides, SettingsError> {
        match self.slot.read(STORAGE_KEY)? {
            Some(json) => Ok(IntegrationOverrides::from_json(&json)?),
            None => Ok(IntegrationOverrides::new()),
        }
    }

    /// Reads the override record.
    ///
    /// Unreadable or malformed records are discarded with a warning and an
    /// empty override is returned. The stored value is left as is.
    pub fn load(&self) -> IntegrationOverrides {
        match self.try_load() {
            Ok(overrides) => {
                debug!(entries = overrides.len(), "Loaded integration settings");
                overrides
            }
            Err(e) => {
                warn!(error = %e, "Failed to load integration settings, using defaults");
                IntegrationOverrides::new()
            }
        }
    }

    /// Serializes the full catalog and writes it, surfacing failures.
    pub fn try_save(&mut self, catalog: &IntegrationCatalog) -> Result<(), SettingsError> {
        let json = catalog.to_json()?;
        self.slot.write(STORAGE_KEY, &json)?;
        debug!(entries = catalog.len(), "Saved integration settings");
        Ok(())
    }

    /// Serializes the full catalog and writes it.
    ///
    /// Failures are logged and swallowed; the in-memory catalog stays usable.
    pub fn save(&mut self, catalog: &IntegrationCatalog) {
        if let Err(e) = self.try_save(catalog) {
            warn!(error = %e, "Failed to save integration settings");
        }
    }

    /// Removes the stored record so the next start-up uses built-ins only.
    pub fn clear(&mut self) -> Result<(), SettingsError> {
        self.slot.remove(STORAGE_KEY)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::IntegrationDescriptor;
    use tempfile::TempDir;

    /// Slot whose every operation fails, like a full or read-only store.
    struct BrokenSlot;

    impl SettingsSlot for BrokenSlot {
        fn read(&self, _key: &str) -> Result<Option<String>, SettingsError> {
            Err(SettingsError::Unavailable("read denied".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Unavailable("remove denied".to_string()))
        }
    }

    fn setup_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open_at(temp_dir.path().join("test.db")).unwrap();
        db.migrate().unwrap();
        (temp_dir, db)
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    #[test]
    fn test_load_missing_record_is_empty() {
        let store = SettingsStore::new(MemorySlot::new());
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_record_is_empty_and_kept() {
        let store = SettingsStore::new(MemorySlot::with_value(STORAGE_KEY, "{not json"));

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(SettingsError::Json(_))));
        assert_eq!(store.stored_json().unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        let store = SettingsStore::new(BrokenSlot);
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(SettingsError::Unavailable(_))));
    }

    #[test]
    fn test_load_partial_record() {
        let store = SettingsStore::new(MemorySlot::with_value(
            STORAGE_KEY,
            r#"{"jamovi": {"name": "Jamovi 3", "status": "unavailable"}}"#,
        ));

        let overrides = store.load();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("jamovi").unwrap().name, "Jamovi 3");
    }

    // -------------------------------------------------------------------------
    // Saving
    // -------------------------------------------------------------------------

    #[test]
    fn test_save_writes_full_catalog() {
        let catalog = IntegrationCatalog::builtin().unwrap();
        let mut store = SettingsStore::new(MemorySlot::new());

        store.save(&catalog);

        let overrides = store.load();
        assert_eq!(overrides.keys().collect::<Vec<_>>(), catalog.keys());
        assert_eq!(overrides.get("freecad"), catalog.get("freecad"));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let catalog = IntegrationCatalog::builtin().unwrap();
        let mut store = SettingsStore::new(BrokenSlot);

        store.save(&catalog);
        assert!(store.try_save(&catalog).is_err());
        // The catalog itself is untouched.
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_clear_removes_record() {
        let mut store = SettingsStore::new(MemorySlot::with_value(STORAGE_KEY, "{}"));
        store.clear().unwrap();
        assert!(store.stored_json().unwrap().is_none());
        store.clear().unwrap();
    }

    // -------------------------------------------------------------------------
    // SQLite Slot
    // -------------------------------------------------------------------------

    #[test]
    fn test_database_round_trip() {
        let (_temp, db) = setup_test_db();
        let mut catalog = IntegrationCatalog::builtin().unwrap();

        let mut overrides = IntegrationOverrides::new();
        overrides.insert(
            "minitab",
            IntegrationDescriptor {
                name: "Minitab".to_string(),
                ..Default::default()
            },
        );
        catalog.apply_overrides(overrides);

        let mut store = SettingsStore::new(db);
        store.try_save(&catalog).unwrap();

        let loaded = store.try_load().unwrap();
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["jamovi", "freecad", "jaamsim", "minitab"]
        );
        assert_eq!(loaded.get("minitab").unwrap().name, "Minitab");
    }

    #[test]
    fn test_database_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("epqs.db");

        {
            let db = Database::open_at(path.clone()).unwrap();
            db.migrate().unwrap();
            let mut store = SettingsStore::new(db);
            store.try_save(&IntegrationCatalog::builtin().unwrap()).unwrap();
        }

        let db = Database::open_at(path).unwrap();
        db.migrate().unwrap();
        let store = SettingsStore::new(db);
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn test_database_without_schema_degrades() {
        let db = Database::open_in_memory().unwrap();
        let mut store = SettingsStore::new(db);

        assert!(store.load().is_empty());
        store.save(&IntegrationCatalog::builtin().unwrap());
        assert!(matches!(store.try_load(), Err(SettingsError::Storage(_))));
    }
}
