//! Integration catalog with the built-in tool table.
//!
//! The catalog keeps registration order for listing. Persisted overrides are
//! applied with whole-record replacement per key; see
//! [`IntegrationCatalog::apply_overrides`].

use serde::ser::{Serialize, Serializer};
use tracing::debug;

use super::types::{IntegrationDescriptor, IntegrationMethod, IntegrationStatus};
use crate::error::CatalogError;
use crate::strings;

// ============================================================================
// Jamovi Definition
// ============================================================================

const JAMOVI_VERSION: &str = "2.3+";

fn jamovi_definition() -> IntegrationDescriptor {
    IntegrationDescriptor {
        name: "Jamovi".to_string(),
        description: "Software estatístico gratuito baseado no R".to_string(),
        version: JAMOVI_VERSION.to_string(),
        website: "https://jamovi.org".to_string(),
        download_url: "https://jamovi.org/download.html".to_string(),
        status: IntegrationStatus::Available,
        data_formats: strings(&["csv", "xlsx", "sav", "ods"]),
        capabilities: strings(&[
            "Análises estatísticas descritivas",
            "Testes de hipóteses",
            "Regressão linear e logística",
            "ANOVA e ANCOVA",
            "Análise de confiabilidade",
            "Gráficos estatísticos avançados",
        ]),
        integration_methods: vec![
            IntegrationMethod::Export,
            IntegrationMethod::Import,
            IntegrationMethod::Api,
        ],
    }
}

// ============================================================================
// FreeCAD Definition
// ============================================================================

const FREECAD_VERSION: &str = "0.20+";

fn freecad_definition() -> IntegrationDescriptor {
    IntegrationDescriptor {
        name: "FreeCAD".to_string(),
        description: "Software CAD 3D open source para modelagem paramétrica".to_string(),
        version: FREECAD_VERSION.to_string(),
        website: "https://freecad.org".to_string(),
        download_url: "https://freecad.org/downloads.php".to_string(),
        status: IntegrationStatus::Available,
        data_formats: strings(&["step", "iges", "stl", "obj", "dxf", "svg"]),
        capabilities: strings(&[
            "Modelagem paramétrica 3D",
            "Simulação de movimento",
            "Análise de elementos finitos",
            "Desenho técnico 2D",
            "Renderização fotorrealística",
            "Scripting em Python",
        ]),
        integration_methods: vec![
            IntegrationMethod::Export,
            IntegrationMethod::PythonApi,
            IntegrationMethod::Macro,
        ],
    }
}

// ============================================================================
// JaamSim Definition
// ============================================================================

const JAAMSIM_VERSION: &str = "2023-06+";

fn jaamsim_definition() -> IntegrationDescriptor {
    IntegrationDescriptor {
        name: "JaamSim".to_string(),
        description: "Software open source de simulação discreta".to_string(),
        version: JAAMSIM_VERSION.to_string(),
        website: "https://jaamsim.com".to_string(),
        download_url: "https://jaamsim.com/downloads.html".to_string(),
        status: IntegrationStatus::Available,
        data_formats: strings(&["cfg", "csv", "xlsx", "txt"]),
        capabilities: strings(&[
            "Simulação de eventos discretos",
            "Modelagem de processos produtivos",
            "Análise de filas e gargalos",
            "Otimização de recursos",
            "Visualização 3D de simulações",
            "Relatórios estatísticos",
        ]),
        integration_methods: vec![
            IntegrationMethod::Export,
            IntegrationMethod::ConfigFiles,
            IntegrationMethod::BatchProcessing,
        ],
    }
}

/// Returns the built-in integrations in registration order.
pub fn builtin_integrations() -> Vec<(String, IntegrationDescriptor)> {
    vec![
        ("jamovi".to_string(), jamovi_definition()),
        ("freecad".to_string(), freecad_definition()),
        ("jaamsim".to_string(), jaamsim_definition()),
    ]
}

// ============================================================================
// Overrides
// ============================================================================

/// A partial integration catalog read back from persisted settings.
///
/// Maps integration key to a full replacement record, in the order the keys
/// appeared in the stored object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationOverrides {
    entries: Vec<(String, IntegrationDescriptor)>,
}

impl IntegrationOverrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the record for `key`.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: IntegrationDescriptor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = descriptor,
            None => self.entries.push((key, descriptor)),
        }
    }

    /// Parses the stored JSON object.
    ///
    /// The top level must be an object; every value must be a descriptor
    /// record. Missing descriptor fields take their empty defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let entries = object
            .into_iter()
            .map(|(key, value)| {
                let descriptor = serde_json::from_value::<IntegrationDescriptor>(value)?;
                Ok((key, descriptor))
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&IntegrationDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }
}

impl IntoIterator for IntegrationOverrides {
    type Item = (String, IntegrationDescriptor);
    type IntoIter = std::vec::IntoIter<(String, IntegrationDescriptor)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered registry of integration descriptors keyed by tool key.
#[derive(Debug, Clone, Default)]
pub struct IntegrationCatalog {
    entries: Vec<(String, IntegrationDescriptor)>,
}

impl IntegrationCatalog {
    /// Builds a catalog from the built-in tool table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(builtin_integrations())
    }

    /// Builds a catalog from explicit entries, rejecting duplicate keys.
    pub fn from_entries(
        entries: Vec<(String, IntegrationDescriptor)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (key, descriptor) in entries {
            if catalog.contains(&key) {
                return Err(CatalogError::DuplicateKey {
                    catalog: "integration",
                    key,
                });
            }
            catalog.entries.push((key, descriptor));
        }
        Ok(catalog)
    }

    /// Get a descriptor by key.
    pub fn get(&self, key: &str) -> Option<&IntegrationDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries in registration order.
    pub fn list(&self) -> Vec<(&str, &IntegrationDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d)).collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies persisted overrides with a shallow top-level merge.
    ///
    /// Each key in `overrides` replaces the whole record at that key, keeping
    /// its position. Keys the catalog doesn't know are appended as new
    /// entries. Keys not mentioned are left untouched.
    pub fn apply_overrides(&mut self, overrides: IntegrationOverrides) {
        for (key, descriptor) in overrides {
            match self.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => {
                    debug!(key = %key, "Replacing integration from settings");
                    entry.1 = descriptor;
                }
                None => {
                    debug!(key = %key, "Adding integration from settings");
                    self.entries.push((key, descriptor));
                }
            }
        }
    }

    /// Serializes the full catalog as a JSON object in registration order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for IntegrationCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, d)| (k, d)))
    }
}
