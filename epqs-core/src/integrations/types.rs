//! Core types for the integration catalog.
//!
//! An integration describes one external tool (Jamovi, FreeCAD, JaamSim, ...)
//! that EPQS exchanges files with. Records are (de)serialized with the same
//! camelCase field names used by the persisted settings record.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use url::Url;

/// Number of capabilities shown on a tool card.
const HIGHLIGHT_COUNT: usize = 3;

// ============================================================================
// Integration Status
// ============================================================================

/// Availability of an external tool.
///
/// Anything that is not explicitly `available` (missing, `null`, misspelled,
/// or a status this build doesn't know) reads as `unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum IntegrationStatus {
    Available,
    #[default]
    Unavailable,
}

impl IntegrationStatus {
    /// Returns true if the tool can be used.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Display text for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Disponível",
            Self::Unavailable => "Indisponível",
        }
    }
}

impl From<Option<String>> for IntegrationStatus {
    fn from(status: Option<String>) -> Self {
        match status.as_deref() {
            Some("available") => Self::Available,
            _ => Self::Unavailable,
        }
    }
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

// ============================================================================
// Integration Methods
// ============================================================================

/// How EPQS exchanges data with a tool.
///
/// Unknown tags survive a load/save cycle untouched via [`IntegrationMethod::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntegrationMethod {
    /// One-way file hand-off out of EPQS.
    Export,
    /// File hand-off back into EPQS.
    Import,
    Api,
    PythonApi,
    Macro,
    ConfigFiles,
    BatchProcessing,
    Other(String),
}

impl IntegrationMethod {
    /// Returns the wire tag for this method.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Export => "export",
            Self::Import => "import",
            Self::Api => "api",
            Self::PythonApi => "python_api",
            Self::Macro => "macro",
            Self::ConfigFiles => "config_files",
            Self::BatchProcessing => "batch_processing",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable name; unknown tags display as themselves.
    pub fn label(&self) -> &str {
        match self {
            Self::Export => "Exportação de dados",
            Self::Import => "Importação de dados",
            Self::Api => "Integração via API",
            Self::PythonApi => "API Python",
            Self::Macro => "Macros e scripts",
            Self::ConfigFiles => "Arquivos de configuração",
            Self::BatchProcessing => "Processamento em lote",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for IntegrationMethod {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "export" => Self::Export,
            "import" => Self::Import,
            "api" => Self::Api,
            "python_api" => Self::PythonApi,
            "macro" => Self::Macro,
            "config_files" => Self::ConfigFiles,
            "batch_processing" => Self::BatchProcessing,
            _ => Self::Other(tag),
        }
    }
}

impl From<IntegrationMethod> for String {
    fn from(method: IntegrationMethod) -> Self {
        match method {
            IntegrationMethod::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Integration Descriptor
// ============================================================================

/// Description of one external tool.
///
/// The catalog key is not part of the record; it lives in the catalog. Every
/// field defaults to empty so that a partial override record (for instance
/// `{"name": "X"}`) deserializes into a descriptor carrying only what it names.
/// A `null` field reads the same as a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationDescriptor {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-text supported version range, e.g. `2.3+`.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_url: String,
    pub status: IntegrationStatus,
    /// File extensions the tool reads or writes, in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub data_formats: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub integration_methods: Vec<IntegrationMethod>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IntegrationDescriptor {
    /// The leading capabilities shown on a summary card.
    pub fn highlights(&self) -> &[String] {
        let end = self.capabilities.len().min(HIGHLIGHT_COUNT);
        &self.capabilities[..end]
    }

    /// The download page as a parsed URL.
    ///
    /// Returns `None` when the field is empty or not a valid absolute URL.
    pub fn download_link(&self) -> Option<Url> {
        if self.download_url.trim().is_empty() {
            return None;
        }
        Url::parse(&self.download_url).ok()
    }
}
