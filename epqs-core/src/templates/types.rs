//! Export template definitions and rendered artifacts.
//!
//! A template is a format-tagged description of a seed file for a third-party
//! tool. The format payload is a closed enum, so each renderer arm sees only
//! the fields its format defines.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

// ============================================================================
// CSV Columns
// ============================================================================

/// Declared type of a CSV column; drives the sample value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Numeric,
    Datetime,
    Date,
    /// Categorical value.
    Factor,
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Factor => "factor",
            Self::Other(tag) => tag,
        }
    }

    /// Fixed sample value written in the template's example row.
    pub fn sample_value(&self) -> &'static str {
        match self {
            Self::Integer => "1",
            Self::Numeric => "1.0",
            Self::Datetime => "2024-01-01 12:00:00",
            Self::Date => "2024-01-01",
            Self::Factor | Self::Other(_) => "Sample",
        }
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        match tag {
            "integer" => Self::Integer,
            "numeric" => Self::Numeric,
            "datetime" => Self::Datetime,
            "date" => Self::Date,
            "factor" => Self::Factor,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
    pub description: String,
}

impl Column {
    pub fn new(name: &str, kind: ColumnType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "type": self.kind.as_str(),
            "description": self.description,
        })
    }
}

// ============================================================================
// Template Body
// ============================================================================

/// Format-specific payload of an export template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateBody {
    /// Spreadsheet seed: a header row plus one sample row.
    Csv {
        columns: Vec<Column>,
        /// Analyses worth running on the data once imported.
        suggested_analyses: Vec<String>,
    },
    /// FreeCAD layout script skeleton.
    PythonScript {
        components: Vec<String>,
        workbenches: Vec<String>,
    },
    /// JaamSim model configuration.
    Cfg {
        /// `"Label → Description"` entries.
        entities: Vec<String>,
        parameters: Vec<String>,
    },
    /// A format this build has no renderer for. Rendered as a JSON dump.
    Other {
        format: String,
        payload: Map<String, Value>,
    },
}

impl TemplateBody {
    /// The format tag, e.g. `csv` or `python_script`.
    pub fn format_tag(&self) -> &str {
        match self {
            Self::Csv { .. } => "csv",
            Self::PythonScript { .. } => "python_script",
            Self::Cfg { .. } => "cfg",
            Self::Other { format, .. } => format,
        }
    }

    /// File extension of the rendered artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "csv",
            Self::PythonScript { .. } => "py",
            Self::Cfg { .. } => "cfg",
            Self::Other { .. } => "json",
        }
    }

    /// MIME type of the rendered artifact.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "text/csv",
            Self::PythonScript { .. } => "text/x-python",
            Self::Cfg { .. } => "text/plain",
            Self::Other { .. } => "application/json",
        }
    }
}

// ============================================================================
// Export Template
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTemplate {
    /// Catalog key; also names the rendered file.
    pub key: String,
    pub name: String,
    pub description: String,
    pub body: TemplateBody,
}

impl ExportTemplate {
    pub fn format_tag(&self) -> &str {
        self.body.format_tag()
    }

    /// Structured form of the whole definition: name, description, format,
    /// then the payload fields. The catalog key is not included.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), json!(self.name));
        object.insert("description".to_string(), json!(self.description));
        object.insert("format".to_string(), json!(self.format_tag()));

        match &self.body {
            TemplateBody::Csv {
                columns,
                suggested_analyses,
            } => {
                let columns: Vec<Value> = columns.iter().map(Column::to_json).collect();
                object.insert("columns".to_string(), Value::Array(columns));
                if !suggested_analyses.is_empty() {
                    object.insert("suggestedAnalyses".to_string(), json!(suggested_analyses));
                }
            }
            TemplateBody::PythonScript {
                components,
                workbenches,
            } => {
                object.insert("components".to_string(), json!(components));
                if !workbenches.is_empty() {
                    object.insert("workbenches".to_string(), json!(workbenches));
                }
            }
            TemplateBody::Cfg {
                entities,
                parameters,
            } => {
                object.insert("entities".to_string(), json!(entities));
                object.insert("parameters".to_string(), json!(parameters));
            }
            TemplateBody::Other { payload, .. } => {
                for (field, value) in payload {
                    object.entry(field.clone()).or_insert_with(|| value.clone());
                }
            }
        }

        Value::Object(object)
    }
}

// ============================================================================
// Rendered Artifact
// ============================================================================

/// A generated file ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    pub content: String,
    pub filename: String,
    pub media_type: &'static str,
}
