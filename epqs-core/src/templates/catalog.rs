//! Export template catalog with the built-in seed files.

use super::types::{Column, ColumnType, ExportTemplate, TemplateBody};
use crate::error::CatalogError;
use crate::strings;

// ============================================================================
// Jamovi Templates
// ============================================================================

fn jamovi_cep() -> ExportTemplate {
    ExportTemplate {
        key: "jamovi_cep".to_string(),
        name: "Dados CEP para Jamovi".to_string(),
        description: "Template para análise de controle estatístico".to_string(),
        body: TemplateBody::Csv {
            columns: vec![
                Column::new("sample_id", ColumnType::Integer, "ID da amostra"),
                Column::new("timestamp", ColumnType::Datetime, "Data/hora da coleta"),
                Column::new("measurement", ColumnType::Numeric, "Valor medido"),
                Column::new("operator", ColumnType::Factor, "Operador responsável"),
                Column::new("machine", ColumnType::Factor, "Máquina utilizada"),
                Column::new("shift", ColumnType::Factor, "Turno de trabalho"),
                Column::new("specification_lower", ColumnType::Numeric, "Limite inferior"),
                Column::new("specification_upper", ColumnType::Numeric, "Limite superior"),
            ],
            suggested_analyses: strings(&[
                "Descriptives → Descriptive Statistics",
                "T-Tests → One Sample T-Test",
                "ANOVA → One-Way ANOVA",
                "Regression → Linear Regression",
                "Factor → Reliability Analysis",
            ]),
        },
    }
}

fn jamovi_quality() -> ExportTemplate {
    ExportTemplate {
        key: "jamovi_quality".to_string(),
        name: "Dados de Qualidade para Jamovi".to_string(),
        description: "Template para análise de indicadores de qualidade".to_string(),
        body: TemplateBody::Csv {
            columns: vec![
                Column::new("date", ColumnType::Date, "Data do registro"),
                Column::new("defect_type", ColumnType::Factor, "Tipo de defeito"),
                Column::new("defect_count", ColumnType::Integer, "Quantidade de defeitos"),
                Column::new("production_volume", ColumnType::Integer, "Volume produzido"),
                Column::new("defect_rate", ColumnType::Numeric, "Taxa de defeitos (%)"),
                Column::new("cost_impact", ColumnType::Numeric, "Impacto financeiro"),
                Column::new("root_cause", ColumnType::Factor, "Causa raiz identificada"),
            ],
            suggested_analyses: strings(&[
                "Exploration → Descriptives",
                "Frequencies → Contingency Tables",
                "T-Tests → Paired Samples T-Test",
                "ANOVA → Repeated Measures ANOVA",
                "Regression → Logistic Regression",
            ]),
        },
    }
}

// ============================================================================
// FreeCAD Templates
// ============================================================================

fn freecad_layout() -> ExportTemplate {
    ExportTemplate {
        key: "freecad_layout".to_string(),
        name: "Layout de Fábrica para FreeCAD".to_string(),
        description: "Template para modelagem de layout industrial".to_string(),
        body: TemplateBody::PythonScript {
            components: strings(&[
                "Máquinas e equipamentos",
                "Estações de trabalho",
                "Áreas de armazenamento",
                "Fluxos de material",
                "Sistemas de transporte",
                "Áreas de segurança",
            ]),
            workbenches: strings(&[
                "Part Design → Modelagem paramétrica",
                "Assembly → Montagem de componentes",
                "Draft → Desenho 2D",
                "Arch → Elementos arquitetônicos",
                "Path → Usinagem CNC",
            ]),
        },
    }
}

// ============================================================================
// JaamSim Templates
// ============================================================================

fn jaamsim_process() -> ExportTemplate {
    ExportTemplate {
        key: "jaamsim_process".to_string(),
        name: "Processo Produtivo para JaamSim".to_string(),
        description: "Template para simulação de processo".to_string(),
        body: TemplateBody::Cfg {
            entities: strings(&[
                "EntityGenerator → Geração de entidades",
                "Queue → Filas de espera",
                "Server → Estações de processamento",
                "Branch → Pontos de decisão",
                "Combine → Montagem de componentes",
                "Separate → Desmontagem",
                "EntitySink → Saída do sistema",
            ]),
            parameters: strings(&[
                "Tempos de processamento",
                "Taxas de chegada",
                "Capacidades de recursos",
                "Probabilidades de falha",
                "Tempos de setup",
                "Políticas de manutenção",
            ]),
        },
    }
}

/// Returns the built-in export templates in registration order.
pub fn builtin_templates() -> Vec<ExportTemplate> {
    vec![jamovi_cep(), jamovi_quality(), freecad_layout(), jaamsim_process()]
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered registry of export templates keyed by template key.
#[derive(Debug, Clone, Default)]
pub struct ExportTemplateCatalog {
    templates: Vec<ExportTemplate>,
}

impl ExportTemplateCatalog {
    /// Builds a catalog from the built-in templates.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_templates(builtin_templates())
    }

    /// Builds a catalog from explicit templates, rejecting duplicate keys.
    pub fn from_templates(templates: Vec<ExportTemplate>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for template in templates {
            if catalog.get(&template.key).is_some() {
                return Err(CatalogError::DuplicateKey {
                    catalog: "export template",
                    key: template.key,
                });
            }
            catalog.templates.push(template);
        }
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&ExportTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    /// All templates in registration order.
    pub fn list(&self) -> Vec<&ExportTemplate> {
        self.templates.iter().collect()
    }

    /// Templates whose key contains `tool_key` as a substring.
    ///
    /// Matching is deliberately loose (`jamovi` matches `jamovi_cep`); an
    /// empty tool key matches every template.
    pub fn find_by_tool_key(&self, tool_key: &str) -> Vec<&ExportTemplate> {
        self.templates
            .iter()
            .filter(|t| t.key.contains(tool_key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
