//! Workflow catalog with the built-in process guides.

use super::types::{derive_key, WorkflowDefinition, WorkflowStep, HOST_TOOL_KEY};
use crate::error::CatalogError;
use crate::strings;
use crate::integrations::IntegrationCatalog;

fn step(
    tool: &str,
    action: &str,
    description: &str,
    inputs: &[&str],
    outputs: &[&str],
) -> WorkflowStep {
    WorkflowStep {
        tool: tool.to_string(),
        action: action.to_string(),
        description: description.to_string(),
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
    }
}

// ============================================================================
// Built-in Workflows
// ============================================================================

/// FreeCAD → JaamSim → Jamovi.
fn digital_twin() -> WorkflowDefinition {
    WorkflowDefinition {
        name: "Fluxo Digital Twin".to_string(),
        description: "Modelagem 3D → Simulação → Análise Estatística".to_string(),
        steps: vec![
            step(
                "freecad",
                "model_creation",
                "Criar modelo 3D do equipamento/layout",
                &["dimensões", "especificações técnicas"],
                &["modelo 3D", "desenhos técnicos"],
            ),
            step(
                "jaamsim",
                "process_simulation",
                "Simular processo produtivo",
                &["layout 3D", "parâmetros de processo"],
                &["dados de simulação", "métricas de performance"],
            ),
            step(
                "jamovi",
                "statistical_analysis",
                "Analisar resultados estatisticamente",
                &["dados de simulação", "dados reais"],
                &["relatórios estatísticos", "insights"],
            ),
        ],
        benefits: strings(&[
            "Validação virtual antes da implementação",
            "Otimização de recursos e layout",
            "Redução de custos e riscos",
            "Tomada de decisão baseada em dados",
        ]),
    }
}

fn quality_analysis() -> WorkflowDefinition {
    WorkflowDefinition {
        name: "Fluxo de Análise de Qualidade".to_string(),
        description: "CEP → Simulação → Análise Estatística".to_string(),
        steps: vec![
            step(
                HOST_TOOL_KEY,
                "cep_analysis",
                "Análise CEP dos dados de processo",
                &["dados de medição", "especificações"],
                &["gráficos de controle", "índices de capabilidade"],
            ),
            step(
                "jaamsim",
                "process_optimization",
                "Simular melhorias no processo",
                &["parâmetros atuais", "propostas de melhoria"],
                &["cenários simulados", "previsões de melhoria"],
            ),
            step(
                "jamovi",
                "comparative_analysis",
                "Comparar cenários estatisticamente",
                &["dados antes/depois", "resultados simulados"],
                &["testes de significância", "recomendações"],
            ),
        ],
        benefits: strings(&[
            "Melhoria contínua baseada em evidências",
            "Validação estatística de melhorias",
            "Previsão de resultados",
            "Documentação científica",
        ]),
    }
}

fn process_design() -> WorkflowDefinition {
    WorkflowDefinition {
        name: "Fluxo de Design de Processo".to_string(),
        description: "VSM → Modelagem 3D → Simulação → Validação".to_string(),
        steps: vec![
            step(
                HOST_TOOL_KEY,
                "vsm_mapping",
                "Mapear estado atual e futuro",
                &["processo atual", "objetivos"],
                &["VSM atual", "VSM futuro"],
            ),
            step(
                "freecad",
                "layout_design",
                "Projetar novo layout",
                &["VSM futuro", "restrições físicas"],
                &["layout 3D", "plantas baixas"],
            ),
            step(
                "jaamsim",
                "validation_simulation",
                "Validar novo processo",
                &["layout proposto", "parâmetros operacionais"],
                &["métricas de performance", "gargalos identificados"],
            ),
            step(
                "jamovi",
                "roi_analysis",
                "Analisar retorno do investimento",
                &["custos", "benefícios projetados"],
                &["análise de ROI", "payback"],
            ),
        ],
        benefits: strings(&[
            "Design otimizado desde o início",
            "Redução de retrabalho",
            "Validação antes da implementação",
            "Justificativa financeira sólida",
        ]),
    }
}

/// Returns the built-in workflows in registration order.
pub fn builtin_workflows() -> Vec<WorkflowDefinition> {
    vec![digital_twin(), quality_analysis(), process_design()]
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered registry of workflows keyed by their derived key.
#[derive(Debug, Clone, Default)]
pub struct WorkflowCatalog {
    entries: Vec<(String, WorkflowDefinition)>,
}

impl WorkflowCatalog {
    /// Builds a catalog from the built-in workflows.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_workflows(builtin_workflows())
    }

    /// Builds a catalog, deriving each key from the workflow name.
    ///
    /// Fails if a workflow has no steps or if two names derive the same key.
    pub fn from_workflows(workflows: Vec<WorkflowDefinition>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for workflow in workflows {
            let key = workflow.key();
            if workflow.steps.is_empty() {
                return Err(CatalogError::EmptyWorkflow { key });
            }
            if let Some(existing) = catalog.get(&key) {
                return Err(CatalogError::KeyCollision {
                    key,
                    first: existing.name.clone(),
                    second: workflow.name,
                });
            }
            catalog.entries.push((key, workflow));
        }
        Ok(catalog)
    }

    /// Checks every step tool against the integration catalog.
    ///
    /// A step tool must be an integration key or the host key `epqs`.
    pub fn validate_tools(&self, integrations: &IntegrationCatalog) -> Result<(), CatalogError> {
        for (key, workflow) in &self.entries {
            for step in &workflow.steps {
                if !step.is_host_step() && !integrations.contains(&step.tool) {
                    return Err(CatalogError::UnknownStepTool {
                        workflow: key.clone(),
                        tool: step.tool.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&WorkflowDefinition> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, w)| w)
    }

    /// All workflows with their keys, in registration order.
    pub fn list(&self) -> Vec<(&str, &WorkflowDefinition)> {
        self.entries.iter().map(|(k, w)| (k.as_str(), w)).collect()
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
}
