//! Workflow definitions.
//!
//! A workflow documents a multi-tool process (model in FreeCAD, simulate in
//! JaamSim, analyse in Jamovi, ...). Workflows are descriptive only; nothing
//! here executes a step.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Step tool key that stands for EPQS itself rather than an external tool.
pub const HOST_TOOL_KEY: &str = "epqs";

/// One stage of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    /// Integration key, or [`HOST_TOOL_KEY`].
    pub tool: String,
    pub action: String,
    pub description: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl WorkflowStep {
    pub fn is_host_step(&self) -> bool {
        self.tool == HOST_TOOL_KEY
    }
}

/// A documented multi-tool process. Step order is reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowDefinition {
    pub name: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    pub benefits: Vec<String>,
}

impl WorkflowDefinition {
    /// The lookup key derived from the workflow name.
    pub fn key(&self) -> String {
        derive_key(&self.name)
    }
}

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Derives a workflow key from its display name.
///
/// Lower-cases the name and replaces each run of whitespace with a single
/// underscore: `"Fluxo Digital Twin"` becomes `"fluxo_digital_twin"`.
pub fn derive_key(name: &str) -> String {
    whitespace_runs()
        .replace_all(&name.to_lowercase(), "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_lowercases_and_joins() {
        assert_eq!(derive_key("Fluxo Digital Twin"), "fluxo_digital_twin");
    }

    #[test]
    fn test_derive_key_collapses_whitespace_runs() {
        assert_eq!(derive_key("Fluxo  de\tDesign \n X"), "fluxo_de_design_x");
    }

    #[test]
    fn test_derive_key_keeps_accents() {
        assert_eq!(
            derive_key("Fluxo de Análise de Qualidade"),
            "fluxo_de_análise_de_qualidade"
        );
    }

    #[test]
    fn test_derive_key_edges() {
        assert_eq!(derive_key(""), "");
        assert_eq!(derive_key(" Lead"), "_lead");
    }

    #[test]
    fn test_host_step() {
        let step = |tool: &str| WorkflowStep {
            tool: tool.to_string(),
            action: String::new(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        let workflow = WorkflowDefinition {
            name: "W".to_string(),
            description: String::new(),
            steps: vec![step("epqs"), step("jamovi"), step("epqs")],
            benefits: Vec::new(),
        };
        assert!(workflow.steps[0].is_host_step());
        assert!(!workflow.steps[1].is_host_step());
    }
}
