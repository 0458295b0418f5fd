// Command handlers
//
// Each handler reads from the engine and prints plain text. Unknown keys are
// reported as unavailable and surface as an error exit.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use epqs_core::{
    ExportTemplate, IntegrationDescriptor, IntegrationEngine, RenderedArtifact, SettingsSlot,
    WorkflowDefinition,
};

use crate::cli::SettingsAction;

// ============================================================================
// Tools
// ============================================================================

pub fn list_tools<S: SettingsSlot>(engine: &IntegrationEngine<S>) {
    for (key, integration) in engine.list_integrations() {
        println!(
            "{:<10} {:<10} {} ({})",
            key,
            integration.version,
            integration.name,
            integration.status.label()
        );
        for highlight in integration.highlights() {
            println!("{:<21} - {}", "", highlight);
        }
    }
}

pub fn show_tool<S: SettingsSlot>(engine: &IntegrationEngine<S>, key: &str) -> Result<()> {
    let Some(integration) = engine.get_integration(key) else {
        bail!("Integration '{}' is unavailable", key);
    };
    let templates = engine.export_candidates_for(key);
    print!("{}", format_tool(key, integration, &templates)?);
    Ok(())
}

fn format_tool(
    key: &str,
    integration: &IntegrationDescriptor,
    templates: &[&ExportTemplate],
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} [{}] - {}", integration.name, key, integration.status.label())?;
    writeln!(out, "{}", integration.description)?;
    writeln!(out)?;
    writeln!(out, "Version:  {}", integration.version)?;
    writeln!(out, "Website:  {}", integration.website)?;
    writeln!(out, "Download: {}", integration.download_url)?;
    writeln!(out, "Formats:  {}", integration.data_formats.join(", "))?;

    writeln!(out, "\nCapabilities:")?;
    for capability in &integration.capabilities {
        writeln!(out, "  - {}", capability)?;
    }

    writeln!(out, "\nIntegration methods:")?;
    for method in &integration.integration_methods {
        writeln!(out, "  - {}", method.label())?;
    }

    if !templates.is_empty() {
        writeln!(out, "\nExport templates:")?;
        for template in templates {
            writeln!(out, "  {:<18} {}", template.key, template.name)?;
        }
    }
    Ok(out)
}

pub fn download<S: SettingsSlot>(engine: &IntegrationEngine<S>, tool: &str) -> Result<()> {
    if engine.get_integration(tool).is_none() {
        bail!("Integration '{}' is unavailable", tool);
    }
    let Some(url) = engine.download_url(tool) else {
        bail!("Integration '{}' has no download link", tool);
    };

    println!("Opening {}", url);
    webbrowser::open(url.as_str()).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}

// ============================================================================
// Workflows
// ============================================================================

pub fn list_workflows<S: SettingsSlot>(engine: &IntegrationEngine<S>) {
    for (key, workflow) in engine.list_workflows() {
        let tools: Vec<String> = workflow
            .steps
            .iter()
            .map(|step| engine.step_tool_label(step))
            .collect();
        println!("{:<32} {}", key, workflow.name);
        println!("{:<32} {}", "", tools.join(" → "));
    }
}

pub fn show_workflow<S: SettingsSlot>(engine: &IntegrationEngine<S>, key: &str) -> Result<()> {
    let Some(workflow) = engine.get_workflow(key) else {
        bail!("Workflow '{}' is unavailable", key);
    };
    print!("{}", format_workflow(engine, workflow)?);
    Ok(())
}

fn format_workflow<S: SettingsSlot>(
    engine: &IntegrationEngine<S>,
    workflow: &WorkflowDefinition,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", workflow.name)?;
    writeln!(out, "{}", workflow.description)?;

    for (index, step) in workflow.steps.iter().enumerate() {
        writeln!(
            out,
            "\n{}. {}: {}",
            index + 1,
            engine.step_tool_label(step),
            step.action
        )?;
        writeln!(out, "   {}", step.description)?;
        writeln!(out, "   Inputs:  {}", step.inputs.join(", "))?;
        writeln!(out, "   Outputs: {}", step.outputs.join(", "))?;
    }

    writeln!(out, "\nBenefits:")?;
    for benefit in &workflow.benefits {
        writeln!(out, "  - {}", benefit)?;
    }
    Ok(out)
}

// ============================================================================
// Export Templates
// ============================================================================

pub fn list_templates<S: SettingsSlot>(engine: &IntegrationEngine<S>, tool: Option<&str>) {
    let templates = match tool {
        Some(tool) => engine.export_candidates_for(tool),
        None => engine.list_export_templates(),
    };
    if templates.is_empty() {
        println!("No export templates available");
        return;
    }
    for template in templates {
        println!(
            "{:<18} {:<14} {}",
            template.key,
            template.format_tag(),
            template.name
        );
    }
}

pub fn render<S: SettingsSlot>(
    engine: &IntegrationEngine<S>,
    template: &str,
    out: Option<&Path>,
    stdout: bool,
) -> Result<()> {
    let Some(artifact) = engine.render(template) else {
        bail!("Export template '{}' is unavailable", template);
    };

    if stdout {
        print!("{}", artifact.content);
        return Ok(());
    }

    let dir = out.unwrap_or_else(|| Path::new("."));
    let path = write_artifact(dir, &artifact)?;
    println!("Wrote {} ({})", path.display(), artifact.media_type);
    Ok(())
}

/// Writes the artifact into `dir` under its own filename.
fn write_artifact(dir: &Path, artifact: &RenderedArtifact) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Wrote artifact");
    Ok(path)
}

// ============================================================================
// Tutorials
// ============================================================================

pub fn list_tutorials<S: SettingsSlot>(engine: &IntegrationEngine<S>) {
    for tutorial in engine.tutorials() {
        println!(
            "{} [{}, {}]",
            tutorial.title, tutorial.level, tutorial.duration
        );
        println!("  {}", tutorial.description);
    }
}

// ============================================================================
// Settings
// ============================================================================

pub fn settings<S: SettingsSlot>(
    engine: &mut IntegrationEngine<S>,
    action: SettingsAction,
) -> Result<()> {
    match action {
        SettingsAction::Save => {
            engine
                .try_save_settings()
                .context("Failed to save integration settings")?;
            println!("Saved {} integrations", engine.list_integrations().len());
        }
        SettingsAction::Reset => {
            engine
                .reset_settings()
                .context("Failed to reset integration settings")?;
            println!("Settings removed; built-in integrations apply on next start");
        }
        SettingsAction::Show => match engine.stored_settings()? {
            Some(json) => println!("{}", pretty_json(&json)),
            None => println!("No saved settings (using built-in integrations)"),
        },
    }
    Ok(())
}

/// Pretty-prints a stored record; unparsable records are shown as stored.
fn pretty_json(json: &str) -> String {
    serde_json::from_str::<serde_json::Value>(json)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| json.to_string())
}
