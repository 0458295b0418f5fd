//! Integration engine.
//!
//! `IntegrationEngine` owns the integration, workflow and export template
//! catalogs plus the settings store. It is constructed once at start-up and
//! handed to the presentation layer, which only reads from it (apart from
//! saving settings).

use tracing::{debug, info};
use url::Url;

use crate::config::{SettingsError, SettingsSlot, SettingsStore};
use crate::error::CatalogError;
use crate::integrations::{IntegrationCatalog, IntegrationDescriptor};
use crate::templates::{self, ExportTemplate, ExportTemplateCatalog, RenderedArtifact};
use crate::tutorials::{all_tutorials, find_tutorial, Tutorial};
use crate::workflows::{WorkflowCatalog, WorkflowDefinition, WorkflowStep};

pub struct IntegrationEngine<S> {
    integrations: IntegrationCatalog,
    workflows: WorkflowCatalog,
    templates: ExportTemplateCatalog,
    store: SettingsStore<S>,
}

impl<S: SettingsSlot> IntegrationEngine<S> {
    /// Starts the engine with the built-in catalogs.
    ///
    /// Persisted overrides are read from `slot` and applied to the integration
    /// catalog before the engine is returned. Unreadable settings fall back to
    /// the built-ins; only a defective built-in catalog is an error.
    pub fn start(slot: S) -> Result<Self, CatalogError> {
        let integrations = IntegrationCatalog::builtin()?;
        let workflows = WorkflowCatalog::builtin()?;
        let templates = ExportTemplateCatalog::builtin()?;
        Self::with_catalogs(integrations, workflows, templates, slot)
    }

    /// Starts the engine with explicit catalogs.
    ///
    /// Workflow step tools are checked against `integrations` as built, before
    /// any override is applied.
    pub fn with_catalogs(
        mut integrations: IntegrationCatalog,
        workflows: WorkflowCatalog,
        templates: ExportTemplateCatalog,
        slot: S,
    ) -> Result<Self, CatalogError> {
        workflows.validate_tools(&integrations)?;

        let store = SettingsStore::new(slot);
        let overrides = store.load();
        if !overrides.is_empty() {
            info!(entries = overrides.len(), "Applying integration settings");
        }
        integrations.apply_overrides(overrides);

        info!(
            integrations = integrations.len(),
            workflows = workflows.len(),
            templates = templates.len(),
            "Integration engine started"
        );

        Ok(Self {
            integrations,
            workflows,
            templates,
            store,
        })
    }

    // ========================================================================
    // Integrations
    // ========================================================================

    pub fn get_integration(&self, key: &str) -> Option<&IntegrationDescriptor> {
        self.integrations.get(key)
    }

    pub fn list_integrations(&self) -> Vec<(&str, &IntegrationDescriptor)> {
        self.integrations.list()
    }

    pub fn integrations(&self) -> &IntegrationCatalog {
        &self.integrations
    }

    /// Download page of a tool, if the tool exists and has a valid URL.
    pub fn download_url(&self, tool_key: &str) -> Option<Url> {
        self.integrations.get(tool_key)?.download_link()
    }

    // ========================================================================
    // Workflows
    // ========================================================================

    pub fn get_workflow(&self, key: &str) -> Option<&WorkflowDefinition> {
        self.workflows.get(key)
    }

    pub fn list_workflows(&self) -> Vec<(&str, &WorkflowDefinition)> {
        self.workflows.list()
    }

    /// Display name for the tool of a workflow step.
    ///
    /// Falls back to the upper-cased key when no integration matches, which is
    /// how the host step shows as `EPQS`.
    pub fn step_tool_label(&self, step: &WorkflowStep) -> String {
        match self.integrations.get(&step.tool) {
            Some(integration) => integration.name.clone(),
            None => step.tool.to_uppercase(),
        }
    }

    // ========================================================================
    // Export Templates
    // ========================================================================

    pub fn get_export_template(&self, key: &str) -> Option<&ExportTemplate> {
        self.templates.get(key)
    }

    pub fn list_export_templates(&self) -> Vec<&ExportTemplate> {
        self.templates.list()
    }

    /// Templates offered for export from a tool's card.
    pub fn export_candidates_for(&self, tool_key: &str) -> Vec<&ExportTemplate> {
        self.templates.find_by_tool_key(tool_key)
    }

    /// Renders a template by key. `None` if the key is unknown.
    pub fn render(&self, template_key: &str) -> Option<RenderedArtifact> {
        let template = self.templates.get(template_key)?;
        debug!(template = %template_key, "Rendering export template");
        Some(templates::render(template))
    }

    // ========================================================================
    // Tutorials
    // ========================================================================

    pub fn tutorials(&self) -> &'static [Tutorial] {
        all_tutorials()
    }

    pub fn tutorial(&self, action: &str) -> Option<&'static Tutorial> {
        find_tutorial(action)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Persists the current integration catalog. Failures are logged only.
    pub fn save_settings(&mut self) {
        self.store.save(&self.integrations);
    }

    /// Persists the current integration catalog, reporting failures.
    pub fn try_save_settings(&mut self) -> Result<(), SettingsError> {
        self.store.try_save(&self.integrations)
    }

    /// Removes persisted settings. The running catalog is unchanged.
    pub fn reset_settings(&mut self) -> Result<(), SettingsError> {
        self.store.clear()
    }

    /// The persisted override record as stored.
    pub fn stored_settings(&self) -> Result<Option<String>, SettingsError> {
        self.store.stored_json()
    }

    /// Shuts the engine down and returns the storage slot.
    pub fn into_slot(self) -> S {
        self.store.into_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemorySlot, STORAGE_KEY};
    use crate::db::Database;
    use crate::integrations::IntegrationStatus;
    use crate::workflows::builtin_workflows;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn engine() -> IntegrationEngine<MemorySlot> {
        IntegrationEngine::start(MemorySlot::new()).unwrap()
    }

    fn engine_with_settings(json: &str) -> IntegrationEngine<MemorySlot> {
        IntegrationEngine::start(MemorySlot::with_value(STORAGE_KEY, json)).unwrap()
    }

    // -------------------------------------------------------------------------
    // Start-up
    // -------------------------------------------------------------------------

    #[test]
    fn test_start_with_builtins() {
        let engine = engine();

        let keys: Vec<&str> = engine.list_integrations().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["jamovi", "freecad", "jaamsim"]);
        assert_eq!(engine.list_workflows().len(), 3);
        assert_eq!(engine.list_export_templates().len(), 4);
    }

    #[test]
    fn test_start_applies_overrides() {
        let engine = engine_with_settings(r#"{"jamovi": {"name": "X"}}"#);

        let jamovi = engine.get_integration("jamovi").unwrap();
        assert_eq!(
            jamovi,
            &IntegrationDescriptor {
                name: "X".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(jamovi.status, IntegrationStatus::Unavailable);

        let builtins = IntegrationCatalog::builtin().unwrap();
        assert_eq!(engine.get_integration("freecad"), builtins.get("freecad"));
        assert_eq!(engine.get_integration("jaamsim"), builtins.get("jaamsim"));
    }

    #[test]
    fn test_start_adds_unknown_override_keys() {
        let engine = engine_with_settings(r#"{"foo": {"name": "Foo"}}"#);

        assert_eq!(engine.get_integration("foo").unwrap().name, "Foo");
        assert_eq!(engine.list_integrations().len(), 4);
    }

    #[test]
    fn test_start_with_corrupt_settings_uses_builtins() {
        let engine = engine_with_settings("]]]");

        assert_eq!(engine.get_integration("jamovi").unwrap().name, "Jamovi");
        assert_eq!(engine.list_integrations().len(), 3);
        assert_eq!(engine.stored_settings().unwrap().as_deref(), Some("]]]"));
    }

    #[test]
    fn test_start_with_null_fields_keeps_overrides() {
        let engine = engine_with_settings(
            r#"{"jamovi": {"name": "X", "status": null}, "freecad": {"name": "FreeCAD 1.0", "capabilities": null}}"#,
        );

        let jamovi = engine.get_integration("jamovi").unwrap();
        assert_eq!(jamovi.name, "X");
        assert_eq!(jamovi.status, IntegrationStatus::Unavailable);

        let freecad = engine.get_integration("freecad").unwrap();
        assert_eq!(freecad.name, "FreeCAD 1.0");
        assert!(freecad.capabilities.is_empty());
    }

    #[test]
    fn test_start_rejects_unknown_step_tool() {
        let integrations = IntegrationCatalog::from_entries(Vec::new()).unwrap();
        let result = IntegrationEngine::with_catalogs(
            integrations,
            WorkflowCatalog::builtin().unwrap(),
            ExportTemplateCatalog::builtin().unwrap(),
            MemorySlot::new(),
        );

        assert!(matches!(
            result,
            Err(CatalogError::UnknownStepTool { .. })
        ));
    }

    #[test]
    fn test_step_tools_checked_before_overrides() {
        // An emptied freecad record must not fail workflow validation.
        let engine = engine_with_settings(r#"{"freecad": {}}"#);
        assert_eq!(engine.get_integration("freecad").unwrap().name, "");
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    #[test]
    fn test_missing_keys_are_none() {
        let engine = engine();
        assert!(engine.get_integration("minitab").is_none());
        assert!(engine.get_workflow("minitab").is_none());
        assert!(engine.get_export_template("minitab").is_none());
        assert!(engine.render("minitab").is_none());
        assert!(engine.download_url("minitab").is_none());
        assert!(engine.tutorial("showMinitabTutorial").is_none());
    }

    #[test]
    fn test_get_workflow_by_derived_key() {
        let engine = engine();
        for workflow in builtin_workflows() {
            let found = engine.get_workflow(&workflow.key()).unwrap();
            assert_eq!(found.name, workflow.name);
        }
    }

    #[test]
    fn test_step_tool_label() {
        let engine = engine();

        let labels: Vec<String> = engine
            .list_workflows()
            .iter()
            .flat_map(|(_, workflow)| workflow.steps.iter())
            .map(|step| engine.step_tool_label(step))
            .collect();
        assert!(labels.contains(&"FreeCAD".to_string()));
        assert!(labels.contains(&"EPQS".to_string()));
    }

    #[test]
    fn test_step_tool_label_follows_overrides() {
        let engine = engine_with_settings(r#"{"jamovi": {"name": "Jamovi 3"}}"#);
        let step = WorkflowStep {
            tool: "jamovi".to_string(),
            action: "Análise".to_string(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        assert_eq!(engine.step_tool_label(&step), "Jamovi 3");
    }

    #[test]
    fn test_download_url() {
        let engine = engine();
        let url = engine.download_url("jamovi").unwrap();
        assert_eq!(url.host_str(), Some("jamovi.org"));

        let engine = engine_with_settings(r#"{"jamovi": {"downloadUrl": "not a url"}}"#);
        assert!(engine.download_url("jamovi").is_none());
    }

    #[test]
    fn test_tutorials() {
        let engine = engine();
        assert_eq!(engine.tutorials().len(), 4);
        assert_eq!(
            engine.tutorial("showJamoviTutorial").unwrap().title,
            "Primeiros Passos com Jamovi"
        );
    }

    // -------------------------------------------------------------------------
    // Export and Rendering
    // -------------------------------------------------------------------------

    #[test]
    fn test_export_candidates_for() {
        let engine = engine();

        let keys: Vec<&str> = engine
            .export_candidates_for("jamovi")
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        assert_eq!(keys, vec!["jamovi_cep", "jamovi_quality"]);
        assert!(engine.export_candidates_for("minitab").is_empty());
    }

    #[test]
    fn test_render_jamovi_cep() {
        let engine = engine();
        let artifact = engine.render("jamovi_cep").unwrap();

        assert_eq!(artifact.filename, "jamovi_cep_template.csv");
        assert_eq!(artifact.media_type, "text/csv");

        let mut lines = artifact.content.lines();
        assert_eq!(
            lines.next(),
            Some("sample_id,timestamp,measurement,operator,machine,shift,specification_lower,specification_upper")
        );
        assert_eq!(
            lines.next(),
            Some("1,2024-01-01 12:00:00,1.0,Sample,Sample,Sample,1.0,1.0")
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let engine = engine();
        for template in engine.list_export_templates() {
            assert_eq!(engine.render(&template.key), engine.render(&template.key));
        }
    }

    #[test]
    fn test_render_does_not_touch_settings() {
        let engine = engine();
        engine.render("freecad_layout").unwrap();
        assert!(engine.stored_settings().unwrap().is_none());
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    #[test]
    fn test_save_settings_round_trip() {
        let mut engine = engine_with_settings(r#"{"jaamsim": {"name": "JaamSim 2"}}"#);
        engine.save_settings();

        let restarted = IntegrationEngine::start(engine.into_slot()).unwrap();
        assert_eq!(restarted.get_integration("jaamsim").unwrap().name, "JaamSim 2");
        assert_eq!(restarted.get_integration("jamovi").unwrap().name, "Jamovi");
    }

    #[test]
    fn test_reset_settings() {
        let mut engine = engine_with_settings(r#"{"jamovi": {"name": "X"}}"#);
        engine.reset_settings().unwrap();

        // Running catalog keeps the override until restart.
        assert_eq!(engine.get_integration("jamovi").unwrap().name, "X");

        let restarted = IntegrationEngine::start(engine.into_slot()).unwrap();
        assert_eq!(restarted.get_integration("jamovi").unwrap().name, "Jamovi");
    }

    #[test]
    fn test_sqlite_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("epqs.db");

        {
            let db = Database::open_at(path.clone()).unwrap();
            db.migrate().unwrap();
            db.set_setting(STORAGE_KEY, r#"{"freecad": {"name": "FreeCAD 1.0"}}"#)
                .unwrap();

            let mut engine = IntegrationEngine::start(db).unwrap();
            assert_eq!(engine.get_integration("freecad").unwrap().name, "FreeCAD 1.0");
            engine.try_save_settings().unwrap();
        }

        let db = Database::open_at(path).unwrap();
        db.migrate().unwrap();
        let engine = IntegrationEngine::start(db).unwrap();

        let keys: Vec<&str> = engine.list_integrations().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["jamovi", "freecad", "jaamsim"]);
        assert_eq!(engine.get_integration("freecad").unwrap().name, "FreeCAD 1.0");
    }
}
