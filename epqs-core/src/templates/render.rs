//! Template renderer.
//!
//! Pure mapping from an [`ExportTemplate`] to a [`RenderedArtifact`]. Output is
//! deterministic: rendering the same definition twice yields identical bytes.

use tracing::debug;

use super::types::{Column, ExportTemplate, RenderedArtifact, TemplateBody};

/// Footer line stamped on generated script and config files.
const GENERATED_BY: &str = "Gerado automaticamente pelo EPQS";

/// Built-in JaamSim object types declared at the top of every model.
const JAAMSIM_OBJECT_TYPES: &[&str] = &["EntityGenerator", "Queue", "Server", "EntitySink"];

/// Separator between an entity label and its description.
const ENTITY_SEPARATOR: &str = " →";

/// Renders a template into a downloadable artifact.
pub fn render(template: &ExportTemplate) -> RenderedArtifact {
    let content = match &template.body {
        TemplateBody::Csv { columns, .. } => {
            render_csv(&template.name, &template.description, columns)
        }
        TemplateBody::PythonScript { components, .. } => {
            render_python(&template.name, &template.description, components)
        }
        TemplateBody::Cfg {
            entities,
            parameters,
        } => render_cfg(&template.name, &template.description, entities, parameters),
        TemplateBody::Other { .. } => format!("{:#}", template.to_json()),
    };

    debug!(
        template = %template.key,
        format = template.format_tag(),
        bytes = content.len(),
        "Rendered export template"
    );

    RenderedArtifact {
        content,
        filename: format!("{}_template.{}", template.key, template.body.extension()),
        media_type: template.body.media_type(),
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Header row, one sample row, then a two-line comment footer.
fn render_csv(name: &str, description: &str, columns: &[Column]) -> String {
    let header: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let sample: Vec<&str> = columns.iter().map(|c| c.kind.sample_value()).collect();

    format!(
        "{}\n{}\n# {}\n# {}",
        header.join(","),
        sample.join(","),
        name,
        description
    )
}

// ============================================================================
// Python Script
// ============================================================================

fn render_python(name: &str, description: &str, components: &[String]) -> String {
    let mut lines: Vec<String> = vec![
        "#!/usr/bin/env python3".to_string(),
        "\"\"\"".to_string(),
        name.to_string(),
        description.to_string(),
        String::new(),
        GENERATED_BY.to_string(),
        "\"\"\"".to_string(),
        String::new(),
        "import FreeCAD as App".to_string(),
        "import FreeCADGui as Gui".to_string(),
        "import Part".to_string(),
        "import Draft".to_string(),
        String::new(),
        "def create_layout():".to_string(),
        "    \"\"\"Criar layout de fábrica\"\"\"".to_string(),
        "    doc = App.newDocument(\"Factory_Layout\")".to_string(),
        String::new(),
        "    # Adicionar componentes do layout".to_string(),
    ];

    for component in components {
        lines.push(String::new());
        lines.push(format!("    # {}", component));
        lines.push("    # Adicionar código específico aqui".to_string());
    }

    lines.extend(
        [
            "",
            "    doc.recompute()",
            "    return doc",
            "",
            "if __name__ == \"__main__\":",
            "    layout_doc = create_layout()",
            "    print(\"Layout criado com sucesso!\")",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

// ============================================================================
// JaamSim Config
// ============================================================================

/// Label part of an entity entry: the text before the first `" →"`.
fn entity_label(entity: &str) -> &str {
    entity
        .split_once(ENTITY_SEPARATOR)
        .map_or(entity, |(label, _)| label)
}

fn render_cfg(name: &str, description: &str, entities: &[String], parameters: &[String]) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", name),
        format!("# {}", description),
        format!("# {}", GENERATED_BY),
        String::new(),
        "Define ObjectType {".to_string(),
    ];
    lines.extend(JAAMSIM_OBJECT_TYPES.iter().map(|t| format!("    {}", t)));
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push("# Configurações do modelo".to_string());
    for entity in entities {
        let label = entity_label(entity);
        lines.push(String::new());
        lines.push(format!("# {}", entity));
        lines.push(format!("Define {} {{ Example{} }}", label, label));
    }
    lines.push(String::new());

    lines.push("# Parâmetros do processo".to_string());
    for parameter in parameters {
        lines.push(String::new());
        lines.push(format!("# {}: [valor]", parameter));
    }
    lines.push(String::new());

    lines.push("# Executar simulação".to_string());
    lines.push("Define SimEntity { DefaultEntity }".to_string());
    lines.push("Define View { View1 }".to_string());

    let mut config = lines.join("\n");
    config.push('\n');
    config
}
