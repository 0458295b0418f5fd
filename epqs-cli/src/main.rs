//! EPQS command-line front end
//!
//! Lists the integrated tools, workflows and export templates, renders
//! templates to files and manages saved integration settings.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use epqs_core::{Database, IntegrationEngine};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

const DEFAULT_LOG_FILTER: &str = "warn,epqs_core=info,epqs=info";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting EPQS v{}", epqs_core::VERSION);

    let db = open_database(&cli)?;
    let mut engine = IntegrationEngine::start(db)?;

    match cli.command {
        Commands::Tools => commands::list_tools(&engine),
        Commands::Tool { key } => commands::show_tool(&engine, &key)?,
        Commands::Workflows => commands::list_workflows(&engine),
        Commands::Workflow { key } => commands::show_workflow(&engine, &key)?,
        Commands::Templates { tool } => commands::list_templates(&engine, tool.as_deref()),
        Commands::Render {
            template,
            out,
            stdout,
        } => commands::render(&engine, &template, out.as_deref(), stdout)?,
        Commands::Download { tool } => commands::download(&engine, &tool)?,
        Commands::Tutorials => commands::list_tutorials(&engine),
        Commands::Settings { action } => commands::settings(&mut engine, action)?,
    }

    Ok(())
}

/// Open the settings database.
///
/// Falls back to an in-memory database when the file can't be opened or
/// migrated, so catalog commands keep working without durable storage.
fn open_database(cli: &Cli) -> Result<Database> {
    if !cli.memory {
        let opened = match &cli.db {
            Some(path) => Database::open_at(path.clone()),
            None => Database::open(),
        };
        match opened.and_then(|db| db.migrate().map(|()| db)) {
            Ok(db) => {
                if let Some(path) = db.path() {
                    tracing::debug!(path = %path.display(), "Using settings database");
                }
                return Ok(db);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open settings database, using in-memory storage");
            }
        }
    }

    let db = Database::open_in_memory()?;
    db.migrate()?;
    Ok(db)
}
