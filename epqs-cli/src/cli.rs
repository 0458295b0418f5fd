// CLI definition (clap derive)

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "epqs",
    about = "EPQS external integrations: tools, workflows and export templates",
    version
)]
pub struct Cli {
    /// Database file holding saved settings
    #[arg(long, env = "EPQS_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Run without durable storage (takes precedence over --db)
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List integrated tools
    Tools,
    /// Show one tool in detail
    Tool {
        /// Tool key (e.g. jamovi)
        key: String,
    },
    /// List workflows
    Workflows,
    /// Show one workflow step by step
    Workflow {
        /// Workflow key (e.g. fluxo_digital_twin)
        key: String,
    },
    /// List export templates
    Templates {
        /// Only templates offered for this tool
        #[arg(long)]
        tool: Option<String>,
    },
    /// Render an export template to a file
    Render {
        /// Template key (e.g. jamovi_cep)
        template: String,
        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the content instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Open a tool's download page in the browser
    Download {
        /// Tool key
        tool: String,
    },
    /// List guided tutorials
    Tutorials,
    /// Manage saved integration settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Save the current integration catalog
    Save,
    /// Remove saved settings; built-in integrations apply on next start
    Reset,
    /// Print the saved settings record
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["epqs", "render", "jamovi_cep", "--out", "/tmp/x"]).unwrap();
        match cli.command {
            Commands::Render {
                template,
                out,
                stdout,
            } => {
                assert_eq!(template, "jamovi_cep");
                assert_eq!(out, Some(PathBuf::from("/tmp/x")));
                assert!(!stdout);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_render_out_conflicts_with_stdout() {
        let result = Cli::try_parse_from(["epqs", "render", "jamovi_cep", "--out", "x", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_memory_flag() {
        let cli = Cli::try_parse_from(["epqs", "settings", "show", "--memory"]).unwrap();
        assert!(cli.memory);
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: SettingsAction::Show
            }
        ));
    }

    #[test]
    fn test_memory_flag_with_db_from_env() {
        std::env::set_var("EPQS_DB", "/tmp/epqs-cli-test.db");
        let parsed = Cli::try_parse_from(["epqs", "--memory", "tools"]);
        std::env::remove_var("EPQS_DB");

        let cli = parsed.unwrap();
        assert!(cli.memory);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/epqs-cli-test.db")));
    }

    #[test]
    fn test_memory_flag_with_explicit_db() {
        let cli = Cli::try_parse_from(["epqs", "--db", "x.db", "--memory", "tools"]).unwrap();
        assert!(cli.memory);
    }

    #[test]
    fn test_parse_templates_filter() {
        let cli = Cli::try_parse_from(["epqs", "templates", "--tool", "freecad"]).unwrap();
        assert!(matches!(cli.command, Commands::Templates { tool: Some(ref t) } if t == "freecad"));
    }
}
