//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod check;
mod create;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use helix_builder::{BuildOutcome, WorkItemBuilder};
use helix_core::domain::diagnostic::DiagnosticLevel;
use helix_core::dto::manifest::Manifest;
use std::path::PathBuf;
use tracing::info;

use crate::config::{Config, Overrides, Shell};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create work items and write them as JSON
    Create {
        #[command(flatten)]
        build: BuildArgs,

        /// File to write the work items to (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort work items by name
        #[arg(long)]
        sort: bool,
    },
    /// Check a manifest without writing work items
    Check {
        #[command(flatten)]
        build: BuildArgs,
    },
}

/// Arguments shared by every command that runs the builder
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Manifest listing the published test projects
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Shell flavor of the execution nodes
    #[arg(long, env = "HELIX_SHELL", value_enum)]
    pub shell: Option<Shell>,

    /// Timeout for every work item, e.g. 00:10:00
    #[arg(long, env = "HELIX_WORKITEM_TIMEOUT")]
    pub timeout: Option<String>,

    /// Arguments inserted after the test assembly in every command
    #[arg(long, env = "HELIX_ARGUMENTS", allow_hyphen_values = true)]
    pub arguments: Option<String>,
}

impl BuildArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            shell: self.shell,
            timeout: self.timeout.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Create {
            build,
            output,
            sort,
        } => create::handle_create_command(&build, output.as_deref(), sort).await,
        Commands::Check { build } => check::handle_check_command(&build).await,
    }
}

/// Loads the manifest, resolves configuration and runs the builder
///
/// Returns the number of projects read along with the outcome.
async fn run_builder(args: &BuildArgs) -> Result<(usize, BuildOutcome)> {
    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest {:?}", args.manifest))?;

    let config = Config::resolve(args.manifest.clone(), args.overrides(), &manifest.settings);

    info!(
        "Loaded {} project(s) from {:?} (shell: {:?})",
        manifest.projects.len(),
        config.manifest,
        config.shell
    );

    let project_count = manifest.projects.len();
    let builder = WorkItemBuilder::new(config.settings());
    let outcome = builder.build(manifest.projects).await;

    Ok((project_count, outcome))
}

/// Prints a colored summary of the run to stderr
///
/// Individual errors and warnings already reach stderr through `tracing`.
fn print_summary(project_count: usize, outcome: &BuildOutcome) {
    let line = summary_line(project_count, outcome);
    if outcome.success {
        eprintln!("{} {}", "✓".green().bold(), line);
    } else {
        eprintln!("{} {}", "✗".red().bold(), line);
    }
}

/// One-line description of a run
fn summary_line(project_count: usize, outcome: &BuildOutcome) -> String {
    let count = |level: DiagnosticLevel| {
        outcome
            .diagnostics
            .iter()
            .filter(|d| d.level == level)
            .count()
    };

    format!(
        "{} work item(s) from {} project(s), {} error(s), {} warning(s)",
        outcome.work_items.len(),
        project_count,
        count(DiagnosticLevel::Error),
        count(DiagnosticLevel::Warning)
    )
}

/// Turns a failed run into an error for the process exit status
fn ensure_success(outcome: &BuildOutcome) -> Result<()> {
    if !outcome.success {
        anyhow::bail!(
            "work item creation failed with {} error(s)",
            outcome.errors().count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::domain::diagnostic::{Diagnostic, DiagnosticKind};
    use helix_core::domain::project::MetadataField;

    #[test]
    fn test_summary_line_counts_only() {
        let outcome = BuildOutcome {
            work_items: Vec::new(),
            diagnostics: vec![
                Diagnostic::new(DiagnosticKind::MissingRequiredField {
                    record: "tests/A/A.csproj".to_string(),
                    field: MetadataField::TargetPath,
                }),
                Diagnostic::new(DiagnosticKind::InvalidTimeoutFormat {
                    value: "soon".to_string(),
                }),
            ],
            success: false,
        };

        let line = summary_line(1, &outcome);

        assert_eq!(
            line,
            "0 work item(s) from 1 project(s), 1 error(s), 1 warning(s)"
        );
        assert!(!line.contains("TargetPath"));
    }
}
