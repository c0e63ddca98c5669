//! Create command handler
//!
//! Builds work items from a manifest and writes them as a JSON array, either
//! to a file or to stdout.

use anyhow::{Context, Result};
use helix_core::dto::work_item::WorkItemDto;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{BuildArgs, ensure_success, print_summary, run_builder};

/// Handle the create command
///
/// Work items of valid projects are written even when other projects failed;
/// the failure is still reported through the returned error.
pub async fn handle_create_command(
    args: &BuildArgs,
    output: Option<&Path>,
    sort: bool,
) -> Result<()> {
    let (project_count, mut outcome) = run_builder(args).await?;

    if sort {
        outcome.sort_by_name();
    }

    let work_items: Vec<WorkItemDto> = outcome
        .work_items
        .iter()
        .cloned()
        .map(WorkItemDto::from)
        .collect();
    let json = serde_json::to_string_pretty(&work_items).context("Failed to serialize work items")?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write work items to {:?}", path))?;
            info!("Wrote {} work item(s) to {:?}", work_items.len(), path);
        }
        None => println!("{}", json),
    }

    print_summary(project_count, &outcome);

    ensure_success(&outcome)
}
