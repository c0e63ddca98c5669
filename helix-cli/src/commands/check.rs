//! Check command handler
//!
//! Runs the builder over a manifest and reports problems without writing any
//! work items.

use anyhow::Result;

use super::{BuildArgs, ensure_success, print_summary, run_builder};

/// Handle the check command
pub async fn handle_check_command(args: &BuildArgs) -> Result<()> {
    let (project_count, outcome) = run_builder(args).await?;

    print_summary(project_count, &outcome);

    ensure_success(&outcome)
}
