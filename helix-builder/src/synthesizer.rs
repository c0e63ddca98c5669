//! Command synthesis
//!
//! Builds the finished work item for a validated project: the `dotnet test`
//! command line, the timeout and the work item name.

use helix_core::domain::diagnostic::DiagnosticKind;
use helix_core::domain::settings::GlobalSettings;
use helix_core::domain::work_item::{DEFAULT_TIMEOUT, WorkItem};
use helix_core::timespan;
use std::time::Duration;
use tracing::debug;

use crate::diagnostics::DiagnosticSink;
use crate::extractor::ExtractedProject;

/// Fixed command prefix launching the test runner
pub const RUNNER_INVOCATION: &str = "dotnet test";

/// Logger argument for POSIX shells
pub const POSIX_LOGGER_ARGUMENT: &str =
    r#"--logger "trx;LogFileName=${HELIX_WORKITEM_ROOT}/testResults.trx""#;

/// Logger argument for Windows command shells
pub const NATIVE_LOGGER_ARGUMENT: &str =
    r#"--logger "trx;LogFileName=%HELIX_WORKITEM_ROOT%\testResults.trx""#;

/// Builds the work item for a validated project
///
/// Never fails; an unparseable timeout is reported as a warning and replaced
/// by the default.
pub fn synthesize(
    project: &ExtractedProject,
    settings: &GlobalSettings,
    sink: &dyn DiagnosticSink,
) -> WorkItem {
    let assembly = assembly_name(&project.target_path);
    let command = build_command(assembly, project.arguments.as_deref(), settings);

    sink.log(DiagnosticKind::WorkItemCreated {
        identity: assembly.to_string(),
        payload_directory: project.publish_directory.clone(),
        command: command.clone(),
    });

    WorkItem {
        name: resolve_name(project, assembly),
        payload_directory: project.publish_directory.clone(),
        command,
        timeout: resolve_timeout(settings.work_item_timeout.as_deref(), sink),
    }
}

/// File name component of the target path
///
/// Both separators are honored so paths produced on Windows resolve the same
/// on every host.
pub fn assembly_name(target_path: &str) -> &str {
    target_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(target_path)
}

/// Logger argument for the given shell flavor
pub fn logger_argument(is_posix_shell: bool) -> &'static str {
    if is_posix_shell {
        POSIX_LOGGER_ARGUMENT
    } else {
        NATIVE_LOGGER_ARGUMENT
    }
}

/// Assembles the test command
///
/// Layout: runner, assembly, global arguments (when set), logger argument,
/// then the project arguments. The separator before the project arguments is
/// always written, even when there are none.
pub fn build_command(
    assembly: &str,
    arguments: Option<&str>,
    settings: &GlobalSettings,
) -> String {
    let mut command = format!("{} {}", RUNNER_INVOCATION, assembly);

    if let Some(global_arguments) = &settings.global_arguments {
        command.push(' ');
        command.push_str(global_arguments);
    }

    command.push(' ');
    command.push_str(logger_argument(settings.is_posix_shell));

    command.push(' ');
    command.push_str(arguments.unwrap_or_default());

    command
}

/// Resolves the work item timeout
///
/// Unset or empty text yields the default silently. Text that does not parse
/// yields the default and a warning echoing the text.
pub fn resolve_timeout(work_item_timeout: Option<&str>, sink: &dyn DiagnosticSink) -> Duration {
    let Some(text) = work_item_timeout.filter(|t| !t.is_empty()) else {
        return DEFAULT_TIMEOUT;
    };

    match timespan::parse(text) {
        Ok(timeout) => timeout,
        Err(e) => {
            debug!("Rejected work item timeout {:?}: {}", text, e);
            sink.log(DiagnosticKind::InvalidTimeoutFormat {
                value: text.to_string(),
            });
            DEFAULT_TIMEOUT
        }
    }
}

/// Resolves the work item name
///
/// An explicit `WorkItemName` wins. Otherwise the assembly file name is used.
/// `WorkItemNamePrefix` is currently never applied: the established behavior
/// only concatenated the prefix when it was unset. Kept that way until the
/// intended precedence is confirmed.
pub fn resolve_name(project: &ExtractedProject, assembly: &str) -> String {
    match &project.work_item_name {
        Some(name) => name.clone(),
        None => assembly.to_string(),
    }
}
