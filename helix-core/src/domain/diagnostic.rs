//! Diagnostic domain types
//!
//! Diagnostics are the only channel through which the builder reports problems.
//! Errors mark the run as failed, warnings and info messages never do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::project::MetadataField;

/// A message produced while building work items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub timestamp: DateTime<Utc>,
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A required metadata value is absent or empty
    MissingRequiredField { record: String, field: MetadataField },

    /// The configured timeout could not be parsed
    InvalidTimeoutFormat { value: String },

    /// A work item was created
    WorkItemCreated {
        identity: String,
        payload_directory: String,
        command: String,
    },

    /// The task processing a record stopped unexpectedly
    TaskFailed { record: String, reason: String },
}

impl DiagnosticKind {
    /// Level this kind of diagnostic is reported at
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            DiagnosticKind::MissingRequiredField { .. } | DiagnosticKind::TaskFailed { .. } => {
                DiagnosticLevel::Error
            }
            DiagnosticKind::InvalidTimeoutFormat { .. } => DiagnosticLevel::Warning,
            DiagnosticKind::WorkItemCreated { .. } => DiagnosticLevel::Info,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::MissingRequiredField { record, field } => {
                write!(f, "Required metadata \"{}\" not found on \"{}\"", field, record)
            }
            DiagnosticKind::InvalidTimeoutFormat { value } => write!(
                f,
                "Invalid value \"{}\" provided for WorkItemTimeout; falling back to default value of \"00:05:00\" (5 minutes)",
                value
            ),
            DiagnosticKind::WorkItemCreated {
                identity,
                payload_directory,
                command,
            } => write!(
                f,
                "Creating work item with properties Identity: {}, PayloadDirectory: {}, Command: {}",
                identity, payload_directory, command
            ),
            DiagnosticKind::TaskFailed { record, reason } => {
                write!(f, "Processing of \"{}\" failed: {}", record, reason)
            }
        }
    }
}

impl Diagnostic {
    /// Creates a diagnostic stamped with the current time
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            timestamp: Utc::now(),
            level: kind.level(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.level, self.kind)
    }
}
