//! Diagnostic sink
//!
//! Collects diagnostics reported while work items are built. Tasks for
//! different records report concurrently, so sinks must be shareable across
//! threads. Entries are only ever appended.

use helix_core::domain::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLevel};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

/// Destination for builder diagnostics
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic
    fn report(&self, diagnostic: Diagnostic);

    /// Returns a snapshot of everything reported so far
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// Whether any error-level diagnostic has been reported
    fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(Diagnostic::is_error)
    }

    /// Records a diagnostic of the given kind, stamped now
    fn log(&self, kind: DiagnosticKind) {
        self.report(Diagnostic::new(kind));
    }
}

/// In-memory implementation of DiagnosticSink
///
/// Every entry is also forwarded to `tracing` at the matching level.
#[derive(Clone, Default)]
pub struct InMemoryDiagnostics {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl InMemoryDiagnostics {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // Entries are append-only, so a poisoned lock still holds valid data
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for InMemoryDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Error => error!("{}", diagnostic.kind),
            DiagnosticLevel::Warning => warn!("{}", diagnostic.kind),
            DiagnosticLevel::Info => info!("{}", diagnostic.kind),
        }

        self.entries().push(diagnostic);
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }

    fn has_errors(&self) -> bool {
        self.entries().iter().any(Diagnostic::is_error)
    }
}
