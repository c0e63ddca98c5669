//! Helix Builder
//!
//! Turns published test projects into Helix work items.
//!
//! Architecture:
//! - Extractor: validates required metadata on each project record
//! - Synthesizer: builds the test command, resolves timeout and name
//! - Diagnostics: thread-safe sink collecting errors, warnings and info
//! - Builder: fans out one task per record and gathers the results
//!
//! Invalid records are reported and dropped; they never stop the rest of the batch.

pub mod builder;
pub mod diagnostics;
pub mod extractor;
pub mod synthesizer;

pub use builder::{BuildOutcome, WorkItemBuilder};
pub use diagnostics::{DiagnosticSink, InMemoryDiagnostics};
pub use extractor::{ExtractedProject, extract};
pub use synthesizer::synthesize;
