//! Work item domain types

use std::time::Duration;

/// Default timeout for a work item when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// A unit of work ready for the execution grid
///
/// Produced once per valid project record and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Work item name, unique within a submission
    pub name: String,

    /// Directory shipped to the execution node
    pub payload_directory: String,

    /// Shell command run on the node
    pub command: String,

    /// Maximum run time on the node
    pub timeout: Duration,
}
