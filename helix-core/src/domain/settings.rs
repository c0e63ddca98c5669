//! Global settings shared by every project in a run

use serde::{Deserialize, Serialize};

/// Settings applied to all work items created in one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSettings {
    /// Whether the execution node runs a POSIX shell
    pub is_posix_shell: bool,

    /// Timeout for every work item, in TimeSpan notation (e.g. "00:10:00")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_timeout: Option<String>,

    /// Arguments placed right after the assembly name in every command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_arguments: Option<String>,
}

impl GlobalSettings {
    /// Creates settings for the given shell flavor with no timeout or arguments
    pub fn new(is_posix_shell: bool) -> Self {
        Self {
            is_posix_shell,
            work_item_timeout: None,
            global_arguments: None,
        }
    }

    /// Sets the work item timeout text
    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.work_item_timeout = Some(timeout.into());
        self
    }

    /// Sets the global arguments
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.global_arguments = Some(arguments.into());
        self
    }
}
