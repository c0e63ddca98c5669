//! Work item DTO handed to the execution grid

use serde::{Deserialize, Serialize};

use crate::domain::work_item::WorkItem;
use crate::timespan;

/// Serialized work item
///
/// Keys follow the Helix work item metadata names and the timeout is rendered
/// as TimeSpan text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkItemDto {
    pub identity: String,
    pub payload_directory: String,
    pub command: String,
    pub timeout: String,
}

impl From<WorkItem> for WorkItemDto {
    fn from(work_item: WorkItem) -> Self {
        Self {
            identity: work_item.name,
            payload_directory: work_item.payload_directory,
            command: work_item.command,
            timeout: timespan::format(work_item.timeout),
        }
    }
}
