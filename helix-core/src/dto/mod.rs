//! Data Transfer Objects
//!
//! Serialized shapes exchanged with the outside world: the manifest describing
//! the projects to convert, and the work item records handed to the execution grid.

pub mod manifest;
pub mod work_item;
