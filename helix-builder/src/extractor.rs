//! Metadata extraction
//!
//! Checks that a project record carries everything needed to build a work
//! item. Missing required metadata is reported per field and the record is
//! skipped; nothing here is fatal to the batch.

use helix_core::domain::diagnostic::DiagnosticKind;
use helix_core::domain::project::{MetadataField, ProjectRecord};

use crate::diagnostics::DiagnosticSink;

const REQUIRED_FIELDS: [MetadataField; 3] = [
    MetadataField::PublishDirectory,
    MetadataField::TargetPath,
    MetadataField::RuntimeTargetFramework,
];

/// Metadata of a record that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProject {
    pub publish_directory: String,
    pub target_path: String,
    /// Checked for presence only
    pub runtime_target_framework: String,
    pub arguments: Option<String>,
    pub work_item_name: Option<String>,
    pub work_item_name_prefix: Option<String>,
}

/// Extracts the metadata of one record
///
/// Returns `None` when required metadata is missing, after reporting one
/// error per missing field. `index` is the record's input position and only
/// used to label diagnostics.
pub fn extract(
    record: &ProjectRecord,
    index: usize,
    sink: &dyn DiagnosticSink,
) -> Option<ExtractedProject> {
    let mut missing = false;
    for field in REQUIRED_FIELDS {
        if record.metadata(field).is_none() {
            sink.log(DiagnosticKind::MissingRequiredField {
                record: record.label(index),
                field,
            });
            missing = true;
        }
    }
    if missing {
        return None;
    }

    let value = |field| record.metadata(field).map(str::to_string);

    Some(ExtractedProject {
        publish_directory: value(MetadataField::PublishDirectory)?,
        target_path: value(MetadataField::TargetPath)?,
        runtime_target_framework: value(MetadataField::RuntimeTargetFramework)?,
        arguments: value(MetadataField::Arguments),
        work_item_name: value(MetadataField::WorkItemName),
        work_item_name_prefix: value(MetadataField::WorkItemNamePrefix),
    })
}
