//! Project record domain types

use serde::{Deserialize, Serialize};

/// A published test project as declared by the build
///
/// Every field is optional at this level; which ones are required is decided
/// by the extractor. Field names follow the MSBuild metadata spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectRecord {
    /// Item identity, usually the path of the test project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Directory holding the publish output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_directory: Option<String>,

    /// Path of the built test assembly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    /// Target framework moniker the tests run on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_target_framework: Option<String>,

    /// Extra arguments appended to the test command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,

    /// Explicit work item name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_name: Option<String>,

    /// Prefix for the derived work item name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_name_prefix: Option<String>,
}

/// Metadata keys a project record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataField {
    PublishDirectory,
    TargetPath,
    RuntimeTargetFramework,
    Arguments,
    WorkItemName,
    WorkItemNamePrefix,
}

impl MetadataField {
    /// Metadata name as it appears in manifests and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataField::PublishDirectory => "PublishDirectory",
            MetadataField::TargetPath => "TargetPath",
            MetadataField::RuntimeTargetFramework => "RuntimeTargetFramework",
            MetadataField::Arguments => "Arguments",
            MetadataField::WorkItemName => "WorkItemName",
            MetadataField::WorkItemNamePrefix => "WorkItemNamePrefix",
        }
    }
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProjectRecord {
    /// Looks up a metadata value
    ///
    /// Empty strings count as unset, matching how build metadata behaves.
    pub fn metadata(&self, field: MetadataField) -> Option<&str> {
        let value = match field {
            MetadataField::PublishDirectory => &self.publish_directory,
            MetadataField::TargetPath => &self.target_path,
            MetadataField::RuntimeTargetFramework => &self.runtime_target_framework,
            MetadataField::Arguments => &self.arguments,
            MetadataField::WorkItemName => &self.work_item_name,
            MetadataField::WorkItemNamePrefix => &self.work_item_name_prefix,
        };

        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Label used to attribute diagnostics to this record
    ///
    /// Falls back to the input position when the record has no identity.
    pub fn label(&self, index: usize) -> String {
        match self.identity.as_deref() {
            Some(identity) if !identity.is_empty() => identity.to_string(),
            _ => format!("project #{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_is_unset() {
        let record = ProjectRecord {
            publish_directory: Some(String::new()),
            target_path: Some("/out/a/A.dll".to_string()),
            ..Default::default()
        };

        assert_eq!(record.metadata(MetadataField::PublishDirectory), None);
        assert_eq!(
            record.metadata(MetadataField::TargetPath),
            Some("/out/a/A.dll")
        );
        assert_eq!(record.metadata(MetadataField::Arguments), None);
    }

    #[test]
    fn test_label_falls_back_to_index() {
        let mut record = ProjectRecord::default();
        assert_eq!(record.label(3), "project #3");

        record.identity = Some("tests/A/A.csproj".to_string());
        assert_eq!(record.label(3), "tests/A/A.csproj");
    }

    #[test]
    fn test_deserialize_metadata_names() {
        let json = r#"{
            "Identity": "tests/A/A.csproj",
            "PublishDirectory": "/out/a",
            "TargetPath": "/out/a/A.dll",
            "RuntimeTargetFramework": "net8.0",
            "WorkItemName": "a-tests",
            "Configuration": "Release"
        }"#;

        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.publish_directory.as_deref(), Some("/out/a"));
        assert_eq!(record.work_item_name.as_deref(), Some("a-tests"));
        assert_eq!(record.arguments, None);
    }
}
