//! Manifest describing the projects to turn into work items

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::project::ProjectRecord;
use crate::error::ManifestError;

/// Settings section of a manifest
///
/// Every value is optional so the command line can fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestSettings {
    #[serde(default)]
    pub is_posix_shell: Option<bool>,
    #[serde(default)]
    pub work_item_timeout: Option<String>,
    #[serde(default)]
    pub global_arguments: Option<String>,
}

/// Projects plus optional settings, as written by the build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manifest {
    #[serde(default)]
    pub settings: ManifestSettings,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

impl Manifest {
    /// Parses a manifest from JSON text
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let json = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }
}
