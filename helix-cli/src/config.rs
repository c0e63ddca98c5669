//! Configuration module
//!
//! Resolves the global settings for a run. Values are layered: command-line
//! flag, then environment variable (both handled by clap), then the manifest
//! `Settings` section, then built-in defaults.

use clap::ValueEnum;
use helix_core::domain::settings::GlobalSettings;
use helix_core::dto::manifest::ManifestSettings;
use std::path::PathBuf;

/// Shell flavor of the execution nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// sh/bash style `${VAR}` references
    Posix,
    /// Windows cmd style `%VAR%` references
    Native,
}

impl Shell {
    /// Shell flavor of the machine running the CLI
    pub fn host() -> Self {
        if cfg!(windows) {
            Shell::Native
        } else {
            Shell::Posix
        }
    }

    pub fn from_posix_flag(is_posix_shell: bool) -> Self {
        if is_posix_shell {
            Shell::Posix
        } else {
            Shell::Native
        }
    }
}

/// Settings overrides given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub shell: Option<Shell>,
    pub timeout: Option<String>,
    pub arguments: Option<String>,
}

/// Resolved configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest listing the projects
    pub manifest: PathBuf,

    /// Shell flavor used for the logger argument
    pub shell: Shell,

    /// Timeout text for every work item
    pub work_item_timeout: Option<String>,

    /// Arguments inserted after the assembly name
    pub global_arguments: Option<String>,
}

impl Config {
    /// Layers overrides on top of the manifest settings
    pub fn resolve(manifest: PathBuf, overrides: Overrides, settings: &ManifestSettings) -> Self {
        let shell = overrides
            .shell
            .or_else(|| settings.is_posix_shell.map(Shell::from_posix_flag))
            .unwrap_or_else(Shell::host);

        Self {
            manifest,
            shell,
            work_item_timeout: overrides
                .timeout
                .or_else(|| settings.work_item_timeout.clone()),
            global_arguments: overrides
                .arguments
                .or_else(|| settings.global_arguments.clone()),
        }
    }

    /// Global settings handed to the builder
    pub fn settings(&self) -> GlobalSettings {
        GlobalSettings {
            is_posix_shell: self.shell == Shell::Posix,
            work_item_timeout: self.work_item_timeout.clone(),
            global_arguments: self.global_arguments.clone(),
        }
    }
}
