//! Project types.
//!
//! A project is a named directory of source files under the configured
//! projects root. The directory carries a `project.json` marker written
//! at creation time; a directory without the marker is not a project.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the per-project marker written at creation time.
pub const PROJECT_CONFIG_FILE: &str = "project.json";

/// The persisted per-project marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name, identical to the directory name.
    pub name: String,

    /// When the project was created.
    pub created_at: DateTime<Utc>,

    /// When the project last became the active one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_switched_at: Option<DateTime<Utc>>,
}

impl ProjectConfig {
    /// Creates a marker for a freshly created project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            last_switched_at: None,
        }
    }

    /// Records that this project just became active.
    pub fn mark_switched(&mut self) {
        self.last_switched_at = Some(Utc::now());
    }
}

/// Metadata for one registered project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Unique, filesystem-safe project name.
    pub name: String,

    /// Absolute path of the project directory.
    pub path: PathBuf,

    /// When the project was created.
    pub created_at: DateTime<Utc>,

    /// When the project last became the active one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_switched_at: Option<DateTime<Utc>>,
}

impl ProjectMeta {
    /// Builds metadata from a project's marker and directory path.
    pub fn from_config(config: &ProjectConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            name: config.name.clone(),
            path: path.into(),
            created_at: config.created_at,
            last_switched_at: config.last_switched_at,
        }
    }
}

/// Validates a project name: non-empty, and only characters that are
/// safe as a directory name on every supported platform.
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
