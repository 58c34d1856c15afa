//! The project store: registry plus active-project pointer.
//!
//! Layout under the state directory:
//! ```text
//! state_dir/
//! ├── projects/
//! │   ├── demo/
//! │   │   └── project.json
//! │   └── other/
//! │       └── project.json
//! └── active_project.json
//! ```
//!
//! The registry is the directory listing itself: a subdirectory of
//! `projects/` counts as a project exactly when it carries the
//! `project.json` marker. `list()` returns projects in alphabetical
//! order by name.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use assistant_models::project::{is_valid_project_name, ProjectConfig, ProjectMeta, PROJECT_CONFIG_FILE};

use crate::error::{Result, StoreError};
use crate::fsio::{read_json_opt, write_json_atomic};

/// File holding the persisted active-project pointer.
const ACTIVE_STATE_FILE: &str = "active_project.json";

/// Subdirectory of the state dir holding one directory per project.
const PROJECTS_SUBDIR: &str = "projects";

/// Persisted shape of the active-project pointer.
#[derive(Debug, Serialize, Deserialize)]
struct ActiveState {
    active_project: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Manages the on-disk project registry and the active-project
/// pointer. All mutations of either go through this type.
pub struct ProjectStore {
    projects_dir: PathBuf,
    state_path: PathBuf,
    active: Option<String>,
}

impl ProjectStore {
    /// Opens the store under `state_dir`, creating the projects root
    /// if needed and restoring the persisted active-project pointer.
    ///
    /// A pointer that references a project which no longer exists on
    /// disk is discarded, keeping pointer and registry consistent.
    pub fn open(state_dir: impl Into<PathBuf>) -> Result<Self> {
        let state_dir = state_dir.into();
        let projects_dir = state_dir.join(PROJECTS_SUBDIR);
        if !projects_dir.exists() {
            fs::create_dir_all(&projects_dir).map_err(|source| StoreError::WriteError {
                path: projects_dir.clone(),
                source,
            })?;
        }

        let state_path = state_dir.join(ACTIVE_STATE_FILE);
        let mut store = Self {
            projects_dir,
            state_path,
            active: None,
        };

        if let Some(state) = read_json_opt::<ActiveState>(&store.state_path)? {
            match state.active_project {
                Some(name) if store.is_project(&name) => {
                    debug!(project = %name, "Restored active project");
                    store.active = Some(name);
                }
                Some(name) => {
                    warn!(project = %name, "Active project no longer exists, clearing pointer");
                }
                None => {}
            }
        }

        Ok(store)
    }

    /// Path of the projects root.
    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// Creates a new project directory and its marker.
    ///
    /// The directory creation itself is the exclusivity check:
    /// `fs::create_dir` fails atomically if the target exists, so two
    /// near-simultaneous creates of the same name cannot both succeed,
    /// even from separate processes.
    pub fn create(&mut self, name: &str) -> Result<ProjectMeta> {
        if !is_valid_project_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let path = self.projects_dir.join(name);
        fs::create_dir(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(name.to_string()),
            _ => StoreError::WriteError {
                path: path.clone(),
                source,
            },
        })?;

        let config = ProjectConfig::new(name);
        if let Err(e) = write_json_atomic(&path.join(PROJECT_CONFIG_FILE), &config) {
            // Roll the directory back so no unmarked directory is left
            // behind to shadow a later create.
            let _ = fs::remove_dir_all(&path);
            return Err(e);
        }

        info!(project = %name, path = %path.display(), "Created project");
        Ok(ProjectMeta::from_config(&config, path))
    }

    /// Lists all registered projects in alphabetical order by name.
    pub fn list(&self) -> Result<Vec<ProjectMeta>> {
        let entries = fs::read_dir(&self.projects_dir).map_err(|source| StoreError::ReadError {
            path: self.projects_dir.clone(),
            source,
        })?;

        let mut projects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::ReadError {
                path: self.projects_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match read_json_opt::<ProjectConfig>(&path.join(PROJECT_CONFIG_FILE)) {
                Ok(Some(config)) => projects.push(ProjectMeta::from_config(&config, path)),
                Ok(None) => {
                    debug!(path = %path.display(), "Skipping directory without project marker");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable project marker");
                }
            }
        }

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    /// Makes `name` the active project.
    ///
    /// The target is verified first and its marker is rewritten with
    /// the switch timestamp; the pointer is persisted before the
    /// in-memory value changes, so a failed switch leaves the
    /// previous pointer intact.
    pub fn switch(&mut self, name: &str) -> Result<ProjectMeta> {
        let path = self.projects_dir.join(name);
        let marker_path = path.join(PROJECT_CONFIG_FILE);
        let mut config: ProjectConfig = read_json_opt(&marker_path)?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        config.mark_switched();
        write_json_atomic(&marker_path, &config)?;

        write_json_atomic(
            &self.state_path,
            &ActiveState {
                active_project: Some(name.to_string()),
                updated_at: Utc::now(),
            },
        )?;

        self.active = Some(name.to_string());
        info!(project = %name, "Switched active project");
        Ok(ProjectMeta::from_config(&config, path))
    }

    /// Name of the active project, if any.
    pub fn get_active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Metadata of the active project, if any.
    pub fn active_meta(&self) -> Result<Option<ProjectMeta>> {
        match &self.active {
            Some(name) => self.load_meta(name).map(Some),
            None => Ok(None),
        }
    }

    /// Metadata for `name`, or for the active project when `name` is
    /// `None`.
    pub fn info(&self, name: Option<&str>) -> Result<ProjectMeta> {
        match name {
            Some(name) => self.load_meta(name),
            None => self
                .active_meta()?
                .ok_or(StoreError::NoActiveProject),
        }
    }

    /// Counts regular files inside a project, excluding the marker.
    pub fn file_count(&self, name: &str) -> Result<usize> {
        let meta = self.load_meta(name)?;
        count_files(&meta.path)
    }

    /// Returns true if `name` is a registered project (directory with
    /// marker).
    pub fn is_project(&self, name: &str) -> bool {
        let path = self.projects_dir.join(name);
        path.is_dir() && path.join(PROJECT_CONFIG_FILE).is_file()
    }

    fn load_meta(&self, name: &str) -> Result<ProjectMeta> {
        let path = self.projects_dir.join(name);
        let config: ProjectConfig = read_json_opt(&path.join(PROJECT_CONFIG_FILE))?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(ProjectMeta::from_config(&config, path))
    }
}

fn count_files(dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            count += count_files(&path)?;
        } else if path.file_name().is_some_and(|n| n != PROJECT_CONFIG_FILE) {
            count += 1;
        }
    }
    Ok(count)
}
