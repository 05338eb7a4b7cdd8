//! Project discovery and layout
//!
//! A Tiller project is a directory tree with one subdirectory per record type
//! and a `.tiller/` directory for project-local state (config, short-id index,
//! view preferences). Commands discover the project root by walking up from
//! the current directory, the same way git finds `.git`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::core::identity::EntityPrefix;

/// Marker directory that identifies a project root
pub const TILLER_DIR: &str = ".tiller";

/// File extension for record files
pub const RECORD_EXT: &str = ".crm.yaml";

/// Errors from project discovery and initialization
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not inside a Tiller project (no .tiller directory found); run 'tiller init' first")]
    NotFound,

    #[error("a Tiller project already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A discovered Tiller project
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Discover the project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir().map_err(|source| ProjectError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::discover_from(&cwd)
    }

    /// Discover the project root by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = Some(start);
        while let Some(d) = dir {
            if d.join(TILLER_DIR).is_dir() {
                return Ok(Self {
                    root: d.to_path_buf(),
                });
            }
            dir = d.parent();
        }
        Err(ProjectError::NotFound)
    }

    /// Initialize a new project at `root`, creating the directory skeleton
    pub fn init(root: &Path) -> Result<Self, ProjectError> {
        if root.join(TILLER_DIR).is_dir() {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }

        for dir in Self::skeleton_dirs() {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(|source| ProjectError::Io { path, source })?;
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Directories created by `init`
    fn skeleton_dirs() -> impl Iterator<Item = &'static str> {
        EntityPrefix::ALL
            .iter()
            .map(|p| Self::entity_dir_name(*p))
            .chain(std::iter::once(TILLER_DIR))
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.tiller/` state directory
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(TILLER_DIR)
    }

    /// Storage directory name for a record type
    pub fn entity_dir_name(prefix: EntityPrefix) -> &'static str {
        match prefix {
            EntityPrefix::Cust => "customers",
            EntityPrefix::Part => "partners",
            EntityPrefix::Prop => "proposals",
            EntityPrefix::Eng => "engagements",
            EntityPrefix::Task => "tasks",
            EntityPrefix::Emp => "employees",
        }
    }

    /// Storage directory for a record type
    pub fn entity_dir(&self, prefix: EntityPrefix) -> PathBuf {
        self.root.join(Self::entity_dir_name(prefix))
    }

    /// File path for a record with the given ID string
    pub fn entity_path(&self, prefix: EntityPrefix, id: &str) -> PathBuf {
        self.entity_dir(prefix).join(format!("{}{}", id, RECORD_EXT))
    }

    /// Iterate over record files of a given type, sorted by file name
    ///
    /// ULID-based file names sort chronologically, so this yields records in
    /// creation order without parsing them.
    pub fn iter_entity_files(&self, prefix: EntityPrefix) -> Vec<PathBuf> {
        let dir = self.entity_dir(prefix);
        if !dir.exists() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().to_string_lossy().ends_with(RECORD_EXT))
            .map(|e| e.into_path())
            .collect();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_skeleton() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.root().join("customers").is_dir());
        assert!(project.root().join("proposals").is_dir());
        assert!(project.root().join(TILLER_DIR).is_dir());
    }

    #[test]
    fn test_init_refuses_double_init() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();
        assert!(matches!(
            Project::init(tmp.path()),
            Err(ProjectError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let nested = tmp.path().join("customers");
        let project = Project::discover_from(&nested).unwrap();
        assert_eq!(project.root(), tmp.path());
    }

    #[test]
    fn test_discover_fails_outside_project() {
        let tmp = tempdir().unwrap();
        assert!(matches!(
            Project::discover_from(tmp.path()),
            Err(ProjectError::NotFound)
        ));
    }

    #[test]
    fn test_iter_entity_files_sorted() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let dir = project.entity_dir(EntityPrefix::Task);
        fs::write(dir.join(format!("TASK-B{}", RECORD_EXT)), "b").unwrap();
        fs::write(dir.join(format!("TASK-A{}", RECORD_EXT)), "a").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let files = project.iter_entity_files(EntityPrefix::Task);
        assert_eq!(files.len(), 2);
        assert!(files[0].to_string_lossy().contains("TASK-A"));
    }
}
