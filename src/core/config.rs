//! User and project configuration
//!
//! Settings are read from the project's `.tiller/config.yaml` when inside a
//! project, falling back to the user-level config directory and finally to
//! environment defaults. Loading never fails; missing or unparsable files
//! just fall through to the next layer.

use std::path::Path;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::core::project::Project;

/// Tiller configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Author recorded on new records
    pub author: Option<String>,

    /// Editor command for `edit` and post-create editing
    pub editor: Option<String>,

    /// Default page size for list views
    pub page_size: Option<usize>,

    /// Role evaluated against the project's access rules
    pub role: Option<String>,
}

impl Config {
    /// Load configuration, project config taking precedence over user config
    pub fn load() -> Self {
        let project_config = Project::discover()
            .ok()
            .and_then(|p| Self::read_file(&p.state_dir().join("config.yaml")));
        let user_config = ProjectDirs::from("", "", "tiller")
            .and_then(|dirs| Self::read_file(&dirs.config_dir().join("config.yaml")));

        let mut config = user_config.unwrap_or_default();
        if let Some(project) = project_config {
            if project.author.is_some() {
                config.author = project.author;
            }
            if project.editor.is_some() {
                config.editor = project.editor;
            }
            if project.page_size.is_some() {
                config.page_size = project.page_size;
            }
            if project.role.is_some() {
                config.role = project.role;
            }
        }
        config
    }

    fn read_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str(&content).ok()
    }

    /// Effective author name
    pub fn author(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("TILLER_AUTHOR").ok())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Effective editor command
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Effective default page size for list views
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(25)
    }

    /// Effective role for access-rule evaluation
    pub fn role(&self) -> String {
        self.role.clone().unwrap_or_else(|| "admin".to_string())
    }

    /// Open `path` in the configured editor
    pub fn run_editor(&self, path: &Path) -> std::io::Result<()> {
        std::process::Command::new(self.editor())
            .arg(path)
            .status()
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size(), 25);
        assert!(!config.author().is_empty());
    }

    #[test]
    fn test_parse_config_yaml() {
        let config: Config =
            serde_yml::from_str("author: Ada\neditor: nano\npage_size: 10").unwrap();
        assert_eq!(config.author(), "Ada");
        assert_eq!(config.editor(), "nano");
        assert_eq!(config.page_size(), 10);
    }
}
