//! Configuration handling for bump-version
//!
//! Configuration is stored in `.bump-version.toml` (project, found by walking
//! up from the current directory) and `~/.config/bump-version/config.toml`
//! (global).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".bump-version.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("No file given and no 'file' set in .bump-version.toml")]
    NoTargetFile,
}

/// Settings for the git commit and tag made after a version change
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    /// Stage and commit the file after a change
    pub enabled: bool,

    /// Create an annotated tag for the new version
    pub tag: bool,

    /// Prepended to the version to form the tag name (e.g. "v")
    pub tag_prefix: String,

    /// Commit and tag message (placeholder: {version})
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tag: true,
            tag_prefix: String::new(),
            commit_message: "{version}".to_string(),
        }
    }
}

impl GitConfig {
    /// Commit message for a version
    pub fn message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }

    /// Tag name for a version
    pub fn tag_for(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Source file holding the version constant, relative to the config file
    pub file: Option<PathBuf>,

    /// Git settings
    pub git: GitConfig,
}

/// Global user configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let start = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&start)
    }

    /// Loads configuration, looking for a project config from `start` upwards
    pub fn load_from(start: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = Self::find_project_root(start);
        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "bump-version", "bump-version")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        match Self::global_config_dir() {
            Some(dir) => read_toml(&dir.join("config.toml")),
            None => Ok(GlobalConfig::default()),
        }
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        read_toml(&project_root.join(PROJECT_CONFIG_FILE))
    }

    /// Finds the nearest directory at or above `start` holding a project config
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if a project config was found
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Picks the file to operate on: the explicit argument, else the
    /// configured `file` resolved against the project root
    pub fn target_file(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        match (&self.project.file, &self.project_root) {
            (Some(file), Some(root)) => Ok(root.join(file)),
            (Some(file), None) => Ok(file.clone()),
            (None, _) => Err(ConfigError::NoTargetFile.into()),
        }
    }
}

/// Reads a TOML config file; a missing file yields the defaults
fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config: {}", path.display()))
        }
    };

    toml::from_str(&content).map_err(|e| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        }
        .into()
    })
}
