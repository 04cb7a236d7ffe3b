//! # Storage Layer
//!
//! Everything that touches the disk or other processes.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Version constant | Go source | any `.go` file, e.g. `version.go` |
//! | Project config | TOML | `.bump-version.toml` in the project root |
//! | Global config | TOML | `~/.config/bump-version/config.toml` |
//!
//! ## Write Safety
//!
//! - [`VersionFile`] renders the complete new file in memory first
//! - Writes go to a sibling temp file that is renamed over the target
//! - Nothing is locked; one writer per file is assumed
//!
//! ## Key Types
//!
//! - [`VersionFile`] - get / set / bump the version constant of a file
//! - [`Config`] - project and global configuration
//! - [`release`] - optional git commit + tag after a change

mod config;
mod git;
mod version_file;

pub use config::{Config, ConfigError, GitConfig, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_CONFIG_FILE};
pub use git::{release, GitError, Release};
pub use version_file::{
    bump_in_file, get_in_file, set_in_file, Change, Edit, Located, VersionFile, VersionFileError,
};
