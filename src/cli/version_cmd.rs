//! Version commands: current, next, bump, set

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::domain::{Field, Version};
use crate::storage::{release, Config, Edit, VersionFile};

/// What a command reports; text mode prints only the version
#[derive(Debug, Serialize)]
struct VersionReport {
    version: Version,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl fmt::Display for VersionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

fn parse_field(field: &str) -> Result<Field> {
    Ok(field.parse::<Field>()?)
}

/// Prints the version stored in the file
pub fn current(output: &Output, config: &Config, file: Option<&Path>) -> Result<()> {
    let path = config.target_file(file)?;
    output.verbose("current", format_args!("Reading {}", path.display()));

    let located = VersionFile::go().inspect(&path)?;
    output.verbose(
        "current",
        format_args!("Found {} on line {}", located.literal, located.line),
    );

    output.result(&VersionReport {
        version: located.version,
        file: path.display().to_string(),
        previous: None,
        tag: None,
    })
}

/// Prints the version a bump would produce, without changing the file
pub fn next(output: &Output, config: &Config, field: &str, file: Option<&Path>) -> Result<()> {
    let field = parse_field(field)?;
    let path = config.target_file(file)?;

    let current = VersionFile::go().get(&path)?;
    let next = current.bump(field)?;
    output.verbose("next", format_args!("{} -> {} ({})", current, next, field));

    output.result(&VersionReport {
        version: next,
        file: path.display().to_string(),
        previous: Some(current),
        tag: None,
    })
}

/// Increments the version in the file, then commits and tags it
pub fn bump(
    output: &Output,
    config: &Config,
    field: &str,
    file: Option<&Path>,
    no_git: bool,
) -> Result<()> {
    let field = parse_field(field)?;
    rewrite(output, config, Edit::Bump(field), file, no_git)
}

/// Writes an explicit version into the file, then commits and tags it
pub fn set(
    output: &Output,
    config: &Config,
    version: &Version,
    file: Option<&Path>,
    no_git: bool,
) -> Result<()> {
    rewrite(output, config, Edit::Set(*version), file, no_git)
}

/// Applies one edit to the file, then runs the git step
fn rewrite(
    output: &Output,
    config: &Config,
    edit: Edit,
    file: Option<&Path>,
    no_git: bool,
) -> Result<()> {
    let path = config.target_file(file)?;
    let change = VersionFile::go().apply(&path, edit)?;
    output.verbose(
        "write",
        format_args!(
            "Replaced {} on line {} of {} with \"{}\"",
            change.literal,
            change.line,
            path.display(),
            change.version
        ),
    );

    let tag = commit(output, config, &path, &change.version, no_git)?;
    output.result(&VersionReport {
        version: change.version,
        file: path.display().to_string(),
        previous: change.previous,
        tag,
    })
}

/// Runs the git step unless it is switched off; returns the tag created
fn commit(
    output: &Output,
    config: &Config,
    path: &Path,
    version: &Version,
    no_git: bool,
) -> Result<Option<String>> {
    let git = &config.project.git;
    if no_git || !git.enabled {
        output.verbose("git", "Skipping commit and tag");
        return Ok(None);
    }

    let version = version.to_string();
    output.verbose(
        "git",
        format_args!("Committing {} as '{}'", path.display(), git.message_for(&version)),
    );
    let release = release(path, &version, git)
        .with_context(|| format!("Version in {} was changed but not committed", path.display()))?;

    if let Some(tag) = &release.tag {
        output.verbose("git", format_args!("Tagged {}", tag));
    }
    Ok(release.tag)
}
