//! Committing and tagging a version change with git
//!
//! Runs `git add`, `git commit` and `git tag --annotate` in the directory of
//! the changed file. Any failing command stops the sequence; the file change
//! itself is already on disk by then and is not rolled back.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::config::GitConfig;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to run git {args}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error when running git {args}.\nOutput was:\n{output}")]
    Failed { args: String, output: String },
}

/// What the release step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub message: String,
    pub tag: Option<String>,
}

/// Stages `file`, commits it, and tags the commit per `config`
pub fn release(file: &Path, version: &str, config: &GitConfig) -> Result<Release, GitError> {
    let file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    let dir = work_dir(&file);
    let file_arg = file.to_string_lossy().into_owned();

    let message = config.message_for(version);
    run(&dir, &["add", &file_arg])?;
    run(&dir, &["commit", "-m", &message])?;

    let tag = if config.tag {
        let name = config.tag_for(version);
        run(&dir, &["tag", &name, "--annotate", "--message", &message])?;
        Some(name)
    } else {
        None
    };

    Ok(Release { message, tag })
}

fn work_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn run(dir: &Path, args: &[&str]) -> Result<(), GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| GitError::Spawn {
            args: args.join(" "),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Err(GitError::Failed {
        args: args.join(" "),
        output: combined,
    })
}
