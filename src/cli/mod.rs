//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Effect | Example |
//! |---------|--------|---------|
//! | `current` | Print the version | `bump-version current version.go` |
//! | `next` | Print the bumped version, change nothing | `bump-version next minor version.go` |
//! | `bump` | Increment, write, commit, tag | `bump-version bump patch version.go` |
//! | `set` | Write an explicit version, commit, tag | `bump-version set 2.0.0 version.go` |
//!
//! `bump` and `set` skip the git step with `--no-git` (or
//! `BUMP_VERSION_NO_GIT=1`, or `[git] enabled = false` in the config).
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - the version on a line of its own
//! - `json` - `{"version": ..., "file": ..., "previous": ..., "tag": ...}`
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! bump-version --verbose bump patch version.go
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod version_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
