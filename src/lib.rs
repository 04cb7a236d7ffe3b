//! bump-version - read and bump the version constant of a Go source file
//!
//! A Go package usually records its release as `const VERSION = "1.2.3"`.
//! This crate parses that constant, increments or replaces it, and writes the
//! file back with nothing else changed: comments, spacing and unrelated
//! declarations survive byte for byte.
//!
//! ```no_run
//! let next = bump_version::bump_in_file("minor", "version.go")?;
//! println!("{}", next);
//! # Ok::<(), bump_version::storage::VersionFileError>(())
//! ```

pub mod domain;
pub mod syntax;
pub mod storage;
pub mod cli;

pub use domain::{less, Field, Version, VersionError};
pub use storage::{bump_in_file, get_in_file, set_in_file, VersionFile, VersionFileError};
