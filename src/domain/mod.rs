//! Domain models for bump-version
//!
//! Contains the version arithmetic without any I/O concerns.

mod version;

pub use version::{less, Field, Version, VersionError};
