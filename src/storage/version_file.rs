//! Reading and rewriting the version constant of a source file
//!
//! Every operation parses the file fresh, locates the version literal, and
//! (for `set`/`bump`) renders the whole tree in memory before replacing the
//! file with a temp file + rename. A failure at any step leaves the file as
//! it was.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Field, Version, VersionError};
use crate::syntax::go::GoSyntax;
use crate::syntax::{find_version_literal, LiteralRef, LocateError, SourceSyntax, SourceTree, SyntaxError};

#[derive(Debug, Error)]
pub enum VersionFileError {
    #[error("Failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("No version constant found in {}", path.display())]
    DeclarationNotFound { path: PathBuf },

    #[error("{name} constant in {} is not a string, was {found}", path.display())]
    WrongLiteralKind {
        path: PathBuf,
        name: String,
        found: String,
    },

    #[error("Invalid version in {}", path.display())]
    Version {
        path: PathBuf,
        #[source]
        source: VersionError,
    },

    #[error(transparent)]
    InvalidField(VersionError),
}

impl VersionFileError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    fn syntax(path: &Path, source: SyntaxError) -> Self {
        Self::Syntax {
            path: path.to_path_buf(),
            source,
        }
    }

    fn version(path: &Path, source: VersionError) -> Self {
        Self::Version {
            path: path.to_path_buf(),
            source,
        }
    }

    fn locate(path: &Path, source: LocateError) -> Self {
        match source {
            LocateError::DeclarationNotFound => Self::DeclarationNotFound {
                path: path.to_path_buf(),
            },
            LocateError::WrongLiteralKind { name, found } => Self::WrongLiteralKind {
                path: path.to_path_buf(),
                name,
                found,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, VersionFileError>;

/// Where the version constant was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub version: Version,
    /// The literal as written in the file, quotes included
    pub literal: String,
    pub line: usize,
}

/// A change to the version constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Bump(Field),
    Set(Version),
}

/// What [`VersionFile::apply`] replaced, and with what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// `None` when a `Set` replaced a literal that did not hold a version
    pub previous: Option<Version>,
    pub version: Version,
    /// The replaced literal as it was written, quotes included
    pub literal: String,
    pub line: usize,
}

/// One parse of one file, with the version literal already located
struct Session {
    tree: SourceTree,
    literal: LiteralRef,
}

/// Version constant access for files in one source language
#[derive(Debug, Clone, Default)]
pub struct VersionFile<S = GoSyntax> {
    syntax: S,
}

impl VersionFile<GoSyntax> {
    /// Go source files
    pub fn go() -> Self {
        Self::new(GoSyntax)
    }
}

impl<S: SourceSyntax> VersionFile<S> {
    pub fn new(syntax: S) -> Self {
        Self { syntax }
    }

    /// Returns the version constant and where it sits in the file
    pub fn inspect(&self, path: &Path) -> Result<Located> {
        let session = self.open(path)?;
        let (literal, line) = self.literal_text(path, &session)?;
        let version = self.read_version(path, &session)?;

        Ok(Located {
            version,
            literal,
            line,
        })
    }

    /// Returns the version found in the file
    pub fn get(&self, path: &Path) -> Result<Version> {
        let session = self.open(path)?;
        self.read_version(path, &session)
    }

    /// Returns the version a bump would produce, without writing
    pub fn next(&self, path: &Path, field: Field) -> Result<Version> {
        self.get(path)?
            .bump(field)
            .map_err(|e| VersionFileError::version(path, e))
    }

    /// Sets the version in the file to `version`
    pub fn set(&self, path: &Path, version: &Version) -> Result<()> {
        self.apply(path, Edit::Set(*version)).map(|_| ())
    }

    /// Increments the version in the file and returns the new version
    pub fn bump(&self, path: &Path, field: Field) -> Result<Version> {
        self.apply(path, Edit::Bump(field)).map(|change| change.version)
    }

    /// Applies `edit` with a single read and a single write of the file.
    ///
    /// A bump needs the current literal to hold a version; a set replaces
    /// whatever string is there.
    pub fn apply(&self, path: &Path, edit: Edit) -> Result<Change> {
        let session = self.open(path)?;
        let (literal, line) = self.literal_text(path, &session)?;
        let current = self.read_version(path, &session);

        let (previous, version) = match edit {
            Edit::Bump(field) => {
                let previous = current?;
                let next = previous
                    .bump(field)
                    .map_err(|e| VersionFileError::version(path, e))?;
                (Some(previous), next)
            }
            Edit::Set(version) => (current.ok(), version),
        };

        self.store(path, session, &version)?;
        Ok(Change {
            previous,
            version,
            literal,
            line,
        })
    }

    fn open(&self, path: &Path) -> Result<Session> {
        let source =
            fs::read_to_string(path).map_err(|e| VersionFileError::io("read", path, e))?;
        let tree = self
            .syntax
            .parse(&source)
            .map_err(|e| VersionFileError::syntax(path, e))?;
        let literal = find_version_literal(&tree).map_err(|e| VersionFileError::locate(path, e))?;

        Ok(Session { tree, literal })
    }

    /// The located literal's source text and line
    fn literal_text(&self, path: &Path, session: &Session) -> Result<(String, usize)> {
        let literal = session
            .tree
            .literal(session.literal)
            .map_err(|e| VersionFileError::syntax(path, e))?;
        Ok((literal.text.clone(), literal.position.line))
    }

    fn read_version(&self, path: &Path, session: &Session) -> Result<Version> {
        let literal = session
            .tree
            .literal(session.literal)
            .map_err(|e| VersionFileError::syntax(path, e))?;
        let text = self
            .syntax
            .unquote(literal)
            .map_err(|e| VersionFileError::syntax(path, e))?;

        Version::parse(&text).map_err(|e| VersionFileError::version(path, e))
    }

    fn store(&self, path: &Path, mut session: Session, version: &Version) -> Result<()> {
        let quoted = self.syntax.quote(&version.to_string());
        session
            .tree
            .set_literal(session.literal, quoted)
            .map_err(|e| VersionFileError::syntax(path, e))?;

        let rendered = self.syntax.render(&session.tree);
        write_atomic(path, &rendered)
    }
}

/// Replaces the file's contents through a sibling temp file.
///
/// Symlinks are followed so the link itself survives, and the original
/// permissions are carried over to the new file.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = fs::canonicalize(path).map_err(|e| VersionFileError::io("resolve", path, e))?;
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = target.with_file_name(format!(".{}.tmp", file_name));

    let written = (|| -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        let mut writer = BufWriter::new(&file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        drop(writer);
        file.sync_all()?;

        let permissions = fs::metadata(&target)?.permissions();
        fs::set_permissions(&temp_path, permissions)?;
        fs::rename(&temp_path, &target)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(VersionFileError::io("write", path, e));
    }
    Ok(())
}

/// Returns the version found in the Go file at `path`
pub fn get_in_file(path: impl AsRef<Path>) -> Result<Version> {
    VersionFile::go().get(path.as_ref())
}

/// Sets the version in the Go file at `path`
pub fn set_in_file(version: &Version, path: impl AsRef<Path>) -> Result<()> {
    VersionFile::go().set(path.as_ref(), version)
}

/// Finds a constant named `VERSION`, `version` or `Version` in the Go file at
/// `path`, increments it by `field` (`major`, `minor` or `patch`) and writes
/// the file back. Returns the new version.
pub fn bump_in_file(field: &str, path: impl AsRef<Path>) -> Result<Version> {
    let field: Field = field.parse().map_err(VersionFileError::InvalidField)?;
    VersionFile::go().bump(path.as_ref(), field)
}
