//! # Syntax Layer
//!
//! Structural parsing and printing of the source file that holds the version
//! constant.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`SourceSyntax`] | A grammar: `parse`, `render`, and literal quoting |
//! | [`SourceTree`] | Source text + top-level declarations for one parse |
//! | [`LiteralRef`] | Handle to one string literal, valid for one tree only |
//! | [`find_version_literal`] | Locates the `const VERSION = "..."` literal |
//!
//! The tree model is language-neutral; [`go::GoSyntax`] is the only grammar
//! today.
//!
//! ## Round-Tripping
//!
//! The tree keeps the text it was parsed from and only records where the
//! string literals are, so the default [`SourceSyntax::render`] reproduces the
//! input byte for byte apart from literals that were replaced.

pub mod go;
mod locate;
mod tree;

use thiserror::Error;

pub use locate::{find_version_literal, LocateError};
pub use tree::{
    Declaration, Expr, Ident, Literal, LiteralKind, LiteralRef, Position, SessionId, SourceTree,
    Span, ValueGroup, ValueSpec,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Failed to load the grammar: {0}")]
    Grammar(String),

    #[error("Parser produced no syntax tree")]
    NoTree,

    #[error("{position}: syntax error at '{found}'")]
    Invalid { position: Position, found: String },

    #[error("{position}: missing '{expected}'")]
    Missing { position: Position, expected: String },

    #[error("Expected 'package' clause at the start of the file")]
    MissingPackageClause,

    #[error("{position}: unexpected {found} at top level")]
    Unexpected { position: Position, found: String },

    #[error("{position}: invalid string literal: {reason}")]
    InvalidLiteral {
        position: Position,
        reason: &'static str,
    },

    #[error("Literal reference does not belong to this syntax tree")]
    StaleReference,
}

/// A source language the version constant can live in
pub trait SourceSyntax {
    /// Parses a whole file into a tree
    fn parse(&self, source: &str) -> Result<SourceTree, SyntaxError>;

    /// Renders a tree back to source text
    fn render(&self, tree: &SourceTree) -> String {
        tree.render()
    }

    /// Source form of a string value, quotes included
    fn quote(&self, value: &str) -> String;

    /// String value of a literal
    fn unquote(&self, literal: &Literal) -> Result<String, SyntaxError>;
}
