//! Lossless syntax tree
//!
//! A [`SourceTree`] keeps the file text as it was read, the top-level
//! declarations found in it, and the string literals those declarations
//! assign. Rendering copies the text and splices in any literal that was
//! replaced, so every other byte comes out exactly as it went in.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::SyntaxError;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identifies one parse of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// 1-based line and byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open byte range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// Escapes are interpreted (`"1.2.3"`)
    Interpreted,
    /// Taken verbatim (`` `1.2.3` ``)
    Raw,
}

/// A string literal as it currently reads, quotes included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
    /// Where the literal sits in the source that was parsed
    pub span: Span,
    pub position: Position,
}

/// Handle to a string literal inside one [`SourceTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralRef {
    session: SessionId,
    index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A lone string literal
    StringLit(LiteralRef),
    /// Anything else
    Other(Span),
}

/// `names [type] [= values]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub values: Vec<Expr>,
}

/// A `const` or `var` declaration, either a single spec or a parenthesized group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGroup {
    pub grouped: bool,
    pub specs: Vec<ValueSpec>,
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Package(Ident),
    Import(Span),
    Const(ValueGroup),
    Var(ValueGroup),
    Type(Span),
    Func(Span),
}

/// A parsed file: the source text, its declarations and their literals
#[derive(Debug)]
pub struct SourceTree {
    session: SessionId,
    source: String,
    declarations: Vec<Declaration>,
    literals: Vec<Literal>,
}

impl SourceTree {
    /// Starts a new session over `source`.
    ///
    /// Parsers register literals through [`SourceTree::add_literal`] and then
    /// hand over the declarations that refer to them.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            session: SessionId::next(),
            source: source.into(),
            declarations: Vec::new(),
            literals: Vec::new(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn set_declarations(&mut self, declarations: Vec<Declaration>) {
        self.declarations = declarations;
    }

    /// Registers the string literal at `span` and returns a handle to it
    pub fn add_literal(&mut self, kind: LiteralKind, span: Span, position: Position) -> LiteralRef {
        self.literals.push(Literal {
            kind,
            text: self.span_text(span).to_string(),
            span,
            position,
        });
        LiteralRef {
            session: self.session,
            index: self.literals.len() - 1,
        }
    }

    /// Returns the literal a handle points at
    pub fn literal(&self, literal: LiteralRef) -> Result<&Literal, SyntaxError> {
        if literal.session != self.session {
            return Err(SyntaxError::StaleReference);
        }
        self.literals
            .get(literal.index)
            .ok_or(SyntaxError::StaleReference)
    }

    /// Replaces the source text of a literal; `text` must be an interpreted
    /// string literal, quotes included
    pub fn set_literal(&mut self, literal: LiteralRef, text: String) -> Result<(), SyntaxError> {
        if literal.session != self.session {
            return Err(SyntaxError::StaleReference);
        }
        let slot = self
            .literals
            .get_mut(literal.index)
            .ok_or(SyntaxError::StaleReference)?;
        slot.text = text;
        slot.kind = LiteralKind::Interpreted;
        Ok(())
    }

    /// Source text covered by `span`, empty if it falls outside the file
    pub fn span_text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    /// The source with every literal written as it currently reads
    pub fn render(&self) -> String {
        let mut literals: Vec<&Literal> = self.literals.iter().collect();
        literals.sort_by_key(|literal| literal.span.start);

        let mut out = String::with_capacity(self.source.len());
        let mut copied = 0;
        for literal in literals {
            out.push_str(self.span_text(Span {
                start: copied,
                end: literal.span.start,
            }));
            out.push_str(&literal.text);
            copied = literal.span.end;
        }
        out.push_str(self.source.get(copied..).unwrap_or_default());
        out
    }
}
