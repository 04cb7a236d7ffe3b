//! Go source files
//!
//! [`GoSyntax`] parses the top-level outline of a `.go` file with
//! tree-sitter and knows how Go spells string literals: interpreted
//! (`"1.2.3"`) and raw (`` `1.2.3` ``).

mod parser;

use std::fmt::Write as _;

use super::{Literal, LiteralKind, SourceSyntax, SourceTree, SyntaxError};

/// The Go grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct GoSyntax;

impl SourceSyntax for GoSyntax {
    fn parse(&self, source: &str) -> Result<SourceTree, SyntaxError> {
        parser::parse(source)
    }

    fn quote(&self, value: &str) -> String {
        quote(value)
    }

    fn unquote(&self, literal: &Literal) -> Result<String, SyntaxError> {
        let invalid = |reason| SyntaxError::InvalidLiteral {
            position: literal.position,
            reason,
        };
        match literal.kind {
            LiteralKind::Raw => literal
                .text
                .strip_prefix('`')
                .and_then(|s| s.strip_suffix('`'))
                // carriage returns are dropped from raw string values
                .map(|s| s.replace('\r', ""))
                .ok_or_else(|| invalid("missing backquote")),
            LiteralKind::Interpreted => {
                let body = literal
                    .text
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .ok_or_else(|| invalid("missing quote"))?;
                unescape(body).map_err(invalid)
            }
        }
    }
}

/// Double-quoted Go literal for `value`
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x80 && c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn unescape(body: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(body.len());
    let mut bytes: Vec<u8> = Vec::new();
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_bytes(&mut bytes, &mut out)?;
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or("trailing backslash")?;
        let simple = match escape {
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\x0b'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            _ => None,
        };
        if let Some(simple) = simple {
            flush_bytes(&mut bytes, &mut out)?;
            out.push(simple);
            continue;
        }
        match escape {
            // \x and octal escapes produce raw bytes that may form UTF-8 together
            'x' => bytes.push(hex_value(&mut chars, 2)? as u8),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|c| c.to_digit(8))
                        .ok_or("invalid octal escape")?;
                    value = value * 8 + digit;
                }
                let byte = u8::try_from(value).map_err(|_| "octal escape out of range")?;
                bytes.push(byte);
            }
            'u' | 'U' => {
                flush_bytes(&mut bytes, &mut out)?;
                let width = if escape == 'u' { 4 } else { 8 };
                let code = hex_value(&mut chars, width)?;
                out.push(char::from_u32(code).ok_or("invalid Unicode code point")?);
            }
            _ => return Err("unknown escape sequence"),
        }
    }

    flush_bytes(&mut bytes, &mut out)?;
    Ok(out)
}

fn hex_value(chars: &mut std::str::Chars<'_>, width: usize) -> Result<u32, &'static str> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or("invalid hex escape")?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn flush_bytes(bytes: &mut Vec<u8>, out: &mut String) -> Result<(), &'static str> {
    if bytes.is_empty() {
        return Ok(());
    }
    let text = std::str::from_utf8(bytes).map_err(|_| "escapes do not form valid UTF-8")?;
    out.push_str(text);
    bytes.clear();
    Ok(())
}
