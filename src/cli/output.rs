//! Output formatting for CLI commands
//!
//! Results go to stdout, diagnostics to stderr, so `$(bump-version next
//! patch)` captures only the version even with `--verbose`.

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Prints a command result: its `Display` form in text mode, a single
    /// line of JSON otherwise
    pub fn result<T: Serialize + fmt::Display>(&self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", value),
            OutputFormat::Json => {
                let json = serde_json::to_string(value).context("Failed to encode result as JSON")?;
                println!("{}", json);
            }
        }
        Ok(())
    }

    /// Prints `[verbose:<context>] <message>` to stderr when --verbose is set
    pub fn verbose(&self, context: &str, message: impl fmt::Display) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
