//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::version_cmd;
use crate::domain::Version;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "bump-version")]
#[command(author, version, about = "Read and bump the version constant of a Go source file")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Increment the version constant and commit the change
    Bump {
        /// Field to increment: major, minor or patch
        field: String,

        /// Go source file (defaults to `file` in .bump-version.toml)
        file: Option<PathBuf>,

        /// Only rewrite the file; do not commit or tag
        #[arg(long, env = "BUMP_VERSION_NO_GIT", value_parser = FalseyValueParser::new())]
        no_git: bool,
    },

    /// Set the version constant to an explicit value and commit the change
    Set {
        /// New version, e.g. 1.4 or 2.0.0
        #[arg(value_name = "VERSION")]
        new_version: Version,

        /// Go source file (defaults to `file` in .bump-version.toml)
        file: Option<PathBuf>,

        /// Only rewrite the file; do not commit or tag
        #[arg(long, env = "BUMP_VERSION_NO_GIT", value_parser = FalseyValueParser::new())]
        no_git: bool,
    },

    /// Print the current version
    Current {
        /// Go source file (defaults to `file` in .bump-version.toml)
        file: Option<PathBuf>,
    },

    /// Print the version a bump would produce, without changing anything
    Next {
        /// Field to increment: major, minor or patch
        field: String,

        /// Go source file (defaults to `file` in .bump-version.toml)
        file: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("config", format_args!("Output format: {:?}", output.format()));
    match &config.project_root {
        Some(root) => output.verbose("config", format_args!("Project root: {}", root.display())),
        None => output.verbose("config", "No project config found"),
    }

    match cli.command {
        Commands::Bump {
            field,
            file,
            no_git,
        } => version_cmd::bump(&output, &config, &field, file.as_deref(), no_git)?,

        Commands::Set {
            new_version,
            file,
            no_git,
        } => version_cmd::set(&output, &config, &new_version, file.as_deref(), no_git)?,

        Commands::Current { file } => version_cmd::current(&output, &config, file.as_deref())?,

        Commands::Next { field, file } => {
            version_cmd::next(&output, &config, &field, file.as_deref())?
        }
    }

    Ok(())
}
