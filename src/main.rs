//! bump-version - read and bump the version constant of a Go source file

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = bump_version::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
