//! Entry point for the `captioner` CLI. Parses arguments, dispatches to the
//! command handler, and maps errors to exit codes.

use captioner::cli::Cli;
use captioner::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // User-actionable message on stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
