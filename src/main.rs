// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, parse arguments, hand off to `cli::run`.
// - Any error, including a bad command line, is printed and the process
//   exits with 1. `--help` and `--version` exit with 0.

use bakeit::cli::{self, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_tracing();
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("upload failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
