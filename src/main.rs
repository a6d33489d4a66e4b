//! invoicegen CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! generator, and exit with status 0 on success or 1 on any failure.
//! For programmatic use, prefer the library API (`invoicegen::api`).

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

mod cli;

fn main() -> ExitCode {
    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // clap renders its own usage; bad invocations share exit status 1
            eprint!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args) {
        Ok(path) => {
            println!("Invoice saved in {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✖  {e}");
            if e.wants_usage() {
                eprintln!("{}", cli::USAGE);
            }
            ExitCode::FAILURE
        }
    }
}
