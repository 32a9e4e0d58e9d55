//! Binary entry point for **stratum-ping**.
//!
//! * Parses CLI arguments.
//! * Installs the stderr log subscriber.
//! * Runs the probing engine; a fatal error is printed and exits non-zero.

use clap::Parser;
use std::process::ExitCode;
use stratum_ping::{cli::Args, engine, logging};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match engine::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
