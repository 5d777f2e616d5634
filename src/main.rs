//! Huskpack — configuration loader and validator CLI

use clap::Parser;

use huskpack::cli::args::Cli;
use huskpack::cli::commands;
use huskpack::error::ExitCode;
use huskpack::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
