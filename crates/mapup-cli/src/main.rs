use clap::Parser;
use mapup_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; fall back to stderr if the log file can't be opened.
    if let Err(err) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr(cli.verbose);
        tracing::warn!("log file unavailable, logging to stderr only: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("mapup error: {:#}", err);
        std::process::exit(1);
    }
}
