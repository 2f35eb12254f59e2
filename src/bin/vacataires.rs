use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;

use vacataires::{app, cli::Cli, logging::init_logging};

fn main() {
    let cli = Cli::parse();

    let mut log_config = cli.log_config();
    log_config.with_ansi = io::stderr().is_terminal();
    init_logging(&log_config);

    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(err) = app::run(&cli, stdin.lock(), stdout.lock()) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}
