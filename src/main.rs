use crudgen::cli::{run, Cli};
use crudgen::logging::{init_logging_with_config, LogConfig};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    if let Err(e) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {e:#}");
    }

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
