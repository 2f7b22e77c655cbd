//! Tripwire CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use tripwire::cli::{self, Cli};
use tripwire::infrastructure::config::ConfigLoader;
use tripwire::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with clap's code 2.
    let cli = Cli::parse();

    let config = match ConfigLoader::load_from_file(&cli.config) {
        Ok(config) => config,
        Err(err) => return cli::handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => return cli::handle_error(&err, cli.json),
    };

    match cli::commands::execute(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            cli::handle_error(&err, cli.json)
        }
    }
}
