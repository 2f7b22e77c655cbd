//! CLI command implementations.

pub mod run;
pub mod status;
pub mod validate;

use anyhow::Result;

use crate::cli::types::{Cli, Commands};
use crate::domain::models::Config;

/// Run the selected subcommand against an already loaded configuration.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Run => run::execute(config, cli.json).await,
        Commands::Status => status::execute(config, cli.json).await,
        Commands::Validate => {
            validate::execute(&cli.config, config, cli.json);
            Ok(())
        }
    }
}
