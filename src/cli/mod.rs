use crate::config::{self, Settings};
use clap::Parser;
use error::CliResult;
use subcommands::SubCommand;
use tracing::trace;
mod commands;
pub mod error;
mod subcommands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: SubCommand,
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let settings = Settings::try_from_configuration()?;
    trace!("Loaded {} settings", settings.application.environment.as_str());

    match cli.command {
        SubCommand::Server { command } => {
            commands::server::handler(command, settings).await?;
        }
        SubCommand::Paths => {
            println!("Configuration: {}", config::configuration_dir()?.to_string_lossy());
            println!("Served files: {}", settings.directories.root_dir.to_string_lossy());
        }
    }

    Ok(())
}
