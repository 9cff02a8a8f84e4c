use crate::config::Settings;
use crate::server;
use super::super::subcommands::ServerCommand;
use super::super::error::CliResult;

pub async fn handler(command: ServerCommand, mut settings: Settings) -> CliResult<()> {
    match command {
        ServerCommand::Run { host, port, root } => {
            if let Some(host) = host {
                settings.application.host = host;
            }
            if let Some(port) = port {
                settings.application.port = port;
            }
            if let Some(root) = root {
                settings.directories.root_dir = root;
            }

            server::run(&settings).await?;
        },
    }
    Ok(())
}
