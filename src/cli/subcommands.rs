use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Manage or run the file server.
    Server {
        #[command(subcommand)]
        command: ServerCommand
    },
    /// Print the paths that sphynx uses.
    Paths
}

#[derive(Subcommand, Debug)]
pub enum ServerCommand {
    /// Runs the server.
    Run {
        /// The host to use when starting the server. Overrides the configuration.
        #[arg(short = 'H', long = "host")]
        host: Option<String>,
        /// The port to use when starting the server. Overrides the configuration.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
        /// The directory to serve. Overrides the configuration.
        #[arg(short = 'r', long = "root")]
        root: Option<PathBuf>,
    },
}
