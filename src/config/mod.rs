use std::path::PathBuf;

use lazy_static::lazy_static;
pub use settings::{ApplicationSettings, DirectorySettings, Environment, Settings};

pub mod settings;

// Used for naming data folders etc
pub const PROGRAM_NAME: &str = "sphynx";

lazy_static! {
    /// Where the root directory lives when nothing else is configured.
    pub static ref DATA_DIR: PathBuf = dirs::data_dir().unwrap_or_default().join(PROGRAM_NAME);
}

/// The `configuration/` directory settings are layered from.
pub fn configuration_dir() -> std::io::Result<PathBuf> {
    Ok(std::env::current_dir()?.join("configuration"))
}
