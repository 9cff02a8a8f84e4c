use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{configuration_dir, DATA_DIR};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub directories: DirectorySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Upper bound on an upload body in bytes. No limit when unset.
    pub max_filesize: Option<usize>,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectorySettings {
    /// The one directory every file operation is resolved against.
    pub root_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Testing => "testing",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(format!(
                "{other} is not a supported environment. Use either `development`, `production`, or `testing`."
            )),
        }
    }
}

impl Settings {
    pub fn try_from_configuration() -> Result<Settings, ConfigError> {
        let configuration_directory = configuration_dir()
            .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {e}")))?;

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "development".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        Self::load(&configuration_directory, &environment)
    }

    /// Layers `base.yaml`, `<environment>.yaml` and `APP_*` variables over the
    /// built-in defaults. Missing yaml files are skipped.
    pub fn load(configuration_directory: &Path, environment: &Environment) -> Result<Settings, ConfigError> {
        let environment_filename = format!("{}.yaml", environment.as_str());
        let default_root = DATA_DIR.join("files");

        let settings = Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 5000)?
            .set_default("application.environment", environment.as_str())?
            .set_default("application.cors_origins", vec!["http://localhost:3000"])?
            .set_default("directories.root_dir", default_root.to_string_lossy().to_string())?
            .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
            .add_source(File::from(configuration_directory.join(environment_filename)).required(false))
            .add_source(
                ConfigEnvironment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize::<Settings>()
    }
}
