use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod api;
pub mod app;
pub mod limits;
pub mod validation;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "MAILROOM";

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

/// Location of the configuration file, if any.
///
/// `config.toml` in the working directory wins over
/// `<config dir>/mailroom/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("mailroom").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

fn load_config() -> ConfigLoadResult {
    dotenv::dotenv().ok();
    load_config_from(config_file_path().as_deref())
}

/// Loads and validates configuration from an optional file plus the
/// environment (`MAILROOM__API__BASE_URL` style keys).
///
/// Every setting has a default, so a missing file is not an error.
pub fn load_config_from(path: Option<&Path>) -> ConfigLoadResult {
    let env_source = Environment::with_prefix(ENV_PREFIX).separator("__");

    let mut builder = Config::builder();
    if let Some(path) = path {
        log::debug!("Loading configuration from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = match builder
        .add_source(env_source) // environment entries override file values when present
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => {
            if let Err(validation_errors) = app_config.validate() {
                let error_messages: Vec<String> =
                    validation_errors.iter().map(|e| e.user_message()).collect();
                return ConfigLoadResult::DeserializeError(format!(
                    "Configuration validation failed:\n{}",
                    error_messages.join("\n\n")
                ));
            }
            ConfigLoadResult::Success(Box::new(app_config))
        }
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

pub fn get_config() -> &'static ConfigLoadResult {
    CONFIG.get_or_init(load_config)
}

/// Logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
