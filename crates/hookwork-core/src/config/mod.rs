//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate.
//! Each sub-module represents a logical configuration section.

pub mod hooks;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::hooks::HooksConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;
use crate::types::environment::Environment;

/// Prefix for environment variable overrides, e.g. `HOOKWORK__LOGGING__LEVEL`.
const ENV_PREFIX: &str = "HOOKWORK";

/// Root application configuration.
///
/// Deserialized from `config/default.toml`, overlaid with
/// `config/{environment}.toml` and `HOOKWORK__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active runtime environment.
    #[serde(default)]
    pub environment: Environment,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Hook definitions and loader settings.
    #[serde(default)]
    pub hooks: HooksConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// The requested environment always wins over any `environment` key
    /// found in the files.
    pub fn load(env: &Environment) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", env.as_str())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::deserialize_checked(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::deserialize_checked(config)
    }

    fn deserialize_checked(config: config::Config) -> Result<Self, AppError> {
        let app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        for definition in &app.hooks.definitions {
            definition.check()?;
        }

        Ok(app)
    }
}
