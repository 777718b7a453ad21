use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    ApiConfig, Config, Credentials, ENV_API_KEY, ENV_API_SECRET, LoggingConfig, ServerConfig,
    TESTNET_BASE_URL,
};

/// Command-line flags shared by every binary that loads the configuration.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file. A missing file is not an error.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: std::path::PathBuf,
}

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at
/// `path` (optional), then the `BINANCE_API_KEY` / `BINANCE_API_SECRET`
/// environment variables. Load any `.env` file before calling this.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_credentials(
        path,
        std::env::var(ENV_API_KEY).ok(),
        std::env::var(ENV_API_SECRET).ok(),
    )
}

/// Like [`load_config`], with the credential overrides passed in explicitly.
pub fn load_config_with_credentials(
    path: &Path,
    api_key: Option<String>,
    api_secret: Option<String>,
) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .set_override_option("api.api_key", api_key.filter(|k| !k.trim().is_empty()))?
        .set_override_option("api.api_secret", api_secret.filter(|s| !s.trim().is_empty()))?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
