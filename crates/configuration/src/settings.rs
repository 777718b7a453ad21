use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable holding the testnet API key.
pub const ENV_API_KEY: &str = "BINANCE_API_KEY";
/// Environment variable holding the testnet API secret.
pub const ENV_API_SECRET: &str = "BINANCE_API_SECRET";

/// The Binance USDT-M Futures Testnet REST endpoint.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Binance rejects signed requests with a larger `recvWindow`.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Checks values that deserialize fine but cannot work at runtime.
    ///
    /// Credentials are not checked here; see [`ApiConfig::credentials`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.api.recv_window_ms == 0 || self.api.recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(ConfigError::ValidationError(format!(
                "api.recv_window_ms must be between 1 and {MAX_RECV_WINDOW_MS}"
            )));
        }
        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Connection settings for the exchange REST API.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// How long a signed request stays valid on the exchange side.
    pub recv_window_ms: u64,
    /// Transport timeout for a single request. There are no retries.
    pub timeout_secs: u64,
}

/// A borrowed API key/secret pair, guaranteed non-empty.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub key: &'a str,
    pub secret: &'a str,
}

impl ApiConfig {
    pub fn credentials(&self) -> Result<Credentials<'_>, ConfigError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingCredential(ENV_API_KEY));
        }
        let secret = self.api_secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::MissingCredential(ENV_API_SECRET));
        }
        Ok(Credentials { key, secret })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            recv_window_ms: 5_000,
            timeout_secs: 10,
        }
    }
}

// Keeps the key and secret out of debug output and logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &str| if s.is_empty() { "<unset>" } else { "[REDACTED]" };
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("recv_window_ms", &self.recv_window_ms)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// Keeps the key and secret out of debug output and logs.
impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Where and how log lines are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_name: String,
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON lines instead of the `timestamp | LEVEL | message` text format.
    pub json: bool,
    /// Mirror log lines to stderr.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "trading_bot.log".to_string(),
            level: "info".to_string(),
            json: false,
            console: false,
        }
    }
}

/// Bind address of the order form UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}
