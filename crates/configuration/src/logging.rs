use crate::error::ConfigError;
use crate::settings::LoggingConfig;
use std::fmt;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Timestamps in the log file, e.g. `2026-10-18 14:03:22`.
#[derive(Debug, Clone, Copy)]
struct LogTimer;

impl FormatTime for LogTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Installs the process-wide tracing subscriber.
///
/// Log lines go to `<directory>/<file_name>` and are written synchronously, so
/// nothing needs to be flushed at shutdown. Call once, at startup.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = build_filter(&config.level)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(config.file_name.as_str())
        .build(&config.directory)
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let file_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_timer(LogTimer)
            .with_writer(appender)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_timer(LogTimer)
            .with_ansi(false)
            .with_target(false)
            .with_writer(appender)
            .boxed()
    };

    let console_layer = config.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(LogTimer)
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing::info!(
        path = %config.directory.join(&config.file_name).display(),
        "Logging initialized"
    );
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            ConfigError::ValidationError(format!("invalid logging.level '{level}': {e}"))
        }),
    }
}
