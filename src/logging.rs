use crate::error::ConfigError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`, which defaults to `"info"`.
/// With `json` set, events are written as one JSON object per line.
/// The library itself never calls this; binaries and tests opt in.
pub fn init_tracing(log_level: Option<&str>, json: bool) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))
        .map_err(|e| ConfigError::Tracing(e.to_string()))?;

    let subscriber = Registry::default().with(env_filter);
    let result = if json {
        tracing::subscriber::set_global_default(
            subscriber.with(fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        tracing::subscriber::set_global_default(
            subscriber.with(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        )
    };
    result.map_err(|e| ConfigError::Tracing(e.to_string()))
}
