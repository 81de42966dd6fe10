/// Tracing setup: a log file plus optional console output
use crate::config::LogSettings;
use crate::error::{ConfigError, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter; `RUST_LOG` wins when set
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| ConfigError::Invalid(format!("log level {:?}: {}", level, e))),
    }
}

/// Install the global subscriber
///
/// The file layer is always present and never writes ANSI colours. The
/// console layer writes to stderr so the run report on stdout stays clean.
pub fn init(settings: &LogSettings) -> Result<()> {
    if let Some(parent) = settings.file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.file)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    let console_layer = settings
        .console
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter(&settings.level)?)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| ConfigError::Invalid(format!("logging already initialised: {}", e)))
}
