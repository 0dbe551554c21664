//! Tracing setup for the Lambda.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: verbosity, e.g. `debug`, `info`, `WARNING` (default: `warn`)
//! - `LOG_FORMAT`: `json` (default, CloudWatch) or `text`
//! - `RUST_LOG`: full `EnvFilter` directive; overrides `LOG_LEVEL` when set
//!
//! # Example
//!
//! ```no_run
//! use abk_hello_shared::{init_tracing, LoggingConfig};
//!
//! let config = LoggingConfig::from_env();
//! init_tracing(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines for CloudWatch Logs.
    #[default]
    Json,
    /// Human-readable output for local runs.
    Text,
}

impl LogFormat {
    /// Accepts "json", "text" or "pretty"; anything else is `Json`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Parse a verbosity name into a tracing level.
///
/// Accepts tracing names and the common `WARNING`/`CRITICAL`/`FATAL` spellings.
/// Unknown names fall back to `WARN`.
pub fn parse_level(s: &str) -> Level {
    match s.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" | "critical" | "fatal" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Process-wide logging configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Json,
        }
    }
}

impl LoggingConfig {
    /// Build configuration from `LOG_LEVEL` and `LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup("LOG_LEVEL")
            .map(|v| parse_level(&v))
            .unwrap_or(Level::WARN);

        let format = lookup("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Self { level, format }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Install the global tracing subscriber.
///
/// Call once from `main` before starting the Lambda runtime. A second call is a
/// no-op, so tests may call it freely.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_current_span(false)
                .with_span_list(false)
                .flatten_event(true);
            registry.with(json_layer).try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
