//! `tracing-subscriber` initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`); output format from
//! `RIGOPS_LOG_FORMAT` (`json`, the default, or `text`).

use tracing_subscriber::EnvFilter;

pub const FORMAT_ENV: &str = "RIGOPS_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var(FORMAT_ENV).ok().as_deref().map(str::trim) {
            Some("text") | Some("pretty") => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize from the environment. Repeated calls are no-ops.
pub fn init() {
    init_with("info", LogFormat::from_env());
}

/// Initialize with an explicit fallback filter and format.
///
/// `RUST_LOG` still wins over `default_filter` when set.
pub fn init_with(default_filter: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A second init (tests, embedding apps) finds a subscriber already set.
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
