use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "vektor_engine=debug"). When it is `None`, `RUST_LOG` is consulted, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// Millisecond timestamps, useful when reading frame pacing from the log.
    pub timestamp_millis: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            timestamp_millis: true,
        }
    }
}

impl LoggingConfig {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match (&self.env_filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder.filter_level(self.default_level);
            }
        }

        builder.write_style(self.write_style);
        if self.timestamp_millis {
            builder.format_timestamp_millis();
        }
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger once.
///
/// Subsequent calls are ignored, as is a logger installed by someone else first.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");
    });
}
