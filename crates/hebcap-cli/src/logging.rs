//! Tracing setup. Logs go to stderr so stdout stays clean for output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{CliConfig, LogFormat};

/// Build the filter from config, falling back to `warn` on bad directives.
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber: JSON lines or colored pretty output.
pub fn init_tracing(config: &CliConfig) {
    let env_filter = env_filter(config);

    match config.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(env_filter)
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(true)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter)
                .init();
        }
    }
}
