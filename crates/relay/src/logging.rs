//! Tracing initialization with console or file output.
//!
//! `LOG_DESTINATION=console` (default) writes ANSI-colored lines to stdout;
//! `LOG_DESTINATION=file` writes daily rotating files under `LOG_DIR` with
//! the `LOG_FILE_PREFIX` name. `RUST_LOG` overrides the default filter.

use std::env;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(default_directives: &str) -> Result<()> {
    let log_destination = env::var("LOG_DESTINATION").unwrap_or_else(|_| "console".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    match log_destination.to_lowercase().as_str() {
        "file" => {
            let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
            let log_file_prefix = env::var("LOG_FILE_PREFIX").unwrap_or_else(|_| "relay".to_string());
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("failed to create log directory '{log_dir}'"))?;

            let file_appender = rolling::daily(&log_dir, &log_file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(false),
                )
                .try_init()
                .context("failed to initialize file tracing subscriber")?;

            // The guard owns the writer thread; leak it for the process lifetime.
            std::mem::forget(guard);
            info!("📝 Logging to daily rotating files: {log_dir}/{log_file_prefix}.<YYYY-MM-DD>");
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stdout)
                        .with_ansi(true)
                        .with_target(false),
                )
                .try_init()
                .context("failed to initialize console tracing subscriber")?;
        }
    }
    Ok(())
}
