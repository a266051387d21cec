// ABOUTME: Tracing subscriber assembly from a LoggingConfig
// ABOUTME: Composes env-filter, console, and rolling-file layers and installs them globally

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Keeps the non-blocking file writer flushing for the process lifetime.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber described by `config`.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let filter = build_env_filter(&config)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console {
        let layer = if config.json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(io::stdout)
                .boxed()
        } else {
            fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stdout)
                .boxed()
        };
        layers.push(layer);
    }

    if let Some(path) = &config.file {
        layers.push(build_file_layer(path)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to install global tracing subscriber")?;

    tracing::info!(
        level = %config.level,
        console = config.console,
        json = config.json,
        file = %config.file.as_deref().unwrap_or_else(|| Path::new("<disabled>")).display(),
        "pickwick logging initialized"
    );

    Ok(())
}

/// Translate the configured level and directives into an `EnvFilter`.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.to_string().to_lowercase());
    for directive in &config.directives {
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("invalid filter directive '{directive}'"))?,
        );
    }
    Ok(filter)
}

/// Daily-rolling file layer writing through a non-blocking worker.
fn build_file_layer(path: &Path) -> Result<Box<dyn Layer<Registry> + Send + Sync>> {
    let directory = path
        .parent()
        .context("log file path has no parent directory")?;
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("log file path has no file name")?;

    let (writer, guard) = non_blocking(rolling::daily(directory, file_name));
    let _ = FILE_GUARD.set(guard);

    Ok(fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed())
}
