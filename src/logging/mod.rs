//! Logging setup for hosts embedding the tokenizer
//!
//! The library itself only emits `tracing` events. Hosts that have no
//! subscriber of their own can install one here:
//! - `EnvFilter` with a global level and per-module overrides
//! - text or JSON formatting
//! - console and/or rolling file output through `tracing-appender`

mod config;

#[cfg(test)]
mod tests;

pub use config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, DEFAULT_LOG_FILE};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Failed to create log directory {path:?}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filter directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },
}

pub type LoggingResult<T> = Result<T, LoggingError>;

/// Keeps the file writer alive; buffered events are flushed on drop
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    log_directory: Option<PathBuf>,
    _guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Directory receiving log files, if file output is enabled
    pub fn log_directory(&self) -> Option<&PathBuf> {
        self.log_directory.as_ref()
    }
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("log_directory", &self.log_directory)
            .finish()
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> LoggingResult<LoggingGuard> {
    let env_filter = build_env_filter(&config)?;

    let console = config.writes_console().then(|| console_layer(&config));
    let (file, guard, log_directory) = if config.writes_file() {
        let directory = config.directory();
        let (layer, guard) = file_layer(&config, &directory)?;
        (Some(layer), Some(guard), Some(directory))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| LoggingError::InitializationError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        output = ?config.output,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        log_directory,
        _guard: guard,
    })
}

/// Global level plus one directive per module override
pub fn build_env_filter(config: &LoggingConfig) -> LoggingResult<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.as_str());

    let mut modules: Vec<_> = config.module_levels.iter().collect();
    modules.sort_by(|a, b| a.0.cmp(b.0));
    for (module, level) in modules {
        let directive = format!("{}={}", module, level);
        let parsed = directive
            .parse::<Directive>()
            .map_err(|e| LoggingError::InvalidDirective {
                directive: directive.clone(),
                reason: e.to_string(),
            })?;
        filter = filter.add_directive(parsed);
    }

    Ok(filter)
}

fn console_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_target(config.include_target)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info);

    match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Text => layer.boxed(),
    }
}

fn file_layer<S>(
    config: &LoggingConfig,
    directory: &Path,
) -> LoggingResult<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreationError {
        path: directory.to_path_buf(),
        source,
    })?;

    let rotation = match config.rotation {
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };
    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(&config.file_name)
        .build(directory)
        .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_target)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info)
        .with_ansi(false);

    let layer = match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Text => layer.boxed(),
    };
    Ok((layer, guard))
}
