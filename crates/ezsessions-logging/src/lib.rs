//! # ezsessions-logging
//!
//! Tracing setup for ezsessions.
//!
//! Library crates never install a subscriber themselves. They emit `tracing`
//! events inside an injected `Diagnostics` scope; this crate builds the
//! subscribers that end up behind it.
//!
//! ## Log Formats
//!
//! - `Pretty` - Human-readable colored output
//! - `JSON` - Structured JSON lines
//! - `Compact` - Minimal text output

use std::path::Path;

use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to prepare log file: {0}")]
    LogFile(#[from] std::io::Error),

    #[error("Log file path has no file name: {0}")]
    InvalidLogFile(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// Build a subscriber without installing it.
///
/// Events go to stderr, or to `log_file` when one is given. `RUST_LOG`
/// overrides `level`. Keep the returned guard alive for as long as the
/// dispatch is used, or buffered file output is lost.
pub fn build_dispatch(
    level: &str,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<(Dispatch, Option<WorkerGuard>), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard, ansi) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| LoggingError::InvalidLogFile(path.display().to_string()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(format, writer, ansi));

    Ok((Dispatch::new(subscriber), guard))
}

/// Initialize tracing for the application
pub fn init_tracing(
    level: &str,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, LoggingError> {
    let (dispatch, guard) = build_dispatch(level, format, log_file)?;
    tracing::dispatcher::set_global_default(dispatch)?;
    Ok(guard)
}

fn fmt_layer<S>(format: LogFormat, writer: BoxMakeWriter, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_json_dispatch_writes_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("ezsessions.log");

        let (dispatch, guard) = build_dispatch("debug", LogFormat::Json, Some(&path)).unwrap();
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::error!(session_id = "SID000000000001", "termination failed");
        });
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.starts_with('{'));
        assert!(line.contains("termination failed"));
        assert!(line.contains("SID000000000001"));
    }

    #[test]
    fn test_log_file_needs_a_name() {
        let result = build_dispatch("info", LogFormat::Pretty, Some(Path::new("/")));
        assert!(matches!(result, Err(LoggingError::InvalidLogFile(_))));
    }
}
