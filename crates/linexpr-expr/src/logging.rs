//! Structured logging setup.
//!
//! Library code only emits `tracing` events. Hosts that have no subscriber of
//! their own can call [`enable_logging`], configured by:
//!
//! - `LINEXPR_TRACE`: filter directive (`debug`, `linexpr_expr=trace`, ...), default `off`
//! - `LINEXPR_LOG_FORMAT`: `pretty` (default) or `json`
//! - `LINEXPR_LOG_FILE`: optional path, appended to in addition to stderr

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const TRACE_ENV: &str = "LINEXPR_TRACE";
pub const LOG_FORMAT_ENV: &str = "LINEXPR_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "LINEXPR_LOG_FILE";

/// Errors produced while installing the log subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidFilter { directive: String, reason: String },
    InvalidFormat { format: String },
    OpenLogFile { path: String, reason: String },
    InitFailed { reason: String },
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat { .. } => "LOG_INVALID_FORMAT",
            LoggingError::OpenLogFile { .. } => "LOG_FILE_OPEN",
            LoggingError::InitFailed { .. } => "LOG_INIT_FAILED",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter { directive, reason } => write!(
                f,
                "[{}] Invalid log filter '{}': {}",
                self.code(),
                directive,
                reason
            ),
            LoggingError::InvalidFormat { format } => write!(
                f,
                "[{}] Invalid {} '{}' (expected 'json' or 'pretty')",
                self.code(),
                LOG_FORMAT_ENV,
                format
            ),
            LoggingError::OpenLogFile { path, reason } => write!(
                f,
                "[{}] Failed to open log file {}: {}",
                self.code(),
                path,
                reason
            ),
            LoggingError::InitFailed { reason } => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat {
                format: value.to_string(),
            })
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Explicit `level` wins over `LINEXPR_TRACE`; everything else comes from
    /// the environment.
    pub fn from_env(level: Option<&str>) -> Result<Self, LoggingError> {
        Self::from_lookup(level, |key| env::var(key).ok())
    }

    /// Same resolution as [`LoggingConfig::from_env`], reading variables
    /// through `lookup`.
    pub fn from_lookup<F>(level: Option<&str>, lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = level
            .map(ToString::to_string)
            .or_else(|| lookup(TRACE_ENV))
            .unwrap_or_else(|| "off".to_string());
        let format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };
        let file = lookup(LOG_FILE_ENV).map(PathBuf::from);
        Ok(Self {
            level,
            format,
            file,
        })
    }

    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.level.eq_ignore_ascii_case("off") {
            return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
        }
        EnvFilter::try_new(&self.level).map_err(|err| LoggingError::InvalidFilter {
            directive: self.level.clone(),
            reason: err.to_string(),
        })
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::OpenLogFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::InitFailed {
        reason: err.to_string(),
    }
}

/// Install a global subscriber.
///
/// Returns `Ok(false)` if a subscriber is already configured.
///
/// # Errors
///
/// Invalid filter or format, an unopenable log file, or a failed install.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let config = LoggingConfig::from_env(level)?;
    let filter = config.filter()?;

    match config.format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &config.file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &config.file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    tracing::debug!(
        component = "logging",
        operation = "enable",
        status = "success",
        level = %config.level,
        "Logging initialized"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{LOG_FILE_ENV, LOG_FORMAT_ENV, LogFormat, LoggingConfig, LoggingError, TRACE_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }

    #[test]
    fn log_format_parse_is_case_insensitive() {
        assert_eq!(LogFormat::parse("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty").unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn log_format_rejects_unknown() {
        let err = LogFormat::parse("xml").unwrap_err();
        assert_eq!(err.code(), "LOG_INVALID_FORMAT");
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn from_lookup_defaults_to_off_and_pretty() {
        let resolved = LoggingConfig::from_lookup(None, lookup_in(&[])).unwrap();
        assert_eq!(resolved.level, "off");
        assert_eq!(resolved.format, LogFormat::Pretty);
        assert_eq!(resolved.file, None);
    }

    #[test]
    fn from_lookup_falls_back_to_trace_variable() {
        let vars = [
            (TRACE_ENV, "linexpr_expr=debug"),
            (LOG_FORMAT_ENV, "json"),
            (LOG_FILE_ENV, "/tmp/linexpr.log"),
        ];
        let resolved = LoggingConfig::from_lookup(None, lookup_in(&vars)).unwrap();
        assert_eq!(resolved.level, "linexpr_expr=debug");
        assert_eq!(resolved.format, LogFormat::Json);
        assert_eq!(resolved.file, Some(PathBuf::from("/tmp/linexpr.log")));

        let explicit = LoggingConfig::from_lookup(Some("warn"), lookup_in(&vars)).unwrap();
        assert_eq!(explicit.level, "warn");
    }

    #[test]
    fn from_lookup_rejects_invalid_format_variable() {
        let err = LoggingConfig::from_lookup(None, lookup_in(&[(LOG_FORMAT_ENV, "xml")]))
            .unwrap_err();
        assert_eq!(
            err,
            LoggingError::InvalidFormat {
                format: "xml".to_string()
            }
        );
    }

    #[test]
    fn filter_accepts_off_and_directives() {
        assert!(config("off").filter().is_ok());
        assert!(config("linexpr_expr=trace").filter().is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        let err = config("linexpr_expr=notalevel").filter().unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }
}
