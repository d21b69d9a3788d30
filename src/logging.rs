//! Log subscriber setup for the binary. The library only emits `tracing`
//! events and never installs a subscriber itself.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => {
            EnvFilter::try_new(&from_env).map_err(|_| LoggingError::Filter(from_env))
        }
        _ => EnvFilter::try_new(level).map_err(|_| LoggingError::Filter(level.to_string())),
    }
}

/// Install the global subscriber, appending to `config.file`.
///
/// Returns `Ok(false)` without installing anything when no file is set; the
/// terminal UI owns stdout and stderr.
pub fn init(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };

    let filter = build_filter(&config.level)?;
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(true)
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_noop() {
        let config = LoggingConfig::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_open_log_file_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("c4.log");
        assert!(matches!(
            open_log_file(&path),
            Err(LoggingError::FileOpen { .. })
        ));
    }

    #[test]
    fn test_open_log_file_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c4.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
