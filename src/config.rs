use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::game::COLS;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub players: PlayersConfig,
    pub logging: LoggingConfig,
}

/// Terminal host settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Time the falling piece spends on each row
    pub drop_step_ms: u64,
    pub poll_interval_ms: u64,
    pub start_column: usize,
    pub highlight_win: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            drop_step_ms: 60,
            poll_interval_ms: 16,
            start_column: COLS / 2,
            highlight_win: true,
        }
    }
}

/// Display names for the two tokens.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub red_name: String,
    pub yellow_name: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            red_name: "Red".into(),
            yellow_name: "Yellow".into(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `connect_four=debug`
    pub level: String,
    /// Log destination. Logging is off when unset since the UI owns the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.drop_step_ms == 0 {
            return Err(ConfigError::Validation("ui.drop_step_ms must be > 0".into()));
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }

        let red = self.players.red_name.trim();
        let yellow = self.players.yellow_name.trim();
        if red.is_empty() || yellow.is_empty() {
            return Err(ConfigError::Validation(
                "player names must not be empty".into(),
            ));
        }
        if red == yellow {
            return Err(ConfigError::Validation(
                "player names must be distinct".into(),
            ));
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[ui]
drop_step_ms = 25
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.drop_step_ms, 25);
        // Other fields should be defaults
        assert_eq!(config.ui.start_column, 3);
        assert_eq!(config.players.red_name, "Red");
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.ui.drop_step_ms, default.ui.drop_step_ms);
        assert_eq!(config.logging.level, default.logging.level);
    }

    #[test]
    fn test_validation_rejects_zero_drop_step() {
        let mut config = AppConfig::default();
        config.ui.drop_step_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_poll_interval() {
        let mut config = AppConfig::default();
        config.ui.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_start_column_off_board() {
        let mut config = AppConfig::default();
        config.ui.start_column = COLS;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_player_name() {
        let mut config = AppConfig::default();
        config.players.yellow_name = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_player_names() {
        let mut config = AppConfig::default();
        config.players.yellow_name = "Red".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "connect_four=loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.ui.drop_step_ms, 60);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[players]
red_name = "Ada"
yellow_name = "Grace"

[logging]
file = "c4.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.players.red_name, "Ada");
        assert_eq!(config.logging.file, Some(PathBuf::from("c4.log")));
        // Others are defaults
        assert!(config.ui.highlight_win);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[ui]\nstart_column = 9\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
