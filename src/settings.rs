//! Game settings loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::games::memory::{Difficulty, Mode, SessionConfig, Timings};

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "strictly_memory.toml";

/// User settings: default session, timings and storage location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Session selected when the menu opens.
    #[serde(default)]
    game: GameSettings,

    /// Session delays.
    #[serde(default)]
    timings: TimingSettings,

    /// Where records are kept.
    #[serde(default)]
    storage: StorageSettings,
}

/// Default mode and difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSettings {
    /// Default mode.
    #[serde(default)]
    mode: Mode,
    /// Default difficulty.
    #[serde(default)]
    difficulty: Difficulty,
}

/// Delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingSettings {
    /// How long a mismatched pair stays face up.
    #[serde(default = "default_unflip_delay_ms")]
    unflip_delay_ms: u64,
    /// Countdown period.
    #[serde(default = "default_countdown_interval_ms")]
    countdown_interval_ms: u64,
    /// Pause before redealing on a mid-game reset.
    #[serde(default = "default_reset_delay_ms")]
    reset_delay_ms: u64,
}

fn default_unflip_delay_ms() -> u64 {
    750
}

fn default_countdown_interval_ms() -> u64 {
    1000
}

fn default_reset_delay_ms() -> u64 {
    400
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            unflip_delay_ms: default_unflip_delay_ms(),
            countdown_interval_ms: default_countdown_interval_ms(),
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

/// Record storage location.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite database path.
    #[serde(default = "default_db_path")]
    db_path: String,
}

#[instrument]
fn default_db_path() -> String {
    "strictly_memory.db".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(config = %settings.session_config(), "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads settings from a file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns the default session config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(*self.game.mode(), *self.game.difficulty())
    }

    /// Returns the session delays.
    pub fn session_timings(&self) -> Timings {
        Timings {
            unflip_delay: Duration::from_millis(self.timings.unflip_delay_ms),
            countdown_interval: Duration::from_millis(self.timings.countdown_interval_ms),
            reset_delay: Duration::from_millis(self.timings.reset_delay_ms),
        }
    }

    /// Overrides the default session.
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.game.mode = config.mode;
        self.game.difficulty = config.difficulty;
        self
    }

    /// Overrides the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.storage.db_path = db_path.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timings.countdown_interval_ms == 0 {
            return Err(ConfigError::new(
                "countdown_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.session_timings(), Timings::default());
        assert_eq!(settings.storage().db_path(), "strictly_memory.db");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let settings = Settings::from_toml(
            r#"
            [game]
            mode = "timed"
            difficulty = "hard"

            [timings]
            unflip_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.session_config(),
            SessionConfig::new(Mode::Timed, Difficulty::Hard)
        );
        assert_eq!(settings.session_timings().unflip_delay, Duration::from_millis(500));
        assert_eq!(settings.session_timings().reset_delay, Duration::from_millis(400));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = Settings::from_toml("[game]\nmode = \"blitz\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_countdown_rejected() {
        let result = Settings::from_toml("[timings]\ncountdown_interval_ms = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_or_default("/nonexistent/strictly_memory.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
