//! Configuration for screens and replays

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How escape sequences affect the pen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnsiMode {
    /// SGR sequences update the pen
    #[default]
    Preserve,
    /// SGR sequences are consumed without touching the pen; cursor and
    /// erase sequences still apply
    Strip,
}

/// Screen configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Escape sequence handling
    pub ansi_mode: AnsiMode,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 120,
            ansi_mode: AnsiMode::Preserve,
        }
    }
}

impl ScreenConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi_mode(mut self, ansi_mode: AnsiMode) -> Self {
        self.ansi_mode = ansi_mode;
        self
    }

    /// Reject zero-sized screens
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Replay timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Longest gap between two output events, in milliseconds
    pub max_idle_ms: f64,
    /// Playback speed multiplier
    pub speed: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_idle_ms: 2000.0,
            speed: 1.0,
        }
    }
}

impl ReplayConfig {
    #[must_use]
    pub fn with_max_idle_ms(mut self, max_idle_ms: f64) -> Self {
        self.max_idle_ms = max_idle_ms;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

/// Combined configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub replay: ReplayConfig,
}

impl Config {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.screen.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.screen.rows, 40);
        assert_eq!(config.screen.cols, 120);
        assert_eq!(config.screen.ansi_mode, AnsiMode::Preserve);
        assert_eq!(config.replay.max_idle_ms, 2000.0);
        assert_eq!(config.replay.speed, 1.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            Config::from_json(r#"{"screen": {"rows": 10, "ansi_mode": "strip"}}"#).unwrap();
        assert_eq!(config.screen.rows, 10);
        assert_eq!(config.screen.cols, 120);
        assert_eq!(config.screen.ansi_mode, AnsiMode::Strip);
        assert_eq!(config.replay, ReplayConfig::default());
    }

    #[test]
    fn test_from_json_rejects_zero_rows() {
        let err = Config::from_json(r#"{"screen": {"rows": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { rows: 0, cols: 120 }));
    }

    #[test]
    fn test_validate() {
        assert!(ScreenConfig::new(1, 1).validate().is_ok());
        assert!(ScreenConfig::new(0, 80).validate().is_err());
        assert!(ScreenConfig::new(24, 0).validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"replay": {"speed": 2.0}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.replay.speed, 2.0);
        assert_eq!(config.replay.max_idle_ms, 2000.0);
    }
}
