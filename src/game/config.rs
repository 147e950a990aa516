use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in units
    pub window_width: u32,
    /// Height of the playing field in units
    pub window_height: u32,
    /// Distance between adjacent cells; all positions are multiples of it
    pub step_size: u32,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Head position of a fresh snake
    pub initial_head: (i32, i32),
    /// Number of segments of a fresh snake
    pub initial_length: usize,
    /// Random draws tried before food is picked from the list of free cells
    pub max_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 400,
            window_height: 400,
            step_size: 20,
            tick_interval_ms: 150,
            initial_head: (100, 100),
            initial_length: 3,
            max_spawn_attempts: 64,
        }
    }
}

/// Most cells allowed along either side of the grid
pub const MAX_GRID_CELLS: u32 = 200;

impl GameConfig {
    /// Create a new configuration with a custom window size
    #[cfg(test)]
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Number of playable columns
    pub fn columns(&self) -> u32 {
        self.window_width.checked_div(self.step_size).unwrap_or(0)
    }

    /// Number of playable rows
    pub fn rows(&self) -> u32 {
        self.window_height.checked_div(self.step_size).unwrap_or(0)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_size == 0 {
            return Err(invalid("step_size must be positive".to_string()));
        }

        for (name, value) in [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
        ] {
            if value == 0 || value % self.step_size != 0 {
                return Err(invalid(format!(
                    "{name} must be a positive multiple of step_size ({}), got {value}",
                    self.step_size
                )));
            }
            if i32::try_from(value).is_err() || value / self.step_size > MAX_GRID_CELLS {
                return Err(invalid(format!(
                    "{name} of {value} gives more than {MAX_GRID_CELLS} cells per side"
                )));
            }
        }

        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be positive".to_string()));
        }

        if self.initial_length < 3 {
            return Err(invalid(format!(
                "initial_length must be at least 3, got {}",
                self.initial_length
            )));
        }

        if self.max_spawn_attempts == 0 {
            return Err(invalid("max_spawn_attempts must be at least 1".to_string()));
        }

        let step = self.step_size as i64;
        let (head_x, head_y) = (self.initial_head.0 as i64, self.initial_head.1 as i64);
        if head_x % step != 0 || head_y % step != 0 {
            return Err(invalid(format!(
                "initial_head ({head_x}, {head_y}) is not aligned to step_size {step}"
            )));
        }

        // A fresh snake extends to the left of its head.
        let tail_x = head_x - step * (self.initial_length as i64 - 1);
        if tail_x < 0
            || head_x >= self.window_width as i64
            || head_y < 0
            || head_y >= self.window_height as i64
        {
            return Err(invalid(format!(
                "initial snake of length {} at ({head_x}, {head_y}) does not fit the window",
                self.initial_length
            )));
        }

        let cells = self.columns() as u64 * self.rows() as u64;
        if cells <= self.initial_length as u64 {
            return Err(invalid(format!(
                "grid of {cells} cells leaves no room for food"
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.window_width, 400);
        assert_eq!(config.window_height, 400);
        assert_eq!(config.step_size, 20);
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.columns(), 20);
        assert_eq!(config.rows(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(600, 300);
        assert_eq!(config.columns(), 30);
        assert_eq!(config.rows(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("tick_interval_ms = 90\nstep_size = 10\n").unwrap();
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.step_size, 10);
        assert_eq!(config.window_width, 400);
        assert_eq!(config.initial_head, (100, 100));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("step_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_width = 200\nwindow_height = 200").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.window_width, 200);
        assert_eq!(config.columns(), 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_rejects_misaligned_window() {
        let config = GameConfig::new(410, 400);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_oversized_window() {
        let config = GameConfig::new(4_000_000_000, 400);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig::new(400, 20 * (MAX_GRID_CELLS + 1));
        assert!(config.validate().is_err());

        let config = GameConfig::new(20 * MAX_GRID_CELLS, 20 * MAX_GRID_CELLS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_step_has_no_cells() {
        let config = GameConfig {
            step_size: 0,
            ..Default::default()
        };
        assert_eq!(config.columns(), 0);
        assert_eq!(config.rows(), 0);
    }

    #[test]
    fn test_rejects_zero_step() {
        let config = GameConfig {
            step_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_short_snake() {
        let config = GameConfig {
            initial_length: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_snake_outside_window() {
        let config = GameConfig {
            initial_head: (20, 100),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_head: (100, 400),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_head: (105, 100),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_grid_without_room_for_food() {
        let config = GameConfig {
            window_width: 60,
            window_height: 20,
            initial_head: (40, 0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            window_width: 80,
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
