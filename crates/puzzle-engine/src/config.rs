//! Configuration file loading for the puzzle service.
//!
//! Settings live in `puzzles.toml` in the working directory. Every field is
//! optional; a missing file means all defaults.

use crate::selector::DEFAULT_MAX_ATTEMPTS;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or checking configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,
}

/// Puzzle service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PuzzleConfig {
    /// SQLite database holding the puzzle table.
    /// Defaults to "data/puzzles.db".
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Candidates tried per request before giving up. Defaults to 10.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed seed for puzzle selection. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_database() -> PathBuf {
    PathBuf::from("data/puzzles.db")
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            database: default_database(),
            max_attempts: default_max_attempts(),
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::InvalidMaxAttempts`] if it asks for zero attempts.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Like [`Self::load`], for a file at `path`.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("puzzles.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts);
        }
        Ok(())
    }

    /// The generator used to draw puzzles, seeded from `seed` when set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PuzzleConfig::load_from(dir.path().join("puzzles.toml")).unwrap();
        assert_eq!(config, PuzzleConfig::default());
        assert_eq!(config.database, PathBuf::from("data/puzzles.db"));
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("max_attempts = 3\nseed = 99\n");
        let config = PuzzleConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.database, default_database());
    }

    #[test]
    fn rejects_zero_attempts() {
        let file = write_config("max_attempts = 0\n");
        assert!(matches!(
            PuzzleConfig::load_from(file.path()),
            Err(ConfigError::InvalidMaxAttempts)
        ));
    }

    #[test]
    fn rejects_bad_toml() {
        let file = write_config("max_attempts = \"ten\"\n");
        assert!(matches!(
            PuzzleConfig::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn seeded_rng_is_repeatable() {
        let config = PuzzleConfig {
            seed: Some(5),
            ..PuzzleConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
