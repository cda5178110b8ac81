//! TOML configuration
//!
//! Everything has a default: an absent file, an empty file, and a file
//! that only overrides one table all work. `data_dir` selects durable
//! JSON-file storage; without it the app runs on the in-memory backend.

use serde::Deserialize;
use siteline_metrics::BonusPolicy;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Rendered cause.
        reason: String,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {reason}")]
    Parse {
        /// Path that was read.
        path: String,
        /// Rendered cause.
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for durable JSON storage; `None` runs in memory.
    pub data_dir: Option<PathBuf>,

    /// Bonus schedule overrides. The defaults are the dashboard's
    /// original thresholds and stay authoritative unless overridden.
    pub bonus: BonusPolicy,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.bonus, BonusPolicy::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("siteline.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "data_dir = \"/var/lib/siteline\"\n\n[[bonus.attendance]]\nmin = 98.0\nrate = 0.2"
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.data_dir.as_deref(),
            Some(Path::new("/var/lib/siteline"))
        );
        assert_eq!(config.bonus.attendance.len(), 1);
        assert_eq!(config.bonus.attendance[0].rate, 0.2);
        // Untouched schedules keep the built-in thresholds.
        assert_eq!(config.bonus.multiplier, BonusPolicy::default().multiplier);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/siteline.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
