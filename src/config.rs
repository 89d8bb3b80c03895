//! Studio configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::DEFAULT_STUDIO_NAME;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SEWSTUDIO_CONFIG";
pub const DEFAULT_CONFIG_NAME: &str = "sewstudio.json";
pub const DEFAULT_LOG_FILTER: &str = "sewstudio_core=info,warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Printed on title pages and in every footer
    #[serde(default = "default_studio_name")]
    pub studio_name: String,

    /// Where the CLI writes documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_studio_name() -> String {
    DEFAULT_STUDIO_NAME.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            studio_name: default_studio_name(),
            output_dir: default_output_dir(),
            bind_addr: default_bind_addr(),
            log_filter: default_log_filter(),
        }
    }
}

impl StudioConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path, else `SEWSTUDIO_CONFIG`, else `sewstudio.json` in the
    /// working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.studio_name, "Signature Sewing Studio");
        assert_eq!(config.bind_addr, "127.0.0.1:8787");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"studio_name": "Hem & Haw", "output_dir": "/tmp/packs"}}"#).unwrap();

        let config = StudioConfig::load(file.path()).unwrap();
        assert_eq!(config.studio_name, "Hem & Haw");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/packs"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "studio_name = 'toml?'").unwrap();
        assert!(matches!(
            StudioConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = StudioConfig::resolve_path(Some(Path::new("custom.json")));
        assert_eq!(path, PathBuf::from("custom.json"));
    }
}
