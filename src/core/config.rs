//! Collector configuration
//!
//! JSON file, by default `<project>/.code_collector.json`. Every field is
//! optional; command-line flags override what the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{CollectorError, Result, ResultExt};
use super::models::CleanMode;

/// Default configuration file name inside a project
pub const CONFIG_FILE_NAME: &str = ".code_collector.json";

/// Default per-file size ceiling in KB
pub const DEFAULT_MAX_FILE_SIZE_KB: u64 = 500;

/// Runtime configuration for the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Files above this size are skipped, not read
    pub max_file_size_kb: u64,
    /// Paths, file names or path suffixes placed in the core bucket
    pub core_files: Vec<String>,
    /// Extra case-insensitive junk file name regexes
    pub junk_patterns: Vec<String>,
    /// Skip generated/vendor files
    pub remove_junk: bool,
    /// Whole-file transformation in batch mode
    pub clean_mode: CleanMode,
    /// Derive default core files and a header label from marker files
    pub detect_project: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
            core_files: Vec::new(),
            junk_patterns: Vec::new(),
            remove_junk: true,
            clean_mode: CleanMode::None,
            detect_project: true,
        }
    }
}

impl CollectorConfig {
    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CollectorError::invalid_config(e.to_string()))
    }

    /// Load from file path; a missing file yields defaults, a malformed one an error
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading {}", path.display()))
    }

    /// Get the default config path for a project
    pub fn default_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Size ceiling in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }
}

/// Explicit config path if given, else the project default
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<CollectorConfig> {
    match explicit {
        Some(path) if !path.exists() => Err(CollectorError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Some(path) => CollectorConfig::load_from_file(path),
        None => CollectorConfig::load_from_file(&CollectorConfig::default_path(project_root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.max_file_size_kb, 500);
        assert_eq!(config.max_file_size_bytes(), 512_000);
        assert!(config.remove_junk);
        assert!(config.detect_project);
        assert_eq!(config.clean_mode, CleanMode::None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            CollectorConfig::from_json(r#"{"core_files": ["main.py"], "clean_mode": "skeleton"}"#).unwrap();
        assert_eq!(config.core_files, vec!["main.py"]);
        assert_eq!(config.clean_mode, CleanMode::Skeleton);
        assert_eq!(config.max_file_size_kb, 500);
        assert!(config.remove_junk);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            CollectorConfig::from_json(r#"{"max_file_size_kb": "big"}"#),
            Err(CollectorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_malformed_file_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ nope").unwrap();

        let err = load_config(None, tmp.path()).unwrap_err();
        assert!(matches!(err, CollectorError::WithContext { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_config_default_location() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(None, tmp.path()).unwrap(), CollectorConfig::default());

        fs::write(tmp.path().join(CONFIG_FILE_NAME), r#"{"max_file_size_kb": 10}"#).unwrap();
        assert_eq!(load_config(None, tmp.path()).unwrap().max_file_size_kb, 10);
    }

    #[test]
    fn test_load_config_explicit_missing() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        assert!(load_config(Some(&missing), tmp.path()).is_err());
    }
}
