//! File classification predicates
//!
//! The document layer asks two questions about a path: does it belong in the
//! core bucket, and should it be skipped as generated junk.

#[cfg(test)]
use mockall::automock;

use super::cleaner::JunkFilter;
use super::config::CollectorConfig;
use super::error::Result;
use super::manifest::ProjectManifest;

/// Priority and junk predicates over relative paths
#[cfg_attr(test, automock)]
pub trait FileClassifier: Send + Sync {
    /// Whether the file goes in the core bucket
    fn is_priority(&self, path: &str) -> bool;

    /// Whether the file is generated/vendor noise
    fn is_junk(&self, path: &str) -> bool;
}

/// Classifier driven by [`CollectorConfig`]
#[derive(Debug, Clone)]
pub struct ConfigClassifier {
    core_files: Vec<String>,
    junk: Option<JunkFilter>,
}

impl ConfigClassifier {
    pub fn new(core_files: Vec<String>, junk: Option<JunkFilter>) -> Self {
        Self { core_files, junk }
    }

    /// Core files come from the config, or from the detected project type when
    /// the config names none
    pub fn from_config(config: &CollectorConfig, manifest: Option<&ProjectManifest>) -> Result<Self> {
        let core_files = match manifest {
            Some(m) if config.core_files.is_empty() => m
                .project_type()
                .default_core_files()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            _ => config.core_files.clone(),
        };
        let junk = if config.remove_junk {
            Some(JunkFilter::new(&config.junk_patterns)?)
        } else {
            None
        };
        Ok(Self::new(core_files, junk))
    }

    pub fn core_files(&self) -> &[String] {
        &self.core_files
    }
}

impl FileClassifier for ConfigClassifier {
    /// Exact path, exact file name, or a whole-component path suffix
    fn is_priority(&self, path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        self.core_files.iter().any(|core| {
            let core = core.trim_start_matches("./");
            path == core || file_name == core || path.ends_with(&format!("/{}", core))
        })
    }

    fn is_junk(&self, path: &str) -> bool {
        self.junk.as_ref().is_some_and(|j| j.is_junk(path))
    }
}
