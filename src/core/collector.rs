//! Collector - main orchestration for code_collector
//!
//! The Collector is the primary interface for turning project files into a
//! document. It coordinates reading, size gating, junk filtering, cleaning,
//! snippet resolution and, in append mode, merging with a prior document.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::classify::{ConfigClassifier, FileClassifier};
use crate::core::cleaner::remove_comments;
use crate::core::config::CollectorConfig;
use crate::core::document::{merge, parse_document, render_document};
use crate::core::error::Result;
use crate::core::language::detect_language;
use crate::core::locator::EntityLocator;
use crate::core::manifest::{ProjectManifest, ProjectType};
use crate::core::models::{
    CleanMode, ExtractionSpec, PartialResult, SkippedEntry, SnippetGroup, SourceUnit,
};
use crate::core::reader::{FsReader, SourceReader};
use crate::core::skeleton::extract_code_skeleton;
use crate::core::tree::render_tree;

fn extension_of(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collector - orchestrates extraction and document generation
pub struct Collector {
    /// Project root; relative inputs resolve against it
    root: PathBuf,
    config: CollectorConfig,
    manifest: Option<ProjectManifest>,
    classifier: Box<dyn FileClassifier>,
    reader: Box<dyn SourceReader>,
}

impl Collector {
    /// Create a Collector with default configuration
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, CollectorConfig::default())
    }

    /// Create a Collector with custom configuration
    pub fn with_config(root: impl AsRef<Path>, config: CollectorConfig) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let manifest = config.detect_project.then(|| ProjectManifest::detect(&root));
        if let Some(m) = &manifest {
            debug!(project_type = ?m.project_type(), "detected project type");
        }
        let classifier = ConfigClassifier::from_config(&config, manifest.as_ref())?;

        Ok(Self {
            root,
            config,
            manifest,
            classifier: Box::new(classifier),
            reader: Box::new(FsReader),
        })
    }

    /// Builder: set a custom source reader
    pub fn with_reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Builder: set a custom file classifier
    pub fn with_classifier(mut self, classifier: impl FileClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Get the current configuration
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Detected project type, when detection ran and found markers
    pub fn project_type(&self) -> Option<ProjectType> {
        self.manifest
            .as_ref()
            .map(|m| m.project_type())
            .filter(|t| *t != ProjectType::Unknown)
    }

    /// Directory name of the project root
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// Project-relative `/` path, or the path as given when outside the root
    fn relative_path(&self, resolved: &Path, given: &str) -> String {
        if let Ok(rel) = resolved.strip_prefix(&self.root) {
            return to_slash_path(rel);
        }
        resolved
            .canonicalize()
            .ok()
            .and_then(|c| c.strip_prefix(&self.root).ok().map(to_slash_path))
            .unwrap_or_else(|| given.replace('\\', "/"))
    }

    fn clean(&self, content: String, path: &str) -> String {
        match self.config.clean_mode {
            CleanMode::None => content,
            CleanMode::Comments => remove_comments(&content, extension_of(path)),
            CleanMode::Skeleton => extract_code_skeleton(&content, extension_of(path)),
        }
    }

    /// Collect whole files. Per-file problems become skipped entries; missing
    /// paths are logged and ignored.
    pub fn batch_import<S: AsRef<str>>(&self, paths: &[S]) -> PartialResult {
        let mut result = PartialResult::default();
        let limit_bytes = self.config.max_file_size_bytes();

        for given in paths {
            let given = given.as_ref();
            let resolved = self.resolve_path(given);
            let Some(size) = self.reader.file_size(&resolved) else {
                warn!(path = given, "not a readable file, ignoring");
                continue;
            };
            let rel = self.relative_path(&resolved, given);
            if result.files.iter().any(|f| f.path == rel) {
                continue;
            }

            if size > limit_bytes {
                let size_kb = size as f64 / 1024.0;
                let lines = self.reader.count_lines(&resolved);
                warn!(path = %rel, size_kb, "file too large, skipping");
                result.skipped.push(SkippedEntry::too_large(
                    rel,
                    size_kb,
                    self.config.max_file_size_kb,
                    lines,
                ));
                continue;
            }

            if self.classifier.is_junk(&rel) {
                debug!(path = %rel, "junk file filtered");
                result.skipped.push(SkippedEntry::junk(rel));
                continue;
            }

            let decoded = match self.reader.read_source(&resolved) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!(path = %rel, error = %e, "unable to decode file");
                    result.skipped.push(SkippedEntry::undecodable(rel));
                    continue;
                }
            };
            debug!(path = %rel, encoding = decoded.encoding.as_str(), "read file");

            let content = self.clean(decoded.text, &rel);
            let language = detect_language(&rel);
            let unit = SourceUnit::new(rel, language, content, size);

            result.stats.total_lines += unit.line_count;
            result.stats.add_language(language, 1);
            result.files.push(unit);
        }

        result.stats.total_files = result.files.len();
        result.structure = render_tree(result.files.iter().map(|f| f.path.as_str()));
        info!(
            collected = result.files.len(),
            skipped = result.skipped.len(),
            "batch import finished"
        );
        result
    }

    /// Resolve extraction specs against one file.
    ///
    /// A missing or unreadable target is an error; specs that match nothing
    /// are dropped.
    pub fn extract_snippets(&self, target: &str, specs: &[ExtractionSpec]) -> Result<PartialResult> {
        let resolved = self.resolve_path(target);
        let decoded = self.reader.read_source(&resolved)?;
        let rel = self.relative_path(&resolved, target);
        let ext = extension_of(&rel);

        let locator = EntityLocator::new().with_skeleton(self.config.clean_mode == CleanMode::Skeleton);
        let mut group = SnippetGroup::new(rel.clone());
        for spec in specs {
            match locator.resolve(spec, &decoded.text, ext) {
                Some(snippet) => {
                    debug!(path = %rel, snippet = snippet.identity(), lines = snippet.line_count, "resolved");
                    group.snippets.push(snippet);
                }
                None => warn!(path = %rel, spec = ?spec, "no match, dropping"),
            }
        }

        let mut result = PartialResult::default();
        if !group.snippets.is_empty() {
            result.stats.total_files = 1;
            result.stats.total_lines = group.total_lines();
            result.stats.add_language(group.language(), 1);
            result.snippet_groups.push(group);
        }
        Ok(result)
    }

    /// Header block with the given generation timestamp
    pub fn build_header_at(&self, intent: Option<&str>, generated: &str) -> String {
        let mut header = format!("# Project: {}\n\n**Generated**: {}", self.project_name(), generated);
        if let Some(intent) = intent {
            // One line, so nothing in it can start a section
            let flat: Vec<&str> = intent.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
            header.push_str(&format!("\n**Intent**: {}", flat.join(" ")));
        }
        if let Some(project_type) = self.project_type() {
            header.push_str(&format!("\n**Project type**: {}", project_type.display_name()));
        }
        header
    }

    /// Header block stamped with the current local time
    pub fn build_header(&self, intent: Option<&str>) -> String {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.build_header_at(intent, &now)
    }

    /// Render a document for `partial`, folding it into `previous` when given
    pub fn generate_document(&self, partial: &PartialResult, intent: Option<&str>, previous: Option<&str>) -> String {
        let intent = intent.map(str::trim).filter(|i| !i.is_empty());

        let mut base = previous.map(parse_document).unwrap_or_default();
        if base.header.trim().is_empty() {
            base.header = self.build_header(intent);
        }

        let mut doc = merge(base, partial, self.classifier.as_ref());
        if let Some(intent) = intent {
            doc.intent = Some(intent.to_string());
        }

        info!(
            files = doc.core_files.len() + doc.other_files.len(),
            snippet_groups = doc.snippet_groups.len(),
            skipped = doc.skipped.len(),
            appended = previous.is_some(),
            "document generated"
        );
        render_document(&doc)
    }
}
