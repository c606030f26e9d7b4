//! Core data models for code_collector
//!
//! Everything a run produces is a plain value: [`SourceUnit`]s and
//! [`SnippetGroup`]s from extraction, [`SkippedEntry`]s for files that could
//! not be included, and the [`DocumentSnapshot`] that is both rendered to and
//! parsed back from the Markdown artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::error::CollectorError;
use crate::core::language::detect_language;

/// Kind of named entity a snippet request can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Function,
    Class,
    Method,
    Struct,
    Enum,
    Type,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Function,
        EntityKind::Class,
        EntityKind::Method,
        EntityKind::Struct,
        EntityKind::Enum,
        EntityKind::Type,
    ];

    /// Lowercase tag as used in range JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Class => "class",
            EntityKind::Method => "method",
            EntityKind::Struct => "struct",
            EntityKind::Enum => "enum",
            EntityKind::Type => "type",
        }
    }

    /// Capitalized tag as used in snippet headings
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Function => "Function",
            EntityKind::Class => "Class",
            EntityKind::Method => "Method",
            EntityKind::Struct => "Struct",
            EntityKind::Enum => "Enum",
            EntityKind::Type => "Type",
        }
    }

    /// Parse either tag form, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == lower)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Range JSON as written by callers, before validation
#[derive(Debug, Deserialize)]
struct RawSpec {
    #[serde(rename = "type")]
    kind: String,
    start: Option<usize>,
    end: Option<usize>,
    name: Option<String>,
}

/// A request to pull a portion of one file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSpec")]
pub enum ExtractionSpec {
    /// 1-based inclusive lines; clamped to the file. `end: None` means last line.
    LineRange { start: usize, end: Option<usize> },
    /// A declaration located by name
    NamedEntity { kind: EntityKind, name: String },
}

impl TryFrom<RawSpec> for ExtractionSpec {
    type Error = CollectorError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        if raw.kind == "lines" {
            return Ok(ExtractionSpec::LineRange {
                start: raw.start.unwrap_or(1),
                end: raw.end,
            });
        }

        let kind = EntityKind::parse(&raw.kind).ok_or_else(|| {
            CollectorError::invalid_ranges(format!("unknown extraction type '{}'", raw.kind))
        })?;
        match raw.name {
            Some(name) if !name.trim().is_empty() => Ok(ExtractionSpec::NamedEntity { kind, name }),
            _ => Err(CollectorError::invalid_ranges(format!(
                "'{}' extraction requires a non-empty name",
                kind
            ))),
        }
    }
}

impl ExtractionSpec {
    /// Parse the `--ranges` JSON array
    pub fn parse_list(json: &str) -> crate::core::error::Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| CollectorError::invalid_ranges(e.to_string()))
    }
}

/// What a snippet was extracted as; also its identity within a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetLabel {
    /// Range label such as `10-50`
    Lines { range: String },
    Entity { kind: EntityKind, name: String },
}

/// One resolved extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub label: SnippetLabel,
    pub content: String,
    /// Always `content.lines().count()`
    pub line_count: usize,
}

impl Snippet {
    pub fn new(label: SnippetLabel, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_count = content.lines().count();
        Self {
            label,
            content,
            line_count,
        }
    }

    /// Name for entities, range label for line extractions
    pub fn identity(&self) -> &str {
        match &self.label {
            SnippetLabel::Lines { range } => range,
            SnippetLabel::Entity { name, .. } => name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// All snippets taken from one file, in request order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetGroup {
    pub file_path: String,
    pub snippets: Vec<Snippet>,
}

impl SnippetGroup {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            snippets: Vec::new(),
        }
    }

    pub fn language(&self) -> &'static str {
        detect_language(&self.file_path)
    }

    pub fn total_lines(&self) -> usize {
        self.snippets.iter().map(|s| s.line_count).sum()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.snippets.iter().any(|s| s.identity() == identity)
    }
}

/// One physical file's extracted representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    /// Display language tag (fence label)
    pub language: String,
    pub content: String,
    pub line_count: usize,
    pub size_bytes: u64,
}

impl SourceUnit {
    pub fn new(
        path: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        let content = content.into();
        let line_count = content.lines().count();
        Self {
            path: path.into(),
            language: language.into(),
            content,
            line_count,
            size_bytes,
        }
    }
}

/// A file that could not be included
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
    pub size_kb: Option<f64>,
    pub estimated_lines: Option<usize>,
}

impl SkippedEntry {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
            size_kb: None,
            estimated_lines: None,
        }
    }

    /// Size is kept at the one-decimal precision it is displayed with
    pub fn too_large(path: impl Into<String>, size_kb: f64, limit_kb: u64, lines: Option<usize>) -> Self {
        let size_kb = (size_kb * 10.0).round() / 10.0;
        Self {
            path: path.into(),
            reason: format!("too large ({:.1} KB > {} KB)", size_kb, limit_kb),
            size_kb: Some(size_kb),
            estimated_lines: lines,
        }
    }

    pub fn undecodable(path: impl Into<String>) -> Self {
        Self::new(path, "encoding error, unable to read")
    }

    pub fn junk(path: impl Into<String>) -> Self {
        Self::new(path, "junk file (auto-filtered)")
    }
}

/// Aggregate statistics shown at the end of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_files: usize,
    pub total_lines: usize,
    pub languages: BTreeMap<String, usize>,
}

impl Stats {
    pub fn add_language(&mut self, language: &str, count: usize) {
        *self.languages.entry(language.to_string()).or_insert(0) += count;
    }

    /// Languages by descending count, ties by name
    pub fn ranked_languages(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.languages.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
    }
}

/// Which whole-file transformation batch mode applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanMode {
    #[default]
    None,
    /// Strip comments and import noise
    Comments,
    /// Keep declarations only
    Skeleton,
}

/// Output of one extraction pass (batch or snippets), before merging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialResult {
    pub files: Vec<SourceUnit>,
    pub snippet_groups: Vec<SnippetGroup>,
    /// Rendered tree of the collected paths; empty in snippet mode
    pub structure: String,
    pub stats: Stats,
    pub skipped: Vec<SkippedEntry>,
}

impl PartialResult {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.snippet_groups.is_empty()
    }
}

/// Full structured state of one generated document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    /// Everything above the first section heading, kept verbatim
    pub header: String,
    pub structure: String,
    pub core_files: Vec<SourceUnit>,
    pub other_files: Vec<SourceUnit>,
    pub snippet_groups: Vec<SnippetGroup>,
    pub stats: Stats,
    pub skipped: Vec<SkippedEntry>,
    /// Closing summary of why the material was collected
    pub intent: Option<String>,
}

impl DocumentSnapshot {
    /// Core files followed by other files
    pub fn files(&self) -> impl Iterator<Item = &SourceUnit> {
        self.core_files.iter().chain(self.other_files.iter())
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.files().any(|f| f.path == path)
    }

    pub fn snippet_group(&self, path: &str) -> Option<&SnippetGroup> {
        self.snippet_groups.iter().find(|g| g.file_path == path)
    }

    /// Recompute totals from the collections; per-language counts are left alone
    pub fn recount_totals(&mut self) {
        let file_lines: usize = self.files().map(|f| f.line_count).sum();
        let snippet_lines: usize = self.snippet_groups.iter().map(|g| g.total_lines()).sum();
        self.stats.total_files =
            self.core_files.len() + self.other_files.len() + self.snippet_groups.len();
        self.stats.total_lines = file_lines + snippet_lines;
    }

    /// Recompute every statistic, language counts included, from the collections
    pub fn recount_all(&mut self) {
        let mut languages = BTreeMap::new();
        for file in self.files() {
            *languages.entry(file.language.clone()).or_insert(0) += 1;
        }
        for group in &self.snippet_groups {
            *languages.entry(group.language().to_string()).or_insert(0) += 1;
        }
        self.stats.languages = languages;
        self.recount_totals();
    }
}
