//! Markdown -> DocumentSnapshot
//!
//! Line-oriented: fences are tracked first so nothing inside code is ever
//! taken for a heading. Unknown headings and stray text are ignored, and any
//! section may be missing. Statistics are recomputed from the parsed
//! content rather than read back from their rendered text.

use super::*;
use crate::core::models::{
    DocumentSnapshot, EntityKind, SkippedEntry, Snippet, SnippetGroup, SnippetLabel, SourceUnit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Structure,
    CoreFiles,
    OtherFiles,
    Snippets,
    Stats,
    Skipped,
    Intent,
    Unknown,
}

impl Section {
    fn from_heading(line: &str) -> Self {
        let line = line.trim_end();
        if line.starts_with(SECTION_SNIPPETS_PREFIX) {
            return Section::Snippets;
        }
        match line {
            SECTION_STRUCTURE => Section::Structure,
            SECTION_CORE_FILES => Section::CoreFiles,
            SECTION_OTHER_FILES => Section::OtherFiles,
            SECTION_STATS => Section::Stats,
            SECTION_SKIPPED => Section::Skipped,
            SECTION_INTENT => Section::Intent,
            _ => Section::Unknown,
        }
    }
}

/// Opening fence: (backtick run, info string)
fn opening_fence(line: &str) -> Option<(&str, &str)> {
    let ticks = line.len() - line.trim_start_matches('`').len();
    if ticks < 3 {
        return None;
    }
    Some((&line[..ticks], line[ticks..].trim()))
}

fn parse_snippet_label(title: &str) -> Option<SnippetLabel> {
    if let Some(range) = title.strip_prefix(LINES_ENTRY_PREFIX) {
        return Some(SnippetLabel::Lines {
            range: range.trim().to_string(),
        });
    }
    let (kind, name) = title.split_once(": ")?;
    Some(SnippetLabel::Entity {
        kind: EntityKind::parse(kind)?,
        name: name.trim().to_string(),
    })
}

struct ParseState {
    doc: DocumentSnapshot,
    section: Section,
    /// Title of the current `### ` entry, consumed by its fence
    entry: Option<String>,
    intent_lines: Vec<String>,
}

impl ParseState {
    fn on_section(&mut self, line: &str) {
        self.section = Section::from_heading(line);
        self.entry = None;
        if self.section == Section::Snippets {
            let path = line.trim_end()[SECTION_SNIPPETS_PREFIX.len()..].trim();
            self.doc.snippet_groups.push(SnippetGroup::new(path));
        }
    }

    fn on_entry(&mut self, title: &str) {
        let title = title.trim();
        if self.section == Section::Skipped {
            self.doc.skipped.push(SkippedEntry::new(title, ""));
        }
        self.entry = Some(title.to_string());
    }

    fn on_fence(&mut self, lang: &str, content: String) {
        match self.section {
            Section::Structure if self.doc.structure.is_empty() => self.doc.structure = content,
            Section::CoreFiles | Section::OtherFiles => {
                let Some(path) = self
                    .entry
                    .take()
                    .and_then(|t| t.strip_prefix(FILE_ENTRY_PREFIX).map(str::to_string))
                else {
                    return;
                };
                let lang = if lang.is_empty() { "text" } else { lang };
                let size = content.len() as u64;
                let unit = SourceUnit::new(path, lang, content, size);
                if self.section == Section::CoreFiles {
                    self.doc.core_files.push(unit);
                } else {
                    self.doc.other_files.push(unit);
                }
            }
            Section::Intent if !content.trim().is_empty() => self.doc.intent = Some(content),
            Section::Snippets => {
                let Some(label) = self.entry.take().and_then(|t| parse_snippet_label(&t)) else {
                    return;
                };
                if let Some(group) = self.doc.snippet_groups.last_mut() {
                    group.snippets.push(Snippet::new(label, content));
                }
            }
            _ => {}
        }
    }

    fn on_text(&mut self, line: &str) {
        match self.section {
            Section::Skipped => {
                let Some(entry) = self.doc.skipped.last_mut() else {
                    return;
                };
                if let Some(reason) = line.strip_prefix(REASON_BULLET) {
                    entry.reason = reason.trim().to_string();
                } else if let Some(size) = line.strip_prefix(SIZE_BULLET) {
                    entry.size_kb = size.split_whitespace().next().and_then(|s| s.parse().ok());
                } else if let Some(lines) = line.strip_prefix(LINES_BULLET) {
                    entry.estimated_lines = lines.trim().parse().ok();
                }
            }
            Section::Intent if line.trim() != SECTION_SEPARATOR => {
                self.intent_lines.push(line.to_string());
            }
            _ => {}
        }
    }

    fn finish(mut self) -> DocumentSnapshot {
        // Unfenced intent text from hand-edited documents
        let intent = self.intent_lines.join("\n").trim().to_string();
        if self.doc.intent.is_none() && !intent.is_empty() {
            self.doc.intent = Some(intent);
        }
        self.doc.recount_all();
        self.doc
    }
}

/// Parse a previously rendered document. Never fails; unrecognized input
/// yields a snapshot with whatever could be recovered.
pub fn parse_document(text: &str) -> DocumentSnapshot {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut header_end: Option<usize> = None;
    let mut state = ParseState {
        doc: DocumentSnapshot::default(),
        section: Section::Preamble,
        entry: None,
        intent_lines: Vec::new(),
    };

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some((fence, lang)) = opening_fence(line) {
            let close = (i + 1..lines.len())
                .find(|&j| lines[j].trim_end() == fence)
                .unwrap_or(lines.len());
            let content = lines[i + 1..close].join("\n");
            state.on_fence(lang, content);
            i = close + 1;
            continue;
        }

        if line.starts_with("## ") {
            header_end.get_or_insert(i);
            state.on_section(line);
        } else if let Some(title) = line.strip_prefix("### ") {
            state.on_entry(title);
        } else {
            state.on_text(line.trim_end_matches('\r'));
        }
        i += 1;
    }

    let header_lines = &lines[..header_end.unwrap_or(lines.len())];
    let header = header_lines.join("\n");
    let header = header.trim_end();
    state.doc.header = header
        .strip_suffix(SECTION_SEPARATOR)
        .unwrap_or(header)
        .trim_end()
        .to_string();

    state.finish()
}
