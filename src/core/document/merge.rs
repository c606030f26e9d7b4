//! Folding a new extraction into an existing snapshot
//!
//! Identity keys: files by path, snippet groups by file path, snippets by
//! name or range label within their group, skipped entries by path. Nothing
//! already present is replaced, so merging the same result twice equals
//! merging it once.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::core::classify::FileClassifier;
use crate::core::models::{DocumentSnapshot, PartialResult, SnippetGroup};

/// Merge `new` into `old`.
///
/// The header is never touched and the directory structure is only taken
/// from `new` when `old` has none; the old tree is not re-rendered to
/// include newly added paths. Totals are recomputed from the merged
/// collections; per-language counts grow by the entries this merge admitted.
pub fn merge(old: DocumentSnapshot, new: &PartialResult, classifier: &dyn FileClassifier) -> DocumentSnapshot {
    let mut doc = old;
    let mut admitted: BTreeMap<String, usize> = BTreeMap::new();

    for file in &new.files {
        if doc.contains_file(&file.path) {
            debug!(path = %file.path, "file already present, skipping");
            continue;
        }
        *admitted.entry(file.language.clone()).or_insert(0) += 1;
        if classifier.is_priority(&file.path) {
            doc.core_files.push(file.clone());
        } else {
            doc.other_files.push(file.clone());
        }
    }

    for group in &new.snippet_groups {
        let idx = match doc.snippet_groups.iter().position(|g| g.file_path == group.file_path) {
            Some(idx) => idx,
            None if group.snippets.is_empty() => continue,
            None => {
                *admitted.entry(group.language().to_string()).or_insert(0) += 1;
                doc.snippet_groups.push(SnippetGroup::new(group.file_path.clone()));
                doc.snippet_groups.len() - 1
            }
        };
        let target = &mut doc.snippet_groups[idx];
        for snippet in &group.snippets {
            if target.contains(snippet.identity()) {
                debug!(path = %group.file_path, snippet = snippet.identity(), "snippet already present");
                continue;
            }
            target.snippets.push(snippet.clone());
        }
    }

    // Paths this pass extracted successfully are no longer skipped
    let handled: HashSet<&str> = new
        .files
        .iter()
        .map(|f| f.path.as_str())
        .chain(
            new.snippet_groups
                .iter()
                .filter(|g| !g.snippets.is_empty())
                .map(|g| g.file_path.as_str()),
        )
        .collect();
    doc.skipped.retain(|s| !handled.contains(s.path.as_str()));
    for entry in &new.skipped {
        if handled.contains(entry.path.as_str()) || doc.skipped.iter().any(|s| s.path == entry.path) {
            continue;
        }
        doc.skipped.push(entry.clone());
    }

    if doc.structure.is_empty() {
        doc.structure = new.structure.clone();
    }

    for (language, count) in admitted {
        doc.stats.add_language(&language, count);
    }
    doc.recount_totals();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::MockFileClassifier;
    use crate::core::models::{EntityKind, SkippedEntry, Snippet, SnippetLabel, SourceUnit};

    fn classifier() -> MockFileClassifier {
        let mut mock = MockFileClassifier::new();
        mock.expect_is_priority().returning(|path| path == "main.py");
        mock.expect_is_junk().returning(|_| false);
        mock
    }

    fn entity(name: &str, body: &str) -> Snippet {
        Snippet::new(
            SnippetLabel::Entity {
                kind: EntityKind::Function,
                name: name.to_string(),
            },
            body,
        )
    }

    fn batch() -> PartialResult {
        let mut result = PartialResult {
            files: vec![
                SourceUnit::new("main.py", "python", "run()\n", 6),
                SourceUnit::new("util.py", "python", "a\nb\n", 4),
            ],
            structure: "main.py\nutil.py".to_string(),
            skipped: vec![SkippedEntry::too_large("big.c", 700.0, 500, Some(20000))],
            ..Default::default()
        };
        result.stats.add_language("python", 2);
        result
    }

    #[test]
    fn test_merge_into_empty_buckets_by_priority() {
        let doc = merge(DocumentSnapshot::default(), &batch(), &classifier());
        assert_eq!(doc.core_files.len(), 1);
        assert_eq!(doc.other_files[0].path, "util.py");
        assert_eq!(doc.structure, "main.py\nutil.py");
        assert_eq!(doc.stats.total_files, 2);
        assert_eq!(doc.stats.total_lines, 3);
        assert_eq!(doc.stats.languages.get("python"), Some(&2));
        assert_eq!(doc.skipped.len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge(DocumentSnapshot::default(), &batch(), &classifier());
        let twice = merge(once.clone(), &batch(), &classifier());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_old_structure_and_header_win() {
        let old = DocumentSnapshot {
            header: "# Project: old".into(),
            structure: "old.py".into(),
            ..Default::default()
        };
        let doc = merge(old, &batch(), &classifier());
        assert_eq!(doc.header, "# Project: old");
        assert_eq!(doc.structure, "old.py");
    }

    #[test]
    fn test_snippets_merge_by_identity() {
        let mut old = DocumentSnapshot::default();
        let mut group = SnippetGroup::new("calc.py");
        group.snippets.push(entity("total", "def total(): ..."));
        old.snippet_groups.push(group);
        old.recount_all();

        let mut group = SnippetGroup::new("calc.py");
        group.snippets.push(entity("total", "def total(): changed"));
        group.snippets.push(entity("tax", "def tax(): ..."));
        group.snippets.push(entity("tax", "def tax(): dup"));
        let new = PartialResult {
            snippet_groups: vec![group],
            ..Default::default()
        };

        let doc = merge(old, &new, &classifier());
        let merged = &doc.snippet_groups[0];
        assert_eq!(doc.snippet_groups.len(), 1);
        let names: Vec<&str> = merged.snippets.iter().map(|s| s.identity()).collect();
        assert_eq!(names, vec!["total", "tax"]);
        assert_eq!(merged.snippets[0].content, "def total(): ...");
        // Existing group: no new language count
        assert_eq!(doc.stats.languages.get("python"), Some(&1));
        assert_eq!(doc.stats.total_files, 1);
    }

    #[test]
    fn test_extracted_path_leaves_skipped_list() {
        let old = merge(DocumentSnapshot::default(), &batch(), &classifier());
        assert_eq!(old.skipped[0].path, "big.c");

        let mut group = SnippetGroup::new("big.c");
        group.snippets.push(Snippet::new(
            SnippetLabel::Lines { range: "1-2".into() },
            "int a;\nint b;",
        ));
        let new = PartialResult {
            snippet_groups: vec![group],
            ..Default::default()
        };
        let doc = merge(old, &new, &classifier());
        assert!(doc.skipped.is_empty());
        assert_eq!(doc.stats.languages.get("c"), Some(&1));
        assert_eq!(doc.stats.total_files, 3);
    }

    #[test]
    fn test_empty_new_group_is_not_added() {
        let new = PartialResult {
            snippet_groups: vec![SnippetGroup::new("empty.rs")],
            ..Default::default()
        };
        let doc = merge(DocumentSnapshot::default(), &new, &classifier());
        assert!(doc.snippet_groups.is_empty());
        assert!(doc.stats.languages.is_empty());
    }
}
