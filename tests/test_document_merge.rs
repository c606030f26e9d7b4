//! Document round-trip and merge properties
//!
//! The rendered document is the only persisted state, so render -> parse
//! must reproduce the snapshot and merging must be idempotent and
//! duplicate-free.

use std::collections::HashSet;

use code_collector::core::{
    merge, parse_document, render_document, ConfigClassifier, DocumentSnapshot, EntityKind, PartialResult,
    SkippedEntry, Snippet, SnippetGroup, SnippetLabel, SourceUnit,
};

fn classifier() -> ConfigClassifier {
    ConfigClassifier::new(vec!["main.rs".to_string()], None)
}

fn unit(path: &str, lang: &str, content: &str) -> SourceUnit {
    SourceUnit::new(path, lang, content, content.len() as u64)
}

fn function(name: &str, body: &str) -> Snippet {
    Snippet::new(
        SnippetLabel::Entity {
            kind: EntityKind::Function,
            name: name.to_string(),
        },
        body,
    )
}

fn sample_result() -> PartialResult {
    let mut group = SnippetGroup::new("src/parser.rs");
    group.snippets.push(function("parse", "fn parse() {\n    todo()\n}"));
    group.snippets.push(Snippet::new(
        SnippetLabel::Lines { range: "1-3".into() },
        "use std::io;\n\nconst N: usize = 3;",
    ));

    let mut result = PartialResult {
        files: vec![
            unit("src/main.rs", "rust", "fn main() {\n    run();\n}\n"),
            unit("README.md", "markdown", "# Demo\n\n```rust\nfn x() {}\n```\n\n## Usage\n"),
        ],
        snippet_groups: vec![group],
        structure: "README.md\nsrc/\n    ├── main.rs\n    └── parser.rs".into(),
        skipped: vec![
            SkippedEntry::too_large("vendor/huge.c", 812.46, 500, Some(24000)),
            SkippedEntry::undecodable("assets/logo.bin"),
        ],
        ..Default::default()
    };
    result.stats.add_language("rust", 2);
    result.stats.add_language("markdown", 1);
    result
}

fn sample_snapshot() -> DocumentSnapshot {
    let base = DocumentSnapshot {
        header: "# Project: demo\n\n**Generated**: 2024-01-01 00:00:00".into(),
        ..Default::default()
    };
    let mut doc = merge(base, &sample_result(), &classifier());
    doc.intent = Some("Trace the parse path".into());
    doc
}

#[test]
fn test_render_parse_round_trip() {
    let doc = sample_snapshot();
    let text = render_document(&doc);
    let parsed = parse_document(&text);

    assert_eq!(parsed, doc);
    assert_eq!(render_document(&parsed), text);
}

#[test]
fn test_fenced_markdown_survives_round_trip() {
    let doc = sample_snapshot();
    let text = render_document(&doc);
    assert!(text.contains("````markdown\n# Demo"));

    let parsed = parse_document(&text);
    let readme = parsed.files().find(|f| f.path == "README.md").unwrap();
    assert_eq!(readme.content, "# Demo\n\n```rust\nfn x() {}\n```\n\n## Usage\n");
    assert_eq!(parsed.other_files.len(), 1);
}

#[test]
fn test_merge_through_text_is_idempotent() {
    let once = render_document(&sample_snapshot());
    let twice = render_document(&merge(parse_document(&once), &sample_result(), &classifier()));
    assert_eq!(once, twice);
}

#[test]
fn test_merge_is_duplicate_free() {
    let mut extra = sample_result();
    extra.files.push(unit("src/main.rs", "rust", "fn main() {}\n"));
    extra.snippet_groups[0].snippets.push(function("parse", "fn parse() {}"));
    extra.snippet_groups[0].snippets.push(function("lex", "fn lex() {}"));

    let doc = merge(sample_snapshot(), &extra, &classifier());

    let paths: Vec<&str> = doc.files().map(|f| f.path.as_str()).collect();
    let unique: HashSet<&str> = paths.iter().copied().collect();
    assert_eq!(paths.len(), unique.len());

    let group = doc.snippet_group("src/parser.rs").unwrap();
    let ids: Vec<&str> = group.snippets.iter().map(|s| s.identity()).collect();
    assert_eq!(ids, vec!["parse", "1-3", "lex"]);
    assert_eq!(doc.stats.total_files, 3);
}

#[test]
fn test_priority_files_go_to_core_section() {
    let doc = sample_snapshot();
    assert_eq!(doc.core_files.len(), 1);
    assert_eq!(doc.core_files[0].path, "src/main.rs");

    let text = render_document(&doc);
    let core = text.find("## 🎯 Core Files").unwrap();
    let other = text.find("## 📄 Code Files").unwrap();
    assert!(core < other);
}

#[test]
fn test_snippet_extraction_clears_skipped_entry() {
    let doc = sample_snapshot();
    assert!(doc.skipped.iter().any(|s| s.path == "vendor/huge.c"));

    let mut group = SnippetGroup::new("vendor/huge.c");
    group.snippets.push(Snippet::new(
        SnippetLabel::Lines { range: "10-12".into() },
        "int a;\nint b;\nint c;",
    ));
    let followup = PartialResult {
        snippet_groups: vec![group],
        ..Default::default()
    };

    let doc = merge(parse_document(&render_document(&doc)), &followup, &classifier());
    assert!(doc.skipped.iter().all(|s| s.path != "vendor/huge.c"));
    assert_eq!(doc.skipped.len(), 1);
    assert_eq!(doc.stats.languages.get("c"), Some(&1));
}

#[test]
fn test_totals_recomputed_from_content() {
    let doc = sample_snapshot();
    let file_lines: usize = doc.files().map(|f| f.line_count).sum();
    let snippet_lines: usize = doc.snippet_groups.iter().map(|g| g.total_lines()).sum();
    assert_eq!(doc.stats.total_lines, file_lines + snippet_lines);
    assert_eq!(doc.stats.total_files, 3);
}
