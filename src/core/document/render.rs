//! DocumentSnapshot -> Markdown

use super::*;
use crate::core::models::{DocumentSnapshot, SkippedEntry, Snippet, SnippetLabel, SourceUnit, Stats};

/// Backtick fence longer than any backtick run in `content` (at least 3)
pub fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in content.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

fn fenced(lang: &str, content: &str) -> String {
    let fence = fence_for(content);
    format!("{}{}\n{}\n{}", fence, lang, content, fence)
}

fn render_file(file: &SourceUnit) -> String {
    format!(
        "### {}{}\n\n{}",
        FILE_ENTRY_PREFIX,
        file.path,
        fenced(&file.language, &file.content)
    )
}

fn snippet_heading(snippet: &Snippet) -> String {
    match &snippet.label {
        SnippetLabel::Lines { range } => format!("{}{}", LINES_ENTRY_PREFIX, range),
        SnippetLabel::Entity { kind, name } => format!("{}: {}", kind.title(), name),
    }
}

fn render_stats(stats: &Stats) -> String {
    let mut output = String::new();
    output.push_str(&format!("- Total files: {}\n", stats.total_files));
    output.push_str(&format!("- Total lines: {}", stats.total_lines));

    let total: usize = stats.languages.values().sum();
    if total > 0 {
        let ranked: Vec<String> = stats
            .ranked_languages()
            .into_iter()
            .map(|(lang, count)| {
                format!("{} {} ({:.1}%)", lang, count, count as f64 * 100.0 / total as f64)
            })
            .collect();
        output.push_str(&format!("\n- Languages: {}", ranked.join(", ")));
    }
    output
}

fn render_skipped(entry: &SkippedEntry) -> String {
    let mut output = format!("### {}\n\n{}{}", entry.path, REASON_BULLET, entry.reason);
    if let Some(size) = entry.size_kb {
        output.push_str(&format!("\n{}{:.1} KB", SIZE_BULLET, size));
    }
    if let Some(lines) = entry.estimated_lines {
        output.push_str(&format!("\n{}{}", LINES_BULLET, lines));
    }
    output.push('\n');
    output.push_str(HINT_BULLET);
    output
}

fn section(heading: &str, entries: &[String]) -> String {
    format!("{}\n\n{}", heading, entries.join("\n\n"))
}

/// Serialize a snapshot. Empty sections are omitted; statistics always appear.
pub fn render_document(doc: &DocumentSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    let header = doc.header.trim_end();
    if !header.is_empty() {
        parts.push(header.to_string());
    }

    if !doc.structure.is_empty() {
        parts.push(section(SECTION_STRUCTURE, &[fenced("text", &doc.structure)]));
    }

    if !doc.core_files.is_empty() {
        let files: Vec<String> = doc.core_files.iter().map(render_file).collect();
        parts.push(section(SECTION_CORE_FILES, &files));
    }

    if !doc.other_files.is_empty() {
        let files: Vec<String> = doc.other_files.iter().map(render_file).collect();
        parts.push(section(SECTION_OTHER_FILES, &files));
    }

    for group in &doc.snippet_groups {
        let lang = group.language();
        let snippets: Vec<String> = group
            .snippets
            .iter()
            .map(|s| format!("### {}\n\n{}", snippet_heading(s), fenced(lang, &s.content)))
            .collect();
        parts.push(section(
            &format!("{}{}", SECTION_SNIPPETS_PREFIX, group.file_path),
            &snippets,
        ));
    }

    parts.push(section(SECTION_STATS, &[render_stats(&doc.stats)]));

    if !doc.skipped.is_empty() {
        let mut entries = vec![
            "The following files were not collected automatically and need manual handling:".to_string(),
        ];
        entries.extend(doc.skipped.iter().map(render_skipped));
        parts.push(section(SECTION_SKIPPED, &entries));
    }

    if let Some(intent) = doc.intent.as_deref().map(str::trim).filter(|i| !i.is_empty()) {
        parts.push(section(SECTION_INTENT, &[fenced("text", intent)]));
    }

    let mut output = parts.join(&format!("\n\n{}\n\n", SECTION_SEPARATOR));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{EntityKind, SnippetGroup};

    #[test]
    fn test_fence_grows_past_content_backticks() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("``inline``"), "```");
        assert_eq!(fence_for("```rust\nx\n```"), "````");
    }

    #[test]
    fn test_render_sections_in_order() {
        let mut doc = DocumentSnapshot {
            header: "# Project: demo".to_string(),
            structure: "main.py".to_string(),
            ..Default::default()
        };
        doc.core_files.push(SourceUnit::new("main.py", "python", "print(1)", 8));
        let mut group = SnippetGroup::new("lib.rs");
        group.snippets.push(Snippet::new(
            SnippetLabel::Entity { kind: EntityKind::Function, name: "run".into() },
            "fn run() {}",
        ));
        doc.snippet_groups.push(group);
        doc.skipped.push(SkippedEntry::too_large("big.c", 612.3, 500, Some(9000)));
        doc.intent = Some("review parsing".into());
        doc.recount_all();

        let out = render_document(&doc);
        let order = [
            "# Project: demo",
            SECTION_STRUCTURE,
            SECTION_CORE_FILES,
            "### File: main.py\n\n```python\nprint(1)\n```",
            "## 🧩 Snippets: lib.rs",
            "### Function: run\n\n```rust\nfn run() {}\n```",
            SECTION_STATS,
            "- Total files: 2\n- Total lines: 2\n- Languages: python 1 (50.0%), rust 1 (50.0%)",
            SECTION_SKIPPED,
            "- **Reason**: too large (612.3 KB > 500 KB)\n- **Size**: 612.3 KB\n- **Estimated lines**: ~9000",
            SECTION_INTENT,
        ];
        let mut cursor = 0;
        for needle in order {
            let found = out[cursor..].find(needle).unwrap_or_else(|| panic!("missing {needle}"));
            cursor += found + needle.len();
        }
        assert!(!out.contains(SECTION_OTHER_FILES));
        assert!(out.ends_with("## 💡 Collection Intent\n\n```text\nreview parsing\n```\n"));
    }

    #[test]
    fn test_empty_snapshot_renders_stats_only() {
        let out = render_document(&DocumentSnapshot::default());
        assert_eq!(out, "## 📊 Statistics\n\n- Total files: 0\n- Total lines: 0\n");
    }
}
