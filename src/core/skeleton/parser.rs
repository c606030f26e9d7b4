//! Skeletonizer - per-language declaration-preserving extraction
//!
//! Brace languages go through [`hollow_out_bodies`]. Python walks lines and
//! keeps decorators, `def`/`async def` and `class` headers while skipping
//! function bodies. Class bodies are not skipped, so method signatures stay
//! visible. Extensions without a dedicated family (PHP, Swift, Scala, ...)
//! are hollowed like any brace language; data and prose formats pass
//! through unchanged.

use lazy_static::lazy_static;
use regex::Regex;

use super::hollow::hollow_out_bodies;
use super::types::SkeletonResult;
use crate::core::language::Language;

lazy_static! {
    static ref PYTHON_DECORATOR: Regex = Regex::new(r"^\s*@").unwrap();
    static ref PYTHON_DEF: Regex = Regex::new(r"^\s*(?:async\s+)?def\s").unwrap();
    static ref PYTHON_CLASS: Regex = Regex::new(r"^\s*class\s").unwrap();
}

/// Skeletonizer extracts declarations while stripping implementation bodies
#[derive(Debug, Default, Clone, Copy)]
pub struct Skeletonizer;

impl Skeletonizer {
    pub fn new() -> Self {
        Self
    }

    /// Skeletonize content for a given language
    pub fn skeletonize(&self, content: &str, lang: Language) -> SkeletonResult {
        let skeleton = match lang {
            Language::Python => skeletonize_python(content),
            _ => hollow_out_bodies(content),
        };
        SkeletonResult::new(content, skeleton)
    }
}

/// Extensions whose braces are data, not code blocks
const PASSTHROUGH_EXTENSIONS: &[&str] = &[
    "json", "yaml", "yml", "toml", "ini", "cfg", "xml", "csv", "md", "markdown", "txt", "rst",
];

/// Skeleton of `content`, dispatched on its file extension
pub fn extract_code_skeleton(content: &str, ext: &str) -> String {
    let ext = ext.trim_start_matches('.').to_lowercase();
    if PASSTHROUGH_EXTENSIONS.contains(&ext.as_str()) {
        return content.to_string();
    }
    Skeletonizer::new()
        .skeletonize(content, Language::from_extension(&ext))
        .content
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Decorators seen since the last declaration or ordinary statement
#[derive(Debug, Default)]
struct PendingDecorators {
    lines: Vec<String>,
}

impl PendingDecorators {
    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn flush_into(&mut self, out: &mut Vec<String>) {
        out.append(&mut self.lines);
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

fn skeletonize_python(content: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut pending = PendingDecorators::default();
    // Indent of the function whose body is being skipped
    let mut skipping_above: Option<usize> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        let indent = indent_of(line);

        if let Some(base) = skipping_above {
            if trimmed.is_empty() || indent > base {
                continue;
            }
            skipping_above = None;
        }

        if PYTHON_DECORATOR.is_match(line) {
            pending.push(line);
            continue;
        }

        let is_def = PYTHON_DEF.is_match(line);
        if is_def || PYTHON_CLASS.is_match(line) {
            pending.flush_into(&mut out);
            out.push(line.to_string());
            if is_def {
                skipping_above = Some(indent);
            }
            continue;
        }

        pending.clear();
    }

    out.join("\n")
}
