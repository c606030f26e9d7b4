//! Language classification
//!
//! Two separate views of a file's extension:
//! - [`Language`]: the closed set of source families the locator and the
//!   skeleton extractors know how to handle (drives pattern tables and the
//!   block-end strategy).
//! - [`detect_language`]: the display tag used for fenced code blocks and the
//!   per-language statistics.

use std::path::Path;

/// How a language delimits its blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `{` / `}` pairs
    Braces,
    /// Leading whitespace
    Indentation,
}

/// Source families with dedicated declaration patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    /// JavaScript, JSX and script-bearing markup (html, vue)
    JavaScript,
    TypeScript,
    Java,
    Kotlin,
    CSharp,
    Go,
    Rust,
    C,
    Cpp,
    /// Anything else: bare-name matching, indentation-based block end
    Other,
}

impl Language {
    /// Classify an extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "py" | "pyw" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" | "html" | "htm" | "vue" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Language::Cpp,
            _ => Language::Other,
        }
    }

    /// Block delimitation used when locating the end of a declaration
    pub fn block_style(&self) -> BlockStyle {
        match self {
            Language::Python | Language::Other => BlockStyle::Indentation,
            _ => BlockStyle::Braces,
        }
    }
}

/// Detect the display language tag from a path's extension
pub fn detect_language(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "java" => "java",
        "cpp" | "hpp" => "cpp",
        "c" | "h" => "c",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "scala" => "scala",
        "r" => "r",
        "m" => "objective-c",
        "sql" => "sql",
        "sh" => "bash",
        "yaml" | "yml" => "yaml",
        "json" => "json",
        "xml" => "xml",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "md" => "markdown",
        "vue" => "vue",
        "svelte" => "svelte",
        _ => "text",
    }
}
