//! Comment stripping and junk-file filtering
//!
//! Both are regex heuristics: comment markers inside string literals are
//! stripped too, which is accepted for the readability gain.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use super::error::{CollectorError, Result};

lazy_static! {
    static ref PY_IMPORT: Regex = Regex::new(r"(?m)^[ \t]*(?:import|from)\s+.*$").unwrap();
    static ref PY_LINE_COMMENT: Regex = Regex::new(r"#.*").unwrap();
    static ref PY_SINGLE_DOCSTRING: Regex = Regex::new(r"(?s)'''.*?'''").unwrap();
    static ref PY_DOUBLE_DOCSTRING: Regex = Regex::new(r#"(?s)""".*?""""#).unwrap();

    static ref C_DIRECTIVE: Regex =
        Regex::new(r"(?m)^[ \t]*#\s*(?:include|pragma|import).*$").unwrap();
    // `//` not preceded by `:` so URLs like http://... survive
    static ref GUARDED_LINE_COMMENT: Regex = Regex::new(r"(?m)(^|[^:])//.*").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"//.*").unwrap();
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();

    static ref WHITESPACE_ONLY_LINE: Regex = Regex::new(r"(?m)^[ \t]+$").unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Built-in junk file name patterns (generated vendor/HAL files)
pub const BUILTIN_JUNK_PATTERNS: &[&str] = &[
    r"stm32.*?xx",
    r"system_",
    r"stm32f4xx_hal_conf",
    r"FreeRTOSConfig",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    Python,
    /// C/C++: also drops preprocessor includes
    Native,
    /// `//` guarded against `://`, plus block comments
    Guarded,
    /// Plain `//` and block comments
    Plain,
    None,
}

fn comment_style(ext: &str) -> CommentStyle {
    match ext.trim_start_matches('.').to_lowercase().as_str() {
        "py" => CommentStyle::Python,
        "c" | "cpp" | "h" | "hpp" => CommentStyle::Native,
        "js" | "ts" | "jsx" | "tsx" | "java" | "kt" | "scala" => CommentStyle::Guarded,
        "go" | "rs" => CommentStyle::Plain,
        _ => CommentStyle::None,
    }
}

/// Strip comments (and import noise) for `ext`, then tidy blank lines
pub fn remove_comments(content: &str, ext: &str) -> String {
    let mut text = content.to_string();

    match comment_style(ext) {
        CommentStyle::Python => {
            text = PY_IMPORT.replace_all(&text, "").into_owned();
            text = PY_LINE_COMMENT.replace_all(&text, "").into_owned();
            text = PY_SINGLE_DOCSTRING.replace_all(&text, "").into_owned();
            text = PY_DOUBLE_DOCSTRING.replace_all(&text, "").into_owned();
        }
        CommentStyle::Native => {
            text = C_DIRECTIVE.replace_all(&text, "").into_owned();
            text = GUARDED_LINE_COMMENT.replace_all(&text, "$1").into_owned();
            text = BLOCK_COMMENT.replace_all(&text, "").into_owned();
        }
        CommentStyle::Guarded => {
            text = GUARDED_LINE_COMMENT.replace_all(&text, "$1").into_owned();
            text = BLOCK_COMMENT.replace_all(&text, "").into_owned();
        }
        CommentStyle::Plain => {
            text = LINE_COMMENT.replace_all(&text, "").into_owned();
            text = BLOCK_COMMENT.replace_all(&text, "").into_owned();
        }
        CommentStyle::None => {}
    }

    let text = WHITESPACE_ONLY_LINE.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Case-insensitive file name filter for generated/vendor files
#[derive(Debug, Clone)]
pub struct JunkFilter {
    patterns: Vec<Regex>,
}

impl JunkFilter {
    /// Built-in patterns plus `extra` ones; invalid extras are a config error
    pub fn new(extra: &[String]) -> Result<Self> {
        let patterns = BUILTIN_JUNK_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| CollectorError::invalid_config(format!("junk pattern '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_junk(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }
}

impl Default for JunkFilter {
    fn default() -> Self {
        Self {
            patterns: BUILTIN_JUNK_PATTERNS
                .iter()
                .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
                .collect(),
        }
    }
}
