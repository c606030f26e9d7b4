//! Entity location by name
//!
//! Finds a declaration line through a per-language table of pattern
//! templates, then finds where its body ends: brace counting for brace
//! languages, indentation for the rest. First textual match wins, so an
//! overloaded or shadowed name resolves to its earliest occurrence, with two
//! exceptions: lines led by a statement keyword (`return add(1, 2);`) are
//! call sites, and in semicolon languages a declaration with a body is
//! preferred over an earlier bodiless one (a prototype). A bodiless match
//! that is the only one spans just its own statement.
//!
//! # Example
//! ```
//! use code_collector::core::{EntityKind, EntityLocator};
//!
//! let src = "fn a() {}\nfn add(x: u8) -> u8 {\n    x + 1\n}\n";
//! let found = EntityLocator::new().locate(src, "add", EntityKind::Function, "rs").unwrap();
//! assert_eq!((found.start_line, found.end_line), (2, 4));
//! ```

use regex::Regex;

use super::language::{BlockStyle, Language};
use super::models::{EntityKind, ExtractionSpec, Snippet, SnippetLabel};
use super::skeleton::{extract_code_skeleton, LiteralScanner};

/// (entity kind, declaration templates). `{name}` is replaced by the escaped name.
type DeclTable = &'static [(EntityKind, &'static [&'static str])];

const PY_DEF: &str = r"^\s*(?:async\s+)?def\s+{name}\s*\(";
const PY_CLASS: &str = r"^\s*class\s+{name}\s*[\(:]";

const PYTHON_DECLS: DeclTable = &[
    (EntityKind::Function, &[PY_DEF]),
    (EntityKind::Method, &[PY_DEF]),
    (EntityKind::Class, &[PY_CLASS]),
];

const JS_FUNCTION: &str =
    r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*{name}\s*[\(<]";
const JS_BINDING: &str = r"^\s*(?:export\s+)?(?:const|let|var)\s+{name}\s*[=:]";
const JS_METHOD: &str =
    r"^\s*(?:(?:public|private|protected|static|async|readonly|get|set)\s+)*{name}\s*\([^)]*\)\s*(?::[^{]*)?\{";
const JS_CLASS: &str = r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+{name}(?:[\s{<]|$)";

const JAVASCRIPT_DECLS: DeclTable = &[
    (EntityKind::Function, &[JS_FUNCTION, JS_BINDING]),
    (EntityKind::Method, &[JS_METHOD, JS_FUNCTION]),
    (EntityKind::Class, &[JS_CLASS]),
];

const TYPESCRIPT_DECLS: DeclTable = &[
    (EntityKind::Function, &[JS_FUNCTION, JS_BINDING]),
    (EntityKind::Method, &[JS_METHOD, JS_FUNCTION]),
    (EntityKind::Class, &[JS_CLASS]),
    (EntityKind::Enum, &[r"^\s*(?:export\s+)?(?:declare\s+)?(?:const\s+)?enum\s+{name}\b"]),
    (EntityKind::Type, &[r"^\s*(?:export\s+)?(?:declare\s+)?(?:type|interface)\s+{name}\b"]),
];

// Return type (or `fun`) then the name; no keyword of its own
const JVM_MEMBER: &str = r"^\s*(?:[\w<>\[\],.?@]+\s+)+{name}\s*(?:<[^>]*>\s*)?\(";
const JVM_CLASS: &str = r"\b(?:class|interface|record|object)\s+{name}\b";
const JVM_ENUM: &str = r"\benum\s+(?:class\s+)?{name}\b";

const JVM_DECLS: DeclTable = &[
    (EntityKind::Function, &[JVM_MEMBER]),
    (EntityKind::Method, &[JVM_MEMBER]),
    (EntityKind::Class, &[JVM_CLASS]),
    (EntityKind::Enum, &[JVM_ENUM]),
];

const CSHARP_DECLS: DeclTable = &[
    (EntityKind::Function, &[JVM_MEMBER]),
    (EntityKind::Method, &[JVM_MEMBER]),
    (EntityKind::Class, &[JVM_CLASS]),
    (EntityKind::Struct, &[r"\bstruct\s+{name}\b"]),
    (EntityKind::Enum, &[JVM_ENUM]),
];

const GO_FUNC: &str = r"^\s*func\s+(?:\([^)]*\)\s*)?{name}\s*[\(\[]";

const GO_DECLS: DeclTable = &[
    (EntityKind::Function, &[GO_FUNC]),
    (EntityKind::Method, &[GO_FUNC]),
    (EntityKind::Struct, &[r"^\s*type\s+{name}\s+struct\b"]),
    (EntityKind::Type, &[r"^\s*type\s+{name}\b"]),
];

const RUST_FN: &str =
    r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+{name}\s*[<(]"#;
const RUST_STRUCT: &str = r"^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+{name}\b";
const RUST_ENUM: &str = r"^\s*(?:pub(?:\([^)]*\))?\s+)?enum\s+{name}\b";
const RUST_TRAIT: &str = r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?trait\s+{name}\b";

const RUST_DECLS: DeclTable = &[
    (EntityKind::Function, &[RUST_FN]),
    (EntityKind::Method, &[RUST_FN]),
    (EntityKind::Struct, &[RUST_STRUCT]),
    (EntityKind::Enum, &[RUST_ENUM]),
    (EntityKind::Class, &[RUST_STRUCT, RUST_ENUM, RUST_TRAIT]),
    (EntityKind::Type, &[r"^\s*(?:pub(?:\([^)]*\))?\s+)?type\s+{name}\b", RUST_TRAIT]),
];

const C_FUNC: &str =
    r"^\s*(?:(?:static|inline|extern|const|unsigned|signed)\s+)*[\w:<>,]+[\s*&]+{name}\s*\(";
const C_STRUCT: &str = r"^\s*(?:typedef\s+)?struct\s+{name}\b";
const C_ENUM: &str = r"^\s*(?:typedef\s+)?enum\s+(?:class\s+)?{name}\b";

const C_DECLS: DeclTable = &[
    (EntityKind::Function, &[C_FUNC]),
    (EntityKind::Struct, &[C_STRUCT]),
    (EntityKind::Enum, &[C_ENUM]),
    (EntityKind::Type, &[r"^\s*typedef\b.*\b{name}\s*;", C_STRUCT]),
];

const CPP_FUNC: &str = r"^\s*(?:template\s*<[^>]*>\s*)?(?:(?:inline|static|virtual|constexpr|extern|explicit)\s+)*[\w:<>,]+[\s*&]+(?:[\w]+::)*{name}\s*\(";
const CPP_CLASS: &str = r"^\s*(?:template\s*<[^>]*>\s*)?class\s+{name}\s*(?::|\{|$)";

const CPP_DECLS: DeclTable = &[
    (EntityKind::Function, &[CPP_FUNC]),
    (EntityKind::Method, &[CPP_FUNC]),
    (EntityKind::Class, &[CPP_CLASS]),
    (EntityKind::Struct, &[C_STRUCT]),
    (EntityKind::Enum, &[C_ENUM]),
    (EntityKind::Type, &[r"^\s*(?:typedef\b.*\b{name}\s*;|using\s+{name}\s*=)"]),
];

const OTHER_DECLS: DeclTable = &[
    (EntityKind::Function, &[r"\b{name}\b"]),
    (EntityKind::Class, &[r"\b{name}\b"]),
    (EntityKind::Method, &[r"\b{name}\b"]),
    (EntityKind::Struct, &[r"\b{name}\b"]),
    (EntityKind::Enum, &[r"\b{name}\b"]),
    (EntityKind::Type, &[r"\b{name}\b"]),
];

fn declaration_table(lang: Language) -> DeclTable {
    match lang {
        Language::Python => PYTHON_DECLS,
        Language::JavaScript => JAVASCRIPT_DECLS,
        Language::TypeScript => TYPESCRIPT_DECLS,
        Language::Java | Language::Kotlin => JVM_DECLS,
        Language::CSharp => CSHARP_DECLS,
        Language::Go => GO_DECLS,
        Language::Rust => RUST_DECLS,
        Language::C => C_DECLS,
        Language::Cpp => CPP_DECLS,
        Language::Other => OTHER_DECLS,
    }
}

/// Compiled declaration patterns for one (language, kind, name)
fn declaration_patterns(lang: Language, kind: EntityKind, name: &str) -> Vec<Regex> {
    let escaped = regex::escape(name);
    declaration_table(lang)
        .iter()
        .filter(|(k, _)| *k == kind)
        .flat_map(|(_, templates)| templates.iter())
        .filter_map(|t| Regex::new(&t.replace("{name}", &escaped)).ok())
        .collect()
}

/// A located entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEntity {
    /// 1-indexed declaration line
    pub start_line: usize,
    /// 1-indexed, inclusive
    pub end_line: usize,
    pub text: String,
    pub line_count: usize,
}

/// Locates named entities and resolves extraction specs
#[derive(Debug, Default, Clone)]
pub struct EntityLocator {
    skeleton: bool,
}

impl EntityLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run located entity text through the skeleton extractor
    pub fn with_skeleton(mut self, skeleton: bool) -> Self {
        self.skeleton = skeleton;
        self
    }

    /// Find `name` declared as `kind` in `text`; `ext` selects the language
    pub fn locate(&self, text: &str, name: &str, kind: EntityKind, ext: &str) -> Option<LocatedEntity> {
        let lang = Language::from_extension(ext);
        let lines: Vec<&str> = text.lines().collect();

        let start = find_declaration(&lines, name, kind, lang)?;
        let end = match lang.block_style() {
            BlockStyle::Braces => statement_terminated(lang)
                .then(|| find_statement_end(&lines, start))
                .flatten()
                .unwrap_or_else(|| find_closing_brace(&lines, start)),
            BlockStyle::Indentation => find_end_by_indent(&lines, start),
        };

        let mut span = lines[start..end].join("\n");
        if self.skeleton {
            span = extract_code_skeleton(&span, ext);
        }
        let line_count = span.lines().count();

        Some(LocatedEntity {
            start_line: start + 1,
            end_line: end,
            text: span,
            line_count,
        })
    }

    /// Resolve one extraction spec into a snippet; `None` when nothing matched
    pub fn resolve(&self, spec: &ExtractionSpec, text: &str, ext: &str) -> Option<Snippet> {
        let snippet = match spec {
            ExtractionSpec::LineRange { start, end } => {
                let (label, content) = extract_line_range(text, *start, *end)?;
                Snippet::new(SnippetLabel::Lines { range: label }, content)
            }
            ExtractionSpec::NamedEntity { kind, name } => {
                let found = self.locate(text, name, *kind, ext)?;
                Snippet::new(
                    SnippetLabel::Entity {
                        kind: *kind,
                        name: name.clone(),
                    },
                    found.text,
                )
            }
        };
        (!snippet.is_empty()).then_some(snippet)
    }
}

/// Leading tokens that turn a `type name(` shape into a statement
const STATEMENT_KEYWORDS: &[&str] = &["return", "new", "throw", "else", "case", "await", "yield"];

fn leads_with_statement_keyword(line: &str) -> bool {
    let first = line
        .trim_start()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or("");
    STATEMENT_KEYWORDS.contains(&first)
}

/// Languages where a declaration without a body ends at `;`
fn statement_terminated(lang: Language) -> bool {
    matches!(
        lang,
        Language::C
            | Language::Cpp
            | Language::Java
            | Language::CSharp
            | Language::JavaScript
            | Language::TypeScript
    )
}

/// Index of the line declaring `name` as `kind`
pub fn find_declaration(lines: &[&str], name: &str, kind: EntityKind, lang: Language) -> Option<usize> {
    let patterns = declaration_patterns(lang, kind, name);
    if patterns.is_empty() {
        return None;
    }
    let mut candidates = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !leads_with_statement_keyword(line))
        .filter(|(_, line)| patterns.iter().any(|p| p.is_match(line)))
        .map(|(idx, _)| idx);

    let first = candidates.next()?;
    if !statement_terminated(lang) || find_statement_end(lines, first).is_none() {
        return Some(first);
    }
    Some(
        candidates
            .find(|&idx| find_statement_end(lines, idx).is_none())
            .unwrap_or(first),
    )
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Exclusive end index of the brace block opened at or after `start`.
/// Runs to EOF when no opening brace is ever seen.
pub fn find_closing_brace(lines: &[&str], start: usize) -> usize {
    let mut depth: usize = 0;
    let mut opened = false;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        for ch in strip_line_comment(line).chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' if opened => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return idx + 1;
                    }
                }
                _ => {}
            }
        }
    }
    lines.len()
}

/// Exclusive end of a bodiless declaration starting at `start`: the line
/// holding the first `;` outside parentheses and brackets, provided no `{`
/// comes before it. `None` when the declaration opens a body.
pub fn find_statement_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut scanner = LiteralScanner::new();
    let mut nesting: i32 = 0;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        for ch in strip_line_comment(line).chars() {
            if !scanner.step(ch).is_code() {
                continue;
            }
            match ch {
                '(' | '[' => nesting += 1,
                ')' | ']' => nesting -= 1,
                '{' => return None,
                ';' if nesting <= 0 => return Some(idx + 1),
                _ => {}
            }
        }
        scanner.step('\n');
    }
    None
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Exclusive end index of the indented block under `start`, trailing blanks dropped
pub fn find_end_by_indent(lines: &[&str], start: usize) -> usize {
    let base = indent_of(lines[start]);
    let mut end = lines.len();

    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) <= base {
            end = idx;
            break;
        }
    }

    while end > start + 1 && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    end
}

/// Clamped 1-based inclusive line range; returns `(label, text)` or `None` when empty
pub fn extract_line_range(text: &str, start: usize, end: Option<usize>) -> Option<(String, String)> {
    let lines: Vec<&str> = text.lines().collect();
    let start = start.max(1);
    let end = end.unwrap_or(lines.len()).min(lines.len());
    if start > end {
        return None;
    }
    Some((format!("{}-{}", start, end), lines[start - 1..end].join("\n")))
}
