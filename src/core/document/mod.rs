//! Markdown document model
//!
//! The generated document is also the only persisted state: append runs
//! parse it back into a [`DocumentSnapshot`](crate::core::models::DocumentSnapshot),
//! merge new material in, and render it again.
//!
//! ## Layout
//!
//! Sections appear in a fixed order, separated by `---` lines: header,
//! directory structure, core files, other files, one section per snippet
//! group, statistics, skipped files, collection intent. Code is fenced with
//! a run of backticks longer than any run inside the code, and headings are
//! only recognized outside fences, so arbitrary source text survives
//! a render/parse round trip.

mod merge;
mod parse;
mod render;

pub use merge::merge;
pub use parse::parse_document;
pub use render::{fence_for, render_document};

pub const SECTION_STRUCTURE: &str = "## 📁 Directory Structure";
pub const SECTION_CORE_FILES: &str = "## 🎯 Core Files";
pub const SECTION_OTHER_FILES: &str = "## 📄 Code Files";
pub const SECTION_SNIPPETS_PREFIX: &str = "## 🧩 Snippets: ";
pub const SECTION_STATS: &str = "## 📊 Statistics";
pub const SECTION_SKIPPED: &str = "## ⚠️ Skipped Files";
pub const SECTION_INTENT: &str = "## 💡 Collection Intent";

pub(crate) const FILE_ENTRY_PREFIX: &str = "File: ";
pub(crate) const LINES_ENTRY_PREFIX: &str = "Lines ";
pub(crate) const SECTION_SEPARATOR: &str = "---";

pub(crate) const REASON_BULLET: &str = "- **Reason**: ";
pub(crate) const SIZE_BULLET: &str = "- **Size**: ";
pub(crate) const LINES_BULLET: &str = "- **Estimated lines**: ~";
pub(crate) const HINT_BULLET: &str =
    "- **Hint**: use snippet mode (--mode snippets) to pull specific functions, classes or line ranges";
