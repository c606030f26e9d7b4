//! code_collector - collect source files and snippets into one Markdown document
//!
//! Whole files, line ranges or named functions/classes are extracted from a
//! project and rendered into a document meant for humans and coding agents.
//! Re-running in append mode parses the previous document back and merges
//! new material into it exactly once.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/main.rs**: Thin wrapper that calls the library
//!
//! # Example
//!
//! ```no_run
//! use code_collector::core::{Collector, CollectorConfig};
//!
//! let collector = Collector::with_config(".", CollectorConfig::default())?;
//! let partial = collector.batch_import(&["src/lib.rs"]);
//! let markdown = collector.generate_document(&partial, Some("review the API"), None);
//! println!("{}", markdown);
//! # Ok::<(), code_collector::core::CollectorError>(())
//! ```

pub mod core;

pub use crate::core::{
    Collector, CollectorConfig, CollectorError, DocumentSnapshot, ExtractionSpec, PartialResult,
    Result,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the code_collector library
pub fn version() -> &'static str {
    VERSION
}
