//! Core module for code_collector
//!
//! This module provides the types and traits for collecting source files
//! into a single Markdown document.
//!
//! # Architecture
//!
//! - `models`: Core data structures (SourceUnit, Snippet, DocumentSnapshot)
//! - `error`: Error types using thiserror
//! - `language`: Extension to language mapping
//! - `config`: JSON configuration
//! - `manifest`: Project type detection
//! - `reader`: Encoding-tolerant file reads behind the SourceReader trait
//! - `cleaner`: Comment stripping and junk filtering
//! - `classify`: Priority/junk predicates behind the FileClassifier trait
//! - `tree`: Directory tree rendering
//! - `skeleton`: Body hollowing and declaration-only extraction
//! - `locator`: Named entity location
//! - `document`: Markdown render, parse and merge
//! - `collector`: Main Collector orchestration

pub mod classify;
pub mod cleaner;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod locator;
pub mod manifest;
pub mod models;
pub mod reader;
pub mod skeleton;
pub mod tree;

// Re-export commonly used types
pub use classify::{ConfigClassifier, FileClassifier};
pub use cleaner::{remove_comments, JunkFilter};
pub use collector::Collector;
pub use config::{load_config, CollectorConfig};
pub use document::{merge, parse_document, render_document};
pub use error::{CollectorError, Result, ResultExt};
pub use language::{detect_language, Language};
pub use locator::{EntityLocator, LocatedEntity};
pub use manifest::{ProjectManifest, ProjectType};
pub use models::{
    CleanMode, DocumentSnapshot, EntityKind, ExtractionSpec, PartialResult, SkippedEntry, Snippet,
    SnippetGroup, SnippetLabel, SourceUnit, Stats,
};
pub use reader::{DecodedText, Encoding, FsReader, SourceReader};
pub use skeleton::{extract_code_skeleton, hollow_out_bodies, Skeletonizer};
pub use tree::render_tree;
