//! Source file reading with encoding fallback
//!
//! Decoders are tried in a fixed order: UTF-8 (a leading BOM is dropped),
//! GBK (which also covers GB2312), then Latin-1. Latin-1 maps every byte,
//! so a decoding failure only happens for content that looks binary (a NUL
//! byte in the first 8 KiB).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use encoding_rs::GBK;
#[cfg(test)]
use mockall::automock;

use super::error::{CollectorError, Result};

const BINARY_SNIFF_LEN: usize = 8192;
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encoding that successfully decoded a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Gbk,
    Latin1,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Gbk => "gbk",
            Encoding::Latin1 => "latin-1",
        }
    }
}

/// Decoded file text and the encoding used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: Encoding,
}

/// Check if content appears to be binary
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_SNIFF_LEN);
    content[..check_len].contains(&0)
}

/// Decode raw bytes through the fallback chain; `None` for binary content
pub fn decode_bytes(bytes: &[u8]) -> Option<DecodedText> {
    if is_binary(bytes) {
        return None;
    }
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Some(DecodedText {
            text: text.to_string(),
            encoding: Encoding::Utf8,
        });
    }
    if let Some(text) = GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        return Some(DecodedText {
            text: text.into_owned(),
            encoding: Encoding::Gbk,
        });
    }
    Some(DecodedText {
        text: bytes.iter().map(|&b| b as char).collect(),
        encoding: Encoding::Latin1,
    })
}

/// Filesystem access used by the collector
#[cfg_attr(test, automock)]
pub trait SourceReader: Send + Sync {
    /// Size in bytes; `None` when the path is not a regular file
    fn file_size(&self, path: &Path) -> Option<u64>;

    /// Read and decode a whole file
    fn read_source(&self, path: &Path) -> Result<DecodedText>;

    /// Line count without holding the file in memory
    fn count_lines(&self, path: &Path) -> Option<usize>;
}

/// Reader backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn file_size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len())
    }

    fn read_source(&self, path: &Path) -> Result<DecodedText> {
        if !path.exists() {
            return Err(CollectorError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        decode_bytes(&bytes).ok_or_else(|| CollectorError::Unreadable {
            path: path.to_path_buf(),
        })
    }

    fn count_lines(&self, path: &Path) -> Option<usize> {
        let file = File::open(path).ok()?;
        Some(BufReader::new(file).split(b'\n').count())
    }
}
