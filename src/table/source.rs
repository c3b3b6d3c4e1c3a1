//! Reading a delimited text file before it is parsed
//!
//! The path is checked first (exists, not a directory, under the size
//! limit). The file is then read once, and content that cannot be a CSV
//! document is rejected: NUL bytes near the start, or bytes that are not
//! UTF-8. Errors locate the problem so the status bar can point at it.

use std::fs;
use std::path::Path;

/// Largest file accepted for import (50 MB)
pub const MAX_SOURCE_SIZE: u64 = 50 * 1024 * 1024;

/// Bytes scanned for NUL when deciding whether a file is binary
const BINARY_SNIFF_LEN: usize = 8192;

/// Why a file cannot be used as CSV input
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    NotFound,
    PermissionDenied,
    IsDirectory,
    TooLarge { size_mb: f64 },
    /// A NUL byte at `offset`, so this is not a text table
    Binary { offset: usize },
    /// Bytes that are not UTF-8, first seen on this 1-based line
    InvalidUtf8 { line: usize },
    Io(String),
}

impl SourceError {
    /// Status bar message naming the file
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("{} is a directory, not a CSV file", filename),
            Self::TooLarge { size_mb } => format!(
                "{} is too large to edit ({:.1} MB, max {} MB)",
                filename,
                size_mb,
                MAX_SOURCE_SIZE / (1024 * 1024)
            ),
            Self::Binary { offset } => format!(
                "{} is not a text table (NUL byte at offset {})",
                filename, offset
            ),
            Self::InvalidUtf8 { line } => {
                format!("{} is not UTF-8 text (line {})", filename, line)
            }
            Self::Io(msg) => format!("Error reading {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::TooLarge { size_mb } => write!(f, "file too large ({:.1} MB)", size_mb),
            Self::Binary { offset } => write!(f, "binary content at offset {}", offset),
            Self::InvalidUtf8 { line } => write!(f, "invalid UTF-8 on line {}", line),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io(e.to_string()),
        }
    }
}

/// Read `path` as CSV text
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(SourceError::IsDirectory);
    }
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(SourceError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    let bytes = fs::read(path)?;
    if let Some(offset) = find_nul(&bytes) {
        return Err(SourceError::Binary { offset });
    }
    decode(bytes)
}

fn find_nul(bytes: &[u8]) -> Option<usize> {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    head.iter().position(|&b| b == 0)
}

fn decode(bytes: Vec<u8>) -> Result<String, SourceError> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let line = e.as_bytes()[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
        SourceError::InvalidUtf8 { line }
    })
}

/// File name for status messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
