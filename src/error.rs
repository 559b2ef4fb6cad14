//! Error types for parsing category files and loading them from disk.

use std::path::PathBuf;
use thiserror::Error;

/// A category file that could not be turned into tasks.
///
/// Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A recognized attribute whose value is malformed.
    #[error("line {line}: invalid {field} '{text}'")]
    Format {
        line: usize,
        field: &'static str,
        text: String,
    },

    /// Attributes that are individually valid but contradict each other.
    #[error("line {line}: {message}")]
    Semantic { line: usize, message: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::Format { line, .. } | Self::Semantic { line, .. } => *line,
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Category '{category}' ({})", .path.display())]
    Parse {
        category: String,
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Invalid category name '{0}'")]
    InvalidCategory(String),
}
