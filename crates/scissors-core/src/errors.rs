//! Error types for the Scissors renderer.
//!
//! Layout itself has no error type: it is a deterministic function of a
//! well-formed tree, and geometry violations are assertions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the Scissors renderer.
#[derive(Debug, Error)]
pub enum ScissorsError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while parsing XML source text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        column: u32,
    },

    #[error("Mismatched closing tag at line {line}, column {column}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        expected: String,
        found: String,
        line: u32,
        column: u32,
    },

    #[error("Unknown entity &{name}; at line {line}, column {column}")]
    UnknownEntity { name: String, line: u32, column: u32 },

    #[error("Invalid character reference &{reference}; at line {line}, column {column}")]
    InvalidCharacterReference {
        reference: String,
        line: u32,
        column: u32,
    },

    #[error("Unterminated {construct} starting at line {line}, column {column}")]
    UnterminatedConstruct {
        construct: &'static str,
        line: u32,
        column: u32,
    },

    #[error("Elements nested deeper than {limit} levels at line {line}, column {column}")]
    NestingTooDeep { limit: usize, line: u32, column: u32 },

    #[error("Document has no root element")]
    MissingRootElement,

    #[error("Content after the root element at line {line}, column {column}")]
    TrailingContent { line: u32, column: u32 },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// Errors while loading a document from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Errors during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {reason}")]
    Serialize { reason: String },

    #[error("Nothing was drawn; the scene is empty")]
    EmptyScene,
}
