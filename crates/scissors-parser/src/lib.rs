//! XML loader for Scissors.
//!
//! This crate turns XML source text into the [`scissors_core::Document`] tree
//! consumed by layout. It is built on `nom` for the token-level rules and
//! keeps every node kind layout cares about: elements, attributes, text,
//! CDATA sections, comments and processing instructions.

mod grammar;
mod lexer;

pub use grammar::{parse, MAX_NESTING_DEPTH};

use std::path::Path;

use scissors_core::{Document, LoadError, ParseError};

/// Parse an XML document from source text.
///
/// # Example
///
/// ```
/// use scissors_parser::parse_document;
///
/// let doc = parse_document(r#"<a x="1"><b/>hello</a>"#).unwrap();
/// assert_eq!(doc.root.name, "a");
/// assert_eq!(doc.root.attribute("x"), Some("1"));
/// ```
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    parse(source)
}

/// Read and parse the XML file at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    log::info!("Loading XML from {}", path.display());

    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "loaded <{}> with {} node(s) from {} byte(s)",
        doc.root.name,
        doc.node_count(),
        source.len()
    );
    Ok(doc)
}
