//! Core types for the Scissors XML diagram renderer.
//!
//! This crate provides the foundational types used across all other scissors crates:
//! - Document tree types produced by the loader and consumed by layout
//! - Value types (colors, source positions)
//! - Error types

pub mod ast;
pub mod errors;
pub mod types;

pub use ast::*;
pub use errors::*;
pub use types::*;
