//! phpaccess-core: Core abstractions for PHP source generation
//!
//! This crate provides:
//! - `SourceText`: a line-oriented view of a document
//! - `Edit`: A span-based code modification
//! - `apply_edits()`: Function to apply a batch of edits atomically
//! - `Visitor`: Trait for walking class declarations in a PHP AST

mod edit;
mod source;
pub mod visitor;

pub use edit::{apply_edits, Edit, EditError};
pub use source::{SourceText, TextPosition, TextRange};
pub use visitor::{visit, Visitor};
