//! JSON Explorer - schema inference and field statistics for JSON documents
//!
//! Provides:
//! - Kind inference for the fields of structurally similar documents
//! - In-place normalization of date strings into date-wrappers
//! - String, numeric, boolean and date collators with unexpected-value tallies
//! - One level (configurable) of nested document analysis
//!
//! Loading documents, rendering charts and formatting reports are left to
//! callers; every aggregate is exposed through accessors and `serde`.

pub mod inference;

pub use inference::{
    Collator, Document, ExplorerConfig, ExplorerError, SchemaExplorer, SchemaNode, ValueKind,
};
