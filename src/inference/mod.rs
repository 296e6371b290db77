//! Schema inference and per-field statistics for JSON documents
//!
//! This module infers the kind of every field of a list of structurally
//! similar documents and collates the values of each field into statistics.
//!
//! ## Features
//!
//! - **Kind inference** - Sample each field (first document by default)
//! - **Date normalization** - Rewrite date-like strings into `{"$date": ...}`
//! - **Collation** - String frequencies, numeric moments, boolean tallies and
//!   calendar breakdowns of dates
//! - **Nested documents** - Analyze nested objects up to a configurable depth
//! - **Unexpected values** - Count values whose kind disagrees with the field
//!
//! ## Example
//!
//! ```rust
//! use json_explorer::inference::{Document, SchemaExplorer, ValueKind};
//! use serde_json::json;
//!
//! let mut documents: Vec<Document> = vec![
//!     json!({"name": "Alice", "age": 30}),
//!     json!({"name": "Bob", "age": 25}),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let node = SchemaExplorer::new().analyze(&mut documents)?;
//! assert_eq!(node.kind_of("age"), Some(ValueKind::Integer));
//! println!("{}", node.collator("age").unwrap().summarize());
//! # Ok::<(), json_explorer::inference::ExplorerError>(())
//! ```

mod collators;
mod config;
mod error;
mod formats;
mod inferrer;
mod policy;
mod types;

pub use collators::{
    BooleanCollator, ChartSuitability, Collate, Collator, CollatorData, DateCollator,
    NumericCollator, StringCollator,
};
pub use config::{ExplorerConfig, ExplorerConfigBuilder, UnsupportedKindPolicy};
pub use error::{ExplorerError, Result};
pub use formats::{
    DATE_FORMAT, MONTHS, WEEKDAYS, normalize_dates, parse_date_literal, parse_date_wrapper,
    to_iso_string,
};
pub use inferrer::{SchemaExplorer, SchemaNode, SkippedField};
pub use policy::{FirstDocument, MajorityKind, SamplingPolicy};
pub use types::{DATE_KEY, Document, ValueKind, is_date_wrapper};
