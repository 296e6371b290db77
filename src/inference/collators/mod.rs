//! Per-kind aggregation of field values
//!
//! Every collator is built from the values of one field, already split into
//! *expected* values (null or matching the field's kind) and *unexpected*
//! values (non-null with another kind). Nulls are stripped before any
//! aggregate is computed.

mod boolean;
mod date;
mod numeric;
mod string;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::error::{ExplorerError, Result};
use super::types::ValueKind;

pub use boolean::BooleanCollator;
pub use date::DateCollator;
pub use numeric::NumericCollator;
pub use string::{ChartSuitability, StringCollator};

/// Values handed to a collator, before and after null stripping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollatorData {
    original: Vec<Value>,
    data: Vec<Value>,
    unexpected: Vec<Value>,
}

impl CollatorData {
    /// Build from the expected values (nulls included) and the unexpected ones
    pub fn new(expected: Vec<Value>, unexpected: Vec<Value>) -> Self {
        let data = expected.iter().filter(|v| !v.is_null()).cloned().collect();
        Self {
            original: expected,
            data,
            unexpected,
        }
    }

    /// Expected values including nulls
    pub fn original(&self) -> &[Value] {
        &self.original
    }

    /// Expected values with nulls removed
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Non-null values whose kind does not match the field
    pub fn unexpected(&self) -> &[Value] {
        &self.unexpected
    }

    /// Number of null (or absent) entries
    pub fn null_count(&self) -> usize {
        self.original.len() - self.data.len()
    }

    fn summary_header(&self, title: &str) -> String {
        format!(
            "### {}\n\n- Number of Entries: {}\n- Number of `null` Entries: {}\n- Number of unexpected Entries: {}\n",
            title,
            self.original.len(),
            self.null_count(),
            self.unexpected.len(),
        )
    }
}

impl Serialize for CollatorData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CollatorData", 3)?;
        state.serialize_field("entries", &self.original.len())?;
        state.serialize_field("nullCount", &self.null_count())?;
        state.serialize_field("unexpectedCount", &self.unexpected.len())?;
        state.end()
    }
}

/// Behaviour shared by every collator variant
pub trait Collate: Sized {
    /// Title used in summaries
    const TITLE: &'static str;

    /// Compute the aggregates over the null-stripped values
    fn collate(base: CollatorData) -> Result<Self>;

    /// The values this collator was built from
    fn base(&self) -> &CollatorData;

    /// Kind-specific summary lines, without list markers
    fn summary_lines(&self) -> Vec<String>;

    /// Markdown summary of the collated statistics
    fn summarize(&self) -> String {
        let mut out = self.base().summary_header(Self::TITLE);
        for line in self.summary_lines() {
            out.push_str("- ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// A collated field, one variant per handled kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "collator", rename_all = "camelCase")]
pub enum Collator {
    String(StringCollator),
    Numeric(NumericCollator),
    Boolean(BooleanCollator),
    Date(DateCollator),
}

impl Collator {
    /// Build and collate the collator matching `kind`
    pub fn build(
        field: &str,
        kind: ValueKind,
        expected: Vec<Value>,
        unexpected: Vec<Value>,
    ) -> Result<Collator> {
        let base = CollatorData::new(expected, unexpected);
        match kind {
            ValueKind::String => StringCollator::collate(base).map(Collator::String),
            ValueKind::Integer | ValueKind::Float => {
                NumericCollator::collate(base).map(Collator::Numeric)
            }
            ValueKind::Boolean => BooleanCollator::collate(base).map(Collator::Boolean),
            ValueKind::Date => DateCollator::collate(base).map(Collator::Date),
            ValueKind::Null | ValueKind::Document | ValueKind::Array => {
                Err(ExplorerError::UnsupportedKind {
                    field: field.to_string(),
                    kind: kind.name().to_string(),
                })
            }
        }
    }

    /// The values this collator was built from
    pub fn base(&self) -> &CollatorData {
        match self {
            Collator::String(c) => c.base(),
            Collator::Numeric(c) => c.base(),
            Collator::Boolean(c) => c.base(),
            Collator::Date(c) => c.base(),
        }
    }

    /// Markdown summary of the collated statistics
    pub fn summarize(&self) -> String {
        match self {
            Collator::String(c) => c.summarize(),
            Collator::Numeric(c) => c.summarize(),
            Collator::Boolean(c) => c.summarize(),
            Collator::Date(c) => c.summarize(),
        }
    }

    pub fn as_string(&self) -> Option<&StringCollator> {
        match self {
            Collator::String(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericCollator> {
        match self {
            Collator::Numeric(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BooleanCollator> {
        match self {
            Collator::Boolean(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateCollator> {
        match self {
            Collator::Date(c) => Some(c),
            _ => None,
        }
    }
}
