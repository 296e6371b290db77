//! Sampling policies
//!
//! A policy decides which fields a node analyzes and which value stands in
//! for each field when its kind is inferred. The explorer never looks at
//! kinds beyond the sample it is handed.

use serde_json::Value;

use super::formats::parse_date_literal;
use super::types::{Document, ValueKind};

/// Chooses the analyzed fields and a representative value per field
pub trait SamplingPolicy: std::fmt::Debug + Send + Sync {
    /// Field names to analyze, in analysis order
    fn fields(&self, documents: &[&Document]) -> Vec<String>;

    /// Representative value for `field`, or None when no document holds it
    fn sample<'a>(&self, field: &str, documents: &[&'a Document]) -> Option<&'a Value>;
}

/// Infer every field from the first document.
///
/// Only fields of the first document are analyzed. When the first document
/// holds null for a field, the first non-null value further down the list is
/// used instead; a field that is null everywhere samples as null.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDocument;

impl SamplingPolicy for FirstDocument {
    fn fields(&self, documents: &[&Document]) -> Vec<String> {
        documents
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn sample<'a>(&self, field: &str, documents: &[&'a Document]) -> Option<&'a Value> {
        let first = documents.first()?.get(field)?;
        if !first.is_null() {
            return Some(first);
        }
        documents
            .iter()
            .skip(1)
            .filter_map(|doc| doc.get(field))
            .find(|value| !value.is_null())
            .or(Some(first))
    }
}

/// Infer every field from the kind held by most documents.
///
/// Fields are the union of all document keys, in first-seen order. Ties
/// between kinds go to the kind seen first.
///
/// A string in the date layout votes for `Date`, the same as the wrapper it
/// is rewritten into, so a second run over normalized documents reaches the
/// same verdict. When dates win, a date string is preferred as the sample so
/// the remaining strings are normalized too.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityKind;

impl SamplingPolicy for MajorityKind {
    fn fields(&self, documents: &[&Document]) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        for doc in documents {
            for key in doc.keys() {
                if !fields.contains(key) {
                    fields.push(key.clone());
                }
            }
        }
        fields
    }

    fn sample<'a>(&self, field: &str, documents: &[&'a Document]) -> Option<&'a Value> {
        // (kind, occurrences, first value of that kind)
        let mut tally: Vec<(ValueKind, usize, &'a Value)> = Vec::new();
        let mut null = None;

        for value in documents.iter().filter_map(|doc| doc.get(field)) {
            if value.is_null() {
                null.get_or_insert(value);
                continue;
            }
            let kind = vote(value);
            match tally.iter_mut().find(|(k, _, _)| *k == kind) {
                Some(entry) => {
                    entry.1 += 1;
                    if kind == ValueKind::Date && !entry.2.is_string() && value.is_string() {
                        entry.2 = value;
                    }
                }
                None => tally.push((kind, 1, value)),
            }
        }

        let mut best: Option<(usize, &'a Value)> = None;
        for (_, count, value) in tally {
            if best.is_none_or(|(top, _)| count > top) {
                best = Some((count, value));
            }
        }
        best.map(|(_, value)| value).or(null)
    }
}

fn vote(value: &Value) -> ValueKind {
    match value {
        Value::String(s) if parse_date_literal(s).is_some() => ValueKind::Date,
        other => ValueKind::of(other),
    }
}
