//! Schema inference engine

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, debug_span, warn};

use super::collators::Collator;
use super::config::{ExplorerConfig, UnsupportedKindPolicy};
use super::error::{ExplorerError, Result};
use super::formats::{normalize_dates, parse_date_literal};
use super::policy::{FirstDocument, SamplingPolicy};
use super::types::{Document, ValueKind, is_date_wrapper};

/// A field left out of the schema because its kind cannot be collated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedField {
    pub field: String,
    pub kind: ValueKind,
}

/// One level of inferred schema with its collated fields.
///
/// Fields keep the order in which the sampling policy reported them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    document_count: usize,
    schema: IndexMap<String, ValueKind>,
    collators: IndexMap<String, Collator>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, SchemaNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedField>,
}

impl SchemaNode {
    /// Number of documents analyzed at this level
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Inferred kind per field; nested fields map to `ValueKind::Document`
    pub fn schema(&self) -> &IndexMap<String, ValueKind> {
        &self.schema
    }

    pub fn kind_of(&self, field: &str) -> Option<ValueKind> {
        self.schema.get(field).copied()
    }

    pub fn collators(&self) -> &IndexMap<String, Collator> {
        &self.collators
    }

    pub fn collator(&self, field: &str) -> Option<&Collator> {
        self.collators.get(field)
    }

    pub fn children(&self) -> &IndexMap<String, SchemaNode> {
        &self.children
    }

    pub fn child(&self, field: &str) -> Option<&SchemaNode> {
        self.children.get(field)
    }

    /// Fields left out because of an unsupported kind
    pub fn skipped(&self) -> &[SkippedField] {
        &self.skipped
    }

    /// Fields inferred with `kind`, in field order
    pub fn fields_of_kind(&self, kind: ValueKind) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(field, _)| field.as_str())
            .collect()
    }

    /// Visit every collator in the tree, depth first, with its dotted path
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &Collator),
    {
        self.walk_with_prefix("", &mut visitor);
    }

    fn walk_with_prefix(&self, prefix: &str, visitor: &mut dyn FnMut(&str, &Collator)) {
        for (field, collator) in &self.collators {
            visitor(&join_path(prefix, field), collator);
        }
        for (field, child) in &self.children {
            child.walk_with_prefix(&join_path(prefix, field), visitor);
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// What the engine does with a sampled field
enum Step {
    Collate(ValueKind),
    Descend,
}

/// Schema inference engine
///
/// Samples each field through a [`SamplingPolicy`], rewrites date-like
/// strings into date-wrappers, collates every field with the collator for
/// its kind and descends into nested documents up to the configured depth.
///
/// Each node runs in three phases: sample and normalize every field, collate
/// every field, then descend into nested fields. Nested documents are
/// borrowed from the caller's documents, so date normalization at any depth
/// is visible through them.
#[derive(Debug)]
pub struct SchemaExplorer {
    config: ExplorerConfig,
    policy: Box<dyn SamplingPolicy>,
}

impl SchemaExplorer {
    /// Create an explorer with default configuration
    pub fn new() -> Self {
        Self::with_config(ExplorerConfig::default())
    }

    /// Create an explorer with custom configuration
    pub fn with_config(config: ExplorerConfig) -> Self {
        Self {
            config,
            policy: Box::new(FirstDocument),
        }
    }

    /// Replace the sampling policy
    pub fn with_policy(mut self, policy: impl SamplingPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Analyze a list of documents.
    ///
    /// Date strings at date fields are rewritten in place.
    pub fn analyze(&self, documents: &mut [Document]) -> Result<SchemaNode> {
        let mut refs: Vec<&mut Document> = documents.iter_mut().collect();
        self.analyze_node(&mut refs, "$", self.config.max_depth)
    }

    fn analyze_node(
        &self,
        documents: &mut [&mut Document],
        path: &str,
        remaining_depth: usize,
    ) -> Result<SchemaNode> {
        if documents.is_empty() {
            return Err(ExplorerError::EmptyInput);
        }

        let span = debug_span!(
            "analyze_node",
            path,
            documents = documents.len(),
            remaining_depth
        );
        let _enter = span.enter();

        let mut node = SchemaNode {
            document_count: documents.len(),
            schema: IndexMap::new(),
            collators: IndexMap::new(),
            children: IndexMap::new(),
            skipped: Vec::new(),
        };

        let plan = self.plan_fields(documents, remaining_depth, &mut node.skipped)?;
        for (field, step) in &plan {
            let kind = match step {
                Step::Collate(kind) => *kind,
                Step::Descend => ValueKind::Document,
            };
            node.schema.insert(field.clone(), kind);
        }

        for (field, step) in &plan {
            if let Step::Collate(kind) = step {
                let (expected, unexpected) = partition(documents, field, *kind);
                debug!(
                    field = %field,
                    %kind,
                    expected = expected.len(),
                    unexpected = unexpected.len(),
                    "Collating field"
                );
                let collator = Collator::build(field, *kind, expected, unexpected)
                    .map_err(|e| e.in_field(field.as_str()))?;
                node.collators.insert(field.clone(), collator);
            }
        }

        for (field, step) in &plan {
            if let Step::Descend = step {
                let mut nested: Vec<&mut Document> = documents
                    .iter_mut()
                    .filter_map(|doc| doc.get_mut(field.as_str()))
                    .filter_map(Value::as_object_mut)
                    .filter(|obj| !is_date_wrapper(obj))
                    .collect();
                let child_path = format!("{}.{}", path, field);
                debug!(field = %field, documents = nested.len(), "Descending into nested field");
                let child = self
                    .analyze_node(&mut nested, &child_path, remaining_depth - 1)
                    .map_err(|e| e.in_field(field.as_str()))?;
                node.children.insert(field.clone(), child);
            }
        }

        Ok(node)
    }

    /// Sample every field, normalize date fields and decide what to do next
    fn plan_fields(
        &self,
        documents: &mut [&mut Document],
        remaining_depth: usize,
        skipped: &mut Vec<SkippedField>,
    ) -> Result<Vec<(String, Step)>> {
        let sampled: Vec<(String, ValueKind, bool)> = {
            let view: Vec<&Document> = documents.iter().map(|doc| &**doc).collect();
            self.policy
                .fields(&view)
                .into_iter()
                .filter_map(|field| {
                    let sample = self.policy.sample(&field, &view)?;
                    let looks_like_date = self.config.detect_dates
                        && sample.as_str().and_then(parse_date_literal).is_some();
                    Some((field, ValueKind::of(sample), looks_like_date))
                })
                .collect()
        };

        let mut plan = Vec::with_capacity(sampled.len());
        for (field, kind, looks_like_date) in sampled {
            match kind {
                ValueKind::String if looks_like_date => {
                    let rewritten = normalize_dates(documents, &field);
                    debug!(field = %field, rewritten, "Normalized date strings");
                    plan.push((field, Step::Collate(ValueKind::Date)));
                }
                ValueKind::Null => {
                    debug!(field = %field, "Field is null in every document, collating as string");
                    plan.push((field, Step::Collate(ValueKind::String)));
                }
                ValueKind::Document if remaining_depth > 0 => {
                    plan.push((field, Step::Descend));
                }
                ValueKind::Document => {
                    debug!(field = %field, "Maximum depth reached, skipping nested document");
                }
                ValueKind::Array => match self.config.unsupported_kinds {
                    UnsupportedKindPolicy::Skip => {
                        warn!(field = %field, %kind, "Skipping field with unsupported kind");
                        skipped.push(SkippedField { field, kind });
                    }
                    UnsupportedKindPolicy::Error => {
                        return Err(ExplorerError::UnsupportedKind {
                            field,
                            kind: kind.name().to_string(),
                        });
                    }
                },
                ValueKind::Boolean
                | ValueKind::Integer
                | ValueKind::Float
                | ValueKind::String
                | ValueKind::Date => {
                    debug!(field = %field, %kind, "Inferred field kind");
                    plan.push((field, Step::Collate(kind)));
                }
            }
        }
        Ok(plan)
    }
}

impl Default for SchemaExplorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split the values at `field` into expected and unexpected lists.
///
/// Absent fields count as null.
fn partition(documents: &[&mut Document], field: &str, kind: ValueKind) -> (Vec<Value>, Vec<Value>) {
    let mut expected = Vec::with_capacity(documents.len());
    let mut unexpected = Vec::new();
    for doc in documents {
        let value = doc.get(field).cloned().unwrap_or(Value::Null);
        if kind.accepts(&value) {
            expected.push(value);
        } else {
            unexpected.push(value);
        }
    }
    (expected, unexpected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::policy::MajorityKind;
    use serde_json::json;

    fn docs(values: Vec<Value>) -> Vec<Document> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let mut documents: Vec<Document> = Vec::new();
        let result = SchemaExplorer::new().analyze(&mut documents);
        assert_eq!(result.unwrap_err(), ExplorerError::EmptyInput);
    }

    #[test]
    fn test_infer_simple_kinds() {
        let mut documents = docs(vec![
            json!({"name": "Alice", "age": 30, "score": 1.5, "active": true}),
            json!({"name": "Bob", "age": 25, "score": 2.5, "active": false}),
        ]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();

        assert_eq!(node.document_count(), 2);
        assert_eq!(node.kind_of("name"), Some(ValueKind::String));
        assert_eq!(node.kind_of("age"), Some(ValueKind::Integer));
        assert_eq!(node.kind_of("score"), Some(ValueKind::Float));
        assert_eq!(node.kind_of("active"), Some(ValueKind::Boolean));
        assert_eq!(node.fields_of_kind(ValueKind::String), vec!["name"]);
    }

    #[test]
    fn test_single_sample_marks_floats_unexpected() {
        let mut documents = docs(vec![
            json!({"v": 1}),
            json!({"v": 2.5}),
            json!({"v": 3.5}),
            json!({"v": 4.5}),
        ]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        let base = node.collator("v").unwrap().base();

        assert_eq!(node.kind_of("v"), Some(ValueKind::Integer));
        assert_eq!(base.data().len(), 1);
        assert_eq!(base.unexpected().len(), 3);
    }

    #[test]
    fn test_majority_policy_swaps_inference() {
        let mut documents = docs(vec![
            json!({"v": 1}),
            json!({"v": 2.5}),
            json!({"v": 3.5}),
        ]);

        let node = SchemaExplorer::new()
            .with_policy(MajorityKind)
            .analyze(&mut documents)
            .unwrap();

        assert_eq!(node.kind_of("v"), Some(ValueKind::Float));
        assert_eq!(node.collator("v").unwrap().base().unexpected(), &[json!(1)]);
    }

    #[test]
    fn test_absent_field_counts_as_null() {
        let mut documents = docs(vec![json!({"a": 1}), json!({"b": 2}), json!({"a": null})]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        let base = node.collator("a").unwrap().base();

        assert_eq!(base.original().len(), 3);
        assert_eq!(base.null_count(), 2);
        assert!(node.kind_of("b").is_none());
    }

    #[test]
    fn test_unsupported_kind_skip_and_error() {
        let mut documents = docs(vec![json!({"tags": ["a"], "n": 1})]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        assert_eq!(
            node.skipped(),
            &[SkippedField {
                field: "tags".to_string(),
                kind: ValueKind::Array
            }]
        );
        assert!(node.kind_of("tags").is_none());

        let strict = ExplorerConfig::builder()
            .unsupported_kinds(UnsupportedKindPolicy::Error)
            .build();
        let err = SchemaExplorer::with_config(strict)
            .analyze(&mut documents)
            .unwrap_err();
        assert!(matches!(err, ExplorerError::UnsupportedKind { ref field, .. } if field == "tags"));
    }

    #[test]
    fn test_depth_limit() {
        let mut documents = docs(vec![json!({"a": {"b": {"c": 1}, "x": 2}})]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        let child = node.child("a").unwrap();
        assert_eq!(node.kind_of("a"), Some(ValueKind::Document));
        assert_eq!(child.kind_of("x"), Some(ValueKind::Integer));
        assert!(child.child("b").is_none());
        assert!(child.kind_of("b").is_none());

        let flat = SchemaExplorer::with_config(ExplorerConfig::builder().max_depth(0).build())
            .analyze(&mut documents)
            .unwrap();
        assert!(flat.children().is_empty());

        let deep = SchemaExplorer::with_config(ExplorerConfig::builder().max_depth(2).build())
            .analyze(&mut documents)
            .unwrap();
        let grandchild = deep.child("a").unwrap().child("b").unwrap();
        assert_eq!(grandchild.kind_of("c"), Some(ValueKind::Integer));
    }

    #[test]
    fn test_walk_paths() {
        let mut documents = docs(vec![json!({"id": 1, "user": {"name": "a"}})]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        let mut paths = Vec::new();
        node.walk(|path, _| paths.push(path.to_string()));

        assert_eq!(paths, vec!["id", "user.name"]);
    }

    #[test]
    fn test_fields_keep_document_order() {
        let mut documents = docs(vec![json!({"zeta": "z", "meta": {"b": 1, "a": 2}, "alpha": "a"})]);

        let node = SchemaExplorer::new().analyze(&mut documents).unwrap();
        let fields: Vec<&str> = node.schema().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["zeta", "meta", "alpha"]);
        assert_eq!(node.fields_of_kind(ValueKind::String), vec!["zeta", "alpha"]);

        let mut paths = Vec::new();
        node.walk(|path, _| paths.push(path.to_string()));
        assert_eq!(paths, vec!["zeta", "alpha", "meta.b", "meta.a"]);
    }

    #[test]
    fn test_detect_dates_disabled() {
        let mut documents = docs(vec![json!({"at": "2021-01-05T10:00:00.000000"})]);

        let config = ExplorerConfig::builder().detect_dates(false).build();
        let node = SchemaExplorer::with_config(config)
            .analyze(&mut documents)
            .unwrap();

        assert_eq!(node.kind_of("at"), Some(ValueKind::String));
        assert_eq!(documents[0]["at"], json!("2021-01-05T10:00:00.000000"));
    }
}
