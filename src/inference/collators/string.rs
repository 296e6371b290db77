use std::collections::BTreeMap;

use serde::Serialize;

use super::{Collate, CollatorData};
use crate::inference::error::Result;

/// Whether a frequency table is worth charting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartSuitability {
    /// Some values repeat and more than one value exists
    Informative,
    /// Every value occurs exactly once
    AllUnique,
    /// Only one distinct value exists
    SingleValue,
    /// No non-null values
    Empty,
}

/// Occurrence counts of the distinct values of a string field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringCollator {
    #[serde(rename = "counts")]
    base: CollatorData,
    frequencies: BTreeMap<String, usize>,
}

impl StringCollator {
    /// Value to occurrence count
    pub fn frequencies(&self) -> &BTreeMap<String, usize> {
        &self.frequencies
    }

    /// Occurrences of one value (0 when never seen)
    pub fn count_of(&self, value: &str) -> usize {
        self.frequencies.get(value).copied().unwrap_or(0)
    }

    pub fn distinct_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Presentation hint for chart renderers; the full table is always exposed
    pub fn chart_suitability(&self) -> ChartSuitability {
        if self.base.data().is_empty() {
            ChartSuitability::Empty
        } else if self.frequencies.len() == self.base.data().len() {
            ChartSuitability::AllUnique
        } else if self.frequencies.len() == 1 {
            ChartSuitability::SingleValue
        } else {
            ChartSuitability::Informative
        }
    }
}

impl Collate for StringCollator {
    const TITLE: &'static str = "String";

    fn collate(base: CollatorData) -> Result<Self> {
        let mut frequencies = BTreeMap::new();
        for value in base.data().iter().filter_map(|v| v.as_str()) {
            *frequencies.entry(value.to_string()).or_insert(0) += 1;
        }
        Ok(Self { base, frequencies })
    }

    fn base(&self) -> &CollatorData {
        &self.base
    }

    fn summary_lines(&self) -> Vec<String> {
        vec![format!("Number of Unique Values: {}", self.frequencies.len())]
    }
}
