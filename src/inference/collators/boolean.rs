use serde::Serialize;

use super::{Collate, CollatorData};
use crate::inference::error::Result;

/// True/false tallies for a boolean field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanCollator {
    #[serde(rename = "counts")]
    base: CollatorData,
    true_count: usize,
    false_count: usize,
}

impl BooleanCollator {
    pub fn true_count(&self) -> usize {
        self.true_count
    }

    pub fn false_count(&self) -> usize {
        self.false_count
    }
}

impl Collate for BooleanCollator {
    const TITLE: &'static str = "Boolean";

    fn collate(base: CollatorData) -> Result<Self> {
        let true_count = base.data().iter().filter(|v| v.as_bool() == Some(true)).count();
        let false_count = base.data().iter().filter(|v| v.as_bool() == Some(false)).count();
        Ok(Self {
            base,
            true_count,
            false_count,
        })
    }

    fn base(&self) -> &CollatorData {
        &self.base
    }

    fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Number of True Values: {}", self.true_count),
            format!("Number of False Values: {}", self.false_count),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_exclude_nulls() {
        let base = CollatorData::new(
            vec![json!(true), json!(false), json!(null), json!(true)],
            vec![json!("yes")],
        );
        let collator = BooleanCollator::collate(base).unwrap();

        assert_eq!(collator.true_count(), 2);
        assert_eq!(collator.false_count(), 1);
        assert!(collator.summarize().contains("- Number of True Values: 2\n"));
    }
}
