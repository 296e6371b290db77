use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Number, Value};

use super::{Collate, CollatorData};
use crate::inference::error::{ExplorerError, Result};

/// Range, mean and spread of a numeric field.
///
/// Variance is the population variance (divisor N). The extremes keep the
/// exact JSON numbers, so integers beyond 2^53 are reported without rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericCollator {
    #[serde(rename = "counts")]
    base: CollatorData,
    min: Number,
    max: Number,
    mean: f64,
    variance: f64,
    std_dev: f64,
}

impl NumericCollator {
    pub fn min(&self) -> f64 {
        as_float(&self.min)
    }

    pub fn max(&self) -> f64 {
        as_float(&self.max)
    }

    /// Smallest value as written in the documents
    pub fn min_value(&self) -> &Number {
        &self.min
    }

    /// Largest value as written in the documents
    pub fn max_value(&self) -> &Number {
        &self.max
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

fn as_float(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Integers compare exactly; anything else compares as f64
fn compare(a: &Number, b: &Number) -> Ordering {
    match (exact_integer(a), exact_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => as_float(a)
            .partial_cmp(&as_float(b))
            .unwrap_or(Ordering::Equal),
    }
}

impl Collate for NumericCollator {
    const TITLE: &'static str = "Numeric";

    fn collate(base: CollatorData) -> Result<Self> {
        let numbers: Vec<&Number> = base
            .data()
            .iter()
            .filter_map(|v| match v {
                Value::Number(n) => Some(n),
                _ => None,
            })
            .collect();
        let (Some(min), Some(max)) = (
            numbers.iter().copied().min_by(|a, b| compare(a, b)),
            numbers.iter().copied().max_by(|a, b| compare(a, b)),
        ) else {
            return Err(ExplorerError::EmptyGroup {
                kind: "numeric".to_string(),
            });
        };
        let (min, max) = (min.clone(), max.clone());

        // Welford pass; the mean step is split so large magnitudes stay finite
        let mut mean = 0.0_f64;
        let mut squares = 0.0_f64;
        for (i, x) in numbers.iter().map(|n| as_float(n)).enumerate() {
            let n = (i + 1) as f64;
            let previous = mean;
            mean += x / n - previous / n;
            squares += (x - previous) * (x - mean);
        }
        let (lo, hi) = (as_float(&min), as_float(&max));
        let mean = mean.clamp(lo, hi);
        let variance = (squares / numbers.len() as f64).max(0.0);

        Ok(Self {
            base,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    fn base(&self) -> &CollatorData {
        &self.base
    }

    fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Max Value: {}", self.max),
            format!("Min Value: {}", self.min),
            format!("Average: {:.4}", self.mean),
            format!("Variance: {:.4}", self.variance),
            format!("Standard Deviation: {:.4}", self.std_dev),
        ]
    }
}
