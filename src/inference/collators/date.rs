use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{Collate, CollatorData};
use crate::inference::error::Result;
use crate::inference::formats::{MONTHS, WEEKDAYS, parse_date_wrapper};

/// Range and calendar breakdown of a date field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCollator {
    #[serde(rename = "counts")]
    base: CollatorData,
    #[serde(skip)]
    dates: Vec<NaiveDateTime>,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_weekdays")]
    weekdays: [usize; 7],
    #[serde(serialize_with = "serialize_months")]
    months: [usize; 12],
    years: BTreeMap<i32, usize>,
}

impl DateCollator {
    /// Parsed instants, in document order
    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    /// Earliest instant (None when every value is null)
    pub fn min(&self) -> Option<NaiveDateTime> {
        self.min
    }

    /// Latest instant (None when every value is null)
    pub fn max(&self) -> Option<NaiveDateTime> {
        self.max
    }

    /// Counts per weekday, Monday first, all seven days present
    pub fn weekday_counts(&self) -> Vec<(&'static str, usize)> {
        WEEKDAYS.iter().copied().zip(self.weekdays).collect()
    }

    /// Counts per month, January first, all twelve months present
    pub fn month_counts(&self) -> Vec<(&'static str, usize)> {
        MONTHS.iter().copied().zip(self.months).collect()
    }

    /// Counts per calendar year
    pub fn year_counts(&self) -> &BTreeMap<i32, usize> {
        &self.years
    }
}

impl Collate for DateCollator {
    const TITLE: &'static str = "Date";

    fn collate(base: CollatorData) -> Result<Self> {
        let dates = base
            .data()
            .iter()
            .map(parse_date_wrapper)
            .collect::<Result<Vec<_>>>()?;

        let mut weekdays = [0; 7];
        let mut months = [0; 12];
        let mut years = BTreeMap::new();
        for date in &dates {
            weekdays[date.weekday().num_days_from_monday() as usize] += 1;
            months[date.month0() as usize] += 1;
            *years.entry(date.year()).or_insert(0) += 1;
        }

        Ok(Self {
            min: dates.iter().min().copied(),
            max: dates.iter().max().copied(),
            base,
            dates,
            weekdays,
            months,
            years,
        })
    }

    fn base(&self) -> &CollatorData {
        &self.base
    }

    fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let (Some(min), Some(max)) = (self.min, self.max) {
            lines.push(format!("Earliest Date: {}", min.format("%c")));
            lines.push(format!("Latest Date: {}", max.format("%c")));
        }
        let yearly: Vec<String> = self
            .years
            .iter()
            .map(|(year, count)| format!("{}: {}", year, count))
            .collect();
        lines.push(format!("Yearly Breakdown: {{{}}}", yearly.join(", ")));
        lines
    }
}

fn serialize_named<S: Serializer>(
    names: &[&str],
    counts: &[usize],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(names.len()))?;
    for (name, count) in names.iter().zip(counts) {
        map.serialize_entry(name, count)?;
    }
    map.end()
}

fn serialize_weekdays<S: Serializer>(
    counts: &[usize; 7],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serialize_named(&WEEKDAYS, counts, serializer)
}

fn serialize_months<S: Serializer>(
    counts: &[usize; 12],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serialize_named(&MONTHS, counts, serializer)
}
