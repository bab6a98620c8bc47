//! Shared types for EVM Charts
//!
//! This crate contains the types that are shared between the calculator,
//! chart-data, config and integration crates: calendar ranges, dated value
//! series, work items, request options and the chart payloads handed to a
//! charting layer.

pub mod chart_data;
pub mod data_types;
pub mod errors;
pub mod options;
pub mod series;

pub use chart_data::{EvmChartData, PerformanceChartData};
pub use data_types::{CostEntry, WorkItem};
pub use errors::{parse_date, EvmError, Result};
pub use options::{DistributionPolicy, EtcMethod, EvmOptions, ScopeSelector};
pub use series::Series;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single value recorded on a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(NaiveDate, f64)> for DatedValue {
    fn from((date, value): (NaiveDate, f64)) -> Self {
        Self { date, value }
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, both ends included. Zero for an inverted range.
    pub fn days(&self) -> usize {
        let span = (self.end - self.start).num_days();
        if span < 0 {
            0
        } else {
            span as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Every calendar day from `start` to `end`
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!(range.days(), 10);
        assert_eq!(range.iter().count(), 10);
        assert_eq!(range.iter().last(), Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 2, 29), date(2024, 2, 29));
        assert_eq!(range.days(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![date(2024, 2, 29)]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(date(2024, 1, 10), date(2024, 1, 1));
        assert!(range.is_empty());
        assert_eq!(range.days(), 0);
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn test_range_across_month_end() {
        let range = DateRange::new(date(2023, 12, 30), date(2024, 1, 2));
        let days: Vec<_> = range.iter().collect();
        assert_eq!(
            days,
            vec![
                date(2023, 12, 30),
                date(2023, 12, 31),
                date(2024, 1, 1),
                date(2024, 1, 2)
            ]
        );
    }
}
