//! Dated value series
//!
//! A [`Series`] is an ordered mapping from calendar day to value. Daily
//! series hold the amount recorded on each day; cumulative series hold the
//! running total up to and including each day and behave as step functions
//! between samples.
//!
//! Two lookups are provided and must not be mixed up:
//!
//! * [`Series::get`] is an exact lookup. A day without a sample yields `None`.
//!   Chart walks use this so that gaps stay gaps.
//! * [`Series::value_at`] holds the last sample on or before the day. It is
//!   only used to read "today" values at the basis date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: BTreeMap<NaiveDate, f64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a day, replacing any previous sample
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        self.points.insert(date, value)
    }

    /// Add to the value for a day, starting from zero
    pub fn add(&mut self, date: NaiveDate, value: f64) {
        *self.points.entry(date).or_insert(0.0) += value;
    }

    /// Exact lookup
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Forward-fill lookup: last sample on or before `date`
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .range(..=date)
            .next_back()
            .map(|(_, value)| *value)
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.iter().next().map(|(d, v)| (*d, *v))
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.iter().next_back().map(|(d, v)| (*d, *v))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.first().map(|(date, _)| date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|(date, _)| date)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Samples in ascending date order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.points.keys().copied()
    }

    /// Samples dated on or before `date`
    pub fn clipped_to(&self, date: NaiveDate) -> Series {
        Series {
            points: self
                .points
                .range(..=date)
                .map(|(d, v)| (*d, *v))
                .collect(),
        }
    }

    /// Running total of a daily series
    pub fn cumulative(&self) -> Series {
        let mut running = 0.0;
        Series {
            points: self
                .points
                .iter()
                .map(|(date, value)| {
                    running += value;
                    (*date, running)
                })
                .collect(),
        }
    }
}

/// Collecting sums samples that share a day.
impl FromIterator<(NaiveDate, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (date, value) in iter {
            series.add(date, value);
        }
        series
    }
}

impl From<BTreeMap<NaiveDate, f64>> for Series {
    fn from(points: BTreeMap<NaiveDate, f64>) -> Self {
        Self { points }
    }
}
