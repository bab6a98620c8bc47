//! Planned value (PV)
//!
//! Each scheduled work item spreads its planned effort evenly across the
//! days its [`DistributionPolicy`] counts between its start date and its
//! effective due date. `cumulative_pv` on a day is the sum of each item's
//! completed fraction of its effort, so an item past its last day counts
//! its full effort and the last value is exactly the budget at completion.
//! `daily_pv` holds the day-over-day increments.

use chrono::NaiveDate;
use evm_charts_shared::{DateRange, DistributionPolicy, Series, WorkItem};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedValue {
    pub daily_pv: Series,
    pub cumulative_pv: Series,
    /// Earliest start date, or the basis date without scheduled items
    pub start_date: NaiveDate,
    /// Latest effective due date, or the basis date without scheduled items
    pub due_date: NaiveDate,
}

impl PlannedValue {
    pub fn new(basis_date: NaiveDate, items: &[WorkItem], policy: &DistributionPolicy) -> Self {
        let scheduled: Vec<&WorkItem> = items.iter().filter(|item| item.is_scheduled()).collect();

        let start_date = scheduled
            .iter()
            .filter_map(|item| item.start_date)
            .min()
            .unwrap_or(basis_date);
        let due_date = scheduled
            .iter()
            .filter_map(|item| item.effective_due_date())
            .max()
            .unwrap_or(basis_date);

        let allocations: Vec<Allocation> = scheduled
            .iter()
            .filter_map(|item| Allocation::new(item, policy))
            .collect();
        let days: BTreeSet<NaiveDate> = allocations
            .iter()
            .flat_map(|allocation| allocation.days.iter().copied())
            .collect();

        let mut daily_pv = Series::new();
        let mut cumulative_pv = Series::new();
        let mut previous = 0.0;
        for day in days {
            let planned: f64 = allocations
                .iter()
                .map(|allocation| allocation.planned_through(day))
                .sum();
            daily_pv.insert(day, planned - previous);
            cumulative_pv.insert(day, planned);
            previous = planned;
        }

        Self {
            daily_pv,
            cumulative_pv,
            start_date,
            due_date,
        }
    }

    /// Budget at completion
    pub fn bac(&self) -> f64 {
        self.cumulative_pv.last_value().unwrap_or(0.0)
    }

    /// Cumulative PV on `date`, holding the last planned value
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.cumulative_pv.value_at(date).unwrap_or(0.0)
    }
}

/// The days one item's effort is spread across, ascending
struct Allocation {
    effort: f64,
    days: Vec<NaiveDate>,
}

impl Allocation {
    fn new(item: &WorkItem, policy: &DistributionPolicy) -> Option<Self> {
        let (Some(start), Some(due)) = (item.start_date, item.effective_due_date()) else {
            return None;
        };

        // Inverted schedule: everything lands on the start date
        if due < start {
            return Some(Self {
                effort: item.planned_effort,
                days: vec![start],
            });
        }

        let range = DateRange::new(start, due);
        let mut days: Vec<NaiveDate> = range.iter().filter(|day| policy.counts(*day)).collect();
        if days.is_empty() {
            days = range.iter().collect();
        }
        Some(Self {
            effort: item.planned_effort,
            days,
        })
    }

    /// Effort planned up to and including `date`
    fn planned_through(&self, date: NaiveDate) -> f64 {
        let counted = self.days.partition_point(|day| *day <= date);
        if counted == self.days.len() {
            self.effort
        } else {
            self.effort * counted as f64 / self.days.len() as f64
        }
    }
}
