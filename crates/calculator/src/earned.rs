//! Earned value (EV)
//!
//! A work item closed on or before the basis date earns its full planned
//! effort on its closing day. An item still open at the basis date earns
//! `planned_effort * done_ratio / 100` on the day it was last updated, capped
//! at the basis date.

use chrono::NaiveDate;
use evm_charts_shared::{Series, WorkItem};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedValue {
    pub daily_ev: Series,
    pub cumulative_ev: Series,
    /// First sample, or the basis date when nothing was earned
    pub min_date: NaiveDate,
    /// Last sample, or the basis date when nothing was earned
    pub max_date: NaiveDate,
    /// Latest closing day, once every item in scope is closed
    pub finished_date: Option<NaiveDate>,
}

impl EarnedValue {
    pub fn new(basis_date: NaiveDate, items: &[WorkItem]) -> Self {
        let scheduled: Vec<&WorkItem> = items.iter().filter(|item| item.is_scheduled()).collect();

        let mut daily_ev = Series::new();
        for item in &scheduled {
            match item.closed_on {
                Some(closed_on) if closed_on <= basis_date => {
                    daily_ev.add(closed_on, item.planned_effort);
                }
                _ if item.done_ratio > 0 => {
                    let earned_on = item
                        .updated_on
                        .map_or(basis_date, |updated| updated.min(basis_date));
                    daily_ev.add(
                        earned_on,
                        item.planned_effort * f64::from(item.done_ratio) / 100.0,
                    );
                }
                _ => {}
            }
        }
        let cumulative_ev = daily_ev.cumulative();

        let finished_date = if !scheduled.is_empty()
            && scheduled.iter().all(|item| item.is_closed_by(basis_date))
        {
            scheduled.iter().filter_map(|item| item.closed_on).max()
        } else {
            None
        };

        Self {
            min_date: cumulative_ev.first_date().unwrap_or(basis_date),
            max_date: cumulative_ev.last_date().unwrap_or(basis_date),
            daily_ev,
            cumulative_ev,
            finished_date,
        }
    }

    /// Cumulative EV on `date`, holding the last earned value
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.cumulative_ev.value_at(date).unwrap_or(0.0)
    }
}
