//! Actual cost (AC)

use chrono::NaiveDate;
use evm_charts_shared::{DatedValue, Series};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualCost {
    pub daily_ac: Series,
    pub cumulative_ac: Series,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl ActualCost {
    /// Observations sharing a day are summed.
    pub fn new(basis_date: NaiveDate, costs: &[DatedValue]) -> Self {
        let daily_ac: Series = costs.iter().map(|cost| (cost.date, cost.value)).collect();
        let cumulative_ac = daily_ac.cumulative();

        Self {
            min_date: cumulative_ac.first_date().unwrap_or(basis_date),
            max_date: cumulative_ac.last_date().unwrap_or(basis_date),
            daily_ac,
            cumulative_ac,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative_ac.is_empty()
    }

    /// Cumulative AC on `date`; `None` when no cost was ever recorded
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.cumulative_ac.value_at(date).unwrap_or(0.0))
        }
    }
}
