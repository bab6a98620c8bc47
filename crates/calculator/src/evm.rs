//! EVM calculation entry point

use crate::{ActualCost, EarnedValue, Forecast, PlannedValue};
use chrono::NaiveDate;
use evm_charts_shared::{DatedValue, EtcMethod, EvmOptions, WorkItem};
use serde::Serialize;

/// Output of one EVM calculation. Built fresh per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvmResult {
    /// PV used for indicators: the baseline's when one is in use
    pub pv: PlannedValue,
    /// PV of the current schedule
    pub pv_actual: PlannedValue,
    pub pv_baseline: Option<PlannedValue>,
    pub ev: EarnedValue,
    pub ac: ActualCost,
    pub bac: f64,
    pub basis_date: NaiveDate,
    pub finished_date: Option<NaiveDate>,
    pub etc_method: EtcMethod,
    /// Present only when forecasting was requested
    pub forecast: Option<Forecast>,
}

impl EvmResult {
    pub fn is_forecast(&self) -> bool {
        self.forecast.is_some()
    }

    /// EV and AC are only charted up to this day: the finished date when the
    /// project finished before the basis date, the basis date otherwise
    pub fn chart_adjust_date(&self) -> NaiveDate {
        match self.finished_date {
            Some(finished) => finished.min(self.basis_date),
            None => self.basis_date,
        }
    }

    pub fn today_pv(&self) -> f64 {
        self.pv.value_at(self.basis_date)
    }

    pub fn today_ev(&self) -> f64 {
        self.ev.value_at(self.basis_date)
    }

    pub fn today_ac(&self) -> Option<f64> {
        self.ac.value_at(self.basis_date)
    }
}

/// Builds an [`EvmResult`] from schedule and cost data
pub struct EvmCalculator<'a> {
    baseline: Option<&'a [WorkItem]>,
    items: &'a [WorkItem],
    costs: &'a [DatedValue],
    options: &'a EvmOptions,
}

impl<'a> EvmCalculator<'a> {
    pub fn new(
        baseline: Option<&'a [WorkItem]>,
        items: &'a [WorkItem],
        costs: &'a [DatedValue],
        options: &'a EvmOptions,
    ) -> Self {
        Self {
            baseline,
            items,
            costs,
            options,
        }
    }

    pub fn calculate(&self) -> EvmResult {
        let basis_date = self.options.basis_date;
        let policy = &self.options.distribution;

        let pv_actual = PlannedValue::new(basis_date, self.items, policy);
        let pv_baseline = match self.baseline {
            Some(snapshot) if !self.options.no_use_baseline => {
                Some(PlannedValue::new(basis_date, snapshot, policy))
            }
            _ => None,
        };
        let pv = pv_baseline.clone().unwrap_or_else(|| pv_actual.clone());

        let ev = EarnedValue::new(basis_date, self.items);
        let ac = ActualCost::new(basis_date, self.costs);
        let finished_date = ev.finished_date;
        let bac = pv.bac();

        let forecast = self.options.forecast.then(|| {
            Forecast::project(
                basis_date,
                &pv,
                &ev,
                &ac,
                finished_date,
                self.options.etc_method,
            )
        });

        log::debug!(
            "EVM calculated: {} items, {} cost days, baseline={}, bac={:.2}, finished={:?}",
            self.items.len(),
            ac.daily_ac.len(),
            pv_baseline.is_some(),
            bac,
            finished_date
        );

        EvmResult {
            pv,
            pv_actual,
            pv_baseline,
            ev,
            ac,
            bac,
            basis_date,
            finished_date,
            etc_method: self.options.etc_method,
            forecast,
        }
    }
}
