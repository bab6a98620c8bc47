//! Cost and schedule forecast
//!
//! The estimate at completion (EAC) follows the configured [`EtcMethod`].
//! The forecast finish date stretches the remaining schedule by the current
//! schedule performance.

use crate::{ratio, ActualCost, EarnedValue, PlannedValue};
use chrono::{Days, NaiveDate};
use evm_charts_shared::EtcMethod;
use serde::Serialize;

/// Forecasts further out than this many days past the basis date are capped
pub const FORECAST_HORIZON_DAYS: u64 = 3_650;

/// Values anchoring the forecast overlay lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// `None` when no cost was recorded or the performance ratio is undefined
    pub eac: Option<f64>,
    pub forecast_finish_date: NaiveDate,
    /// AC at the basis date; `None` without cost observations
    pub today_ac: Option<f64>,
    pub today_ev: f64,
}

impl Forecast {
    pub fn project(
        basis_date: NaiveDate,
        pv: &PlannedValue,
        ev: &EarnedValue,
        ac: &ActualCost,
        finished_date: Option<NaiveDate>,
        etc_method: EtcMethod,
    ) -> Self {
        let bac = pv.bac();
        let today_pv = pv.value_at(basis_date);
        let today_ev = ev.value_at(basis_date);
        let today_ac = ac.value_at(basis_date);

        Self {
            eac: estimate_at_completion(bac, today_pv, today_ev, today_ac, etc_method),
            forecast_finish_date: forecast_finish_date(
                basis_date,
                pv,
                today_pv,
                today_ev,
                finished_date,
            ),
            today_ac,
            today_ev,
        }
    }
}

/// Estimate to complete: the cost still expected for the remaining work
pub fn estimate_to_complete(
    bac: f64,
    today_pv: f64,
    today_ev: f64,
    today_ac: Option<f64>,
    etc_method: EtcMethod,
) -> Option<f64> {
    let today_ac = today_ac?;
    let remaining = bac - today_ev;
    match etc_method {
        EtcMethod::Method1 => Some(remaining),
        EtcMethod::Method2 => ratio(remaining, ratio(today_ev, today_ac)?),
        EtcMethod::Method3 => {
            let cr = ratio(today_ev, today_pv)? * ratio(today_ev, today_ac)?;
            ratio(remaining, cr)
        }
    }
}

/// Estimate at completion: `AC + ETC`
pub fn estimate_at_completion(
    bac: f64,
    today_pv: f64,
    today_ev: f64,
    today_ac: Option<f64>,
    etc_method: EtcMethod,
) -> Option<f64> {
    let etc = estimate_to_complete(bac, today_pv, today_ev, today_ac, etc_method)?;
    today_ac.map(|ac| ac + etc)
}

/// Projected completion day.
///
/// A finished project finishes on its finished date. Without earned value
/// or schedule performance the planned due date stands. Past the planned due
/// date the remaining budget is burned at the average earned rate so far;
/// before it the remaining schedule is divided by SPI.
pub fn forecast_finish_date(
    basis_date: NaiveDate,
    pv: &PlannedValue,
    today_pv: f64,
    today_ev: f64,
    finished_date: Option<NaiveDate>,
) -> NaiveDate {
    if let Some(finished) = finished_date {
        return finished;
    }
    if today_ev <= 0.0 {
        return pv.due_date;
    }

    let rest_days = if basis_date >= pv.due_date {
        let elapsed_days = ((basis_date - pv.start_date).num_days() + 1).max(1) as f64;
        let earned_per_day = today_ev / elapsed_days;
        ratio(pv.bac() - today_ev, earned_per_day)
    } else {
        let remaining_days = (pv.due_date - basis_date).num_days() as f64;
        ratio(today_ev, today_pv)
            .filter(|spi| *spi > 0.0)
            .and_then(|spi| ratio(remaining_days, spi))
    };

    match rest_days {
        Some(days) => {
            let days = days.ceil().max(0.0) as u64;
            if days > FORECAST_HORIZON_DAYS {
                log::debug!(
                    "Forecast {} days past {} exceeds the horizon, capping",
                    days,
                    basis_date
                );
            }
            basis_date
                .checked_add_days(Days::new(days.min(FORECAST_HORIZON_DAYS)))
                .unwrap_or(pv.due_date)
        }
        None => pv.due_date,
    }
}
