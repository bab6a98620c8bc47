//! Summary indicators at the basis date
//!
//! The table shown next to the EVM chart: the budget, today's PV/EV/AC,
//! variances, performance indices, completion estimates and the schedule
//! delay. Values can be expressed in hours or converted to working days.

use crate::forecast::{estimate_at_completion, estimate_to_complete, forecast_finish_date};
use crate::{evm_round, ratio, EvmResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit of the effort values in the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    #[default]
    Hours,
    Days,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvmIndicators {
    pub unit: ValueUnit,
    pub basis_date: NaiveDate,
    pub planned_start_date: NaiveDate,
    pub planned_due_date: NaiveDate,
    pub finished_date: Option<NaiveDate>,

    pub bac: f64,
    pub today_pv: f64,
    pub today_ev: f64,
    pub today_ac: Option<f64>,

    /// Schedule variance, EV - PV
    pub sv: f64,
    /// Cost variance, EV - AC
    pub cv: Option<f64>,
    pub spi: Option<f64>,
    pub cpi: Option<f64>,
    pub cr: Option<f64>,

    pub etc: Option<f64>,
    pub eac: Option<f64>,
    /// Variance at completion, BAC - EAC
    pub vac: Option<f64>,
    /// To-complete performance index, (BAC - EV) / (BAC - AC)
    pub tcpi: Option<f64>,

    /// EV / BAC in percent
    pub complete_ev: Option<f64>,
    /// PV / BAC in percent
    pub complete_pv: Option<f64>,

    pub forecast_finish_date: NaiveDate,
    /// Forecast finish date minus planned due date
    pub delay_days: i64,
}

impl EvmIndicators {
    /// `working_hours` converts hours into days when `unit` is [`ValueUnit::Days`].
    pub fn new(evm: &EvmResult, unit: ValueUnit, working_hours: f64) -> Self {
        let basis_date = evm.basis_date;
        let bac = evm.bac;
        let today_pv = evm.today_pv();
        let today_ev = evm.today_ev();
        let today_ac = evm.today_ac();

        let spi = ratio(today_ev, today_pv);
        let cpi = today_ac.and_then(|ac| ratio(today_ev, ac));
        let cr = spi.zip(cpi).map(|(spi, cpi)| spi * cpi);

        let etc = estimate_to_complete(bac, today_pv, today_ev, today_ac, evm.etc_method);
        let eac = estimate_at_completion(bac, today_pv, today_ev, today_ac, evm.etc_method);
        let tcpi = today_ac.and_then(|ac| ratio(bac - today_ev, bac - ac));

        let forecast_finish_date = match &evm.forecast {
            Some(forecast) => forecast.forecast_finish_date,
            None => forecast_finish_date(basis_date, &evm.pv, today_pv, today_ev, evm.finished_date),
        };
        let delay_days = (forecast_finish_date - evm.pv.due_date).num_days();

        let scale = match unit {
            ValueUnit::Hours => 1.0,
            ValueUnit::Days if working_hours > 0.0 => 1.0 / working_hours,
            ValueUnit::Days => {
                log::warn!("working_hours must be positive, keeping hours");
                1.0
            }
        };
        let effort = |value: f64| evm_round(value * scale);

        Self {
            unit,
            basis_date,
            planned_start_date: evm.pv.start_date,
            planned_due_date: evm.pv.due_date,
            finished_date: evm.finished_date,
            bac: effort(bac),
            today_pv: effort(today_pv),
            today_ev: effort(today_ev),
            today_ac: today_ac.map(effort),
            sv: effort(today_ev - today_pv),
            cv: today_ac.map(|ac| effort(today_ev - ac)),
            spi: spi.map(evm_round),
            cpi: cpi.map(evm_round),
            cr: cr.map(evm_round),
            etc: etc.map(effort),
            eac: eac.map(effort),
            vac: eac.map(|eac| effort(bac - eac)),
            tcpi: tcpi.map(evm_round),
            complete_ev: ratio(today_ev * 100.0, bac).map(|v| (v * 10.0).round() / 10.0),
            complete_pv: ratio(today_pv * 100.0, bac).map(|v| (v * 10.0).round() / 10.0),
            forecast_finish_date,
            delay_days,
        }
    }
}
