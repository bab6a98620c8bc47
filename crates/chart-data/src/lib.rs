//! Chart series builder for EVM Charts
//!
//! Expands an [`EvmResult`](evm_charts_calc::EvmResult) into dense daily
//! arrays for a charting layer: the EVM chart with its forecast overlays and
//! the performance-index chart.

pub mod evm_chart;
pub mod interpolation;
pub mod performance;

pub use evm_chart::{chart_duration, evm_chart_data};
pub use interpolation::complement_evm_value;
pub use performance::{performance_chart_data, performance_range};

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use evm_charts_calc::evm_round;

/// Chart label for a day: local midnight in epoch milliseconds.
///
/// When local midnight does not exist (a DST gap) the UTC midnight is used.
pub fn to_label(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|time| time.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

/// Round a plotted value, keeping absence as absence
pub(crate) fn plot(value: Option<f64>) -> Option<f64> {
    value.map(evm_round)
}
