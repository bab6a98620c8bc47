//! EVM chart data
//!
//! Builds the dense daily payload for the main EVM chart:
//!
//! 1. PV, EV, AC, baseline and daily PV lines
//! 2. When forecasting, four overlays:
//!    * BAC top line
//!    * EAC top line
//!    * forecast AC, from today's AC to the EAC at the forecast finish date
//!    * forecast EV, from today's EV to the BAC at the forecast finish date
//!
//! Values are looked up per day without forward filling, so a day without a
//! sample is a gap in the line.

use crate::{plot, to_label};
use evm_charts_calc::EvmResult;
use evm_charts_shared::{DateRange, EvmChartData, Series};

/// Days covered by the chart
pub fn chart_duration(evm: &EvmResult) -> DateRange {
    let mut starts = vec![
        evm.pv.start_date,
        evm.pv_actual.start_date,
        evm.ev.min_date,
        evm.ac.min_date,
    ];
    if let Some(baseline) = &evm.pv_baseline {
        starts.push(baseline.start_date);
    }

    let mut ends = vec![evm.pv.due_date, evm.pv_actual.due_date];
    if let Some(forecast) = &evm.forecast {
        ends.push(forecast.forecast_finish_date);
    }
    if let Some(baseline) = &evm.pv_baseline {
        ends.push(baseline.due_date);
    }
    if evm.finished_date.is_some() {
        ends.push(evm.ev.max_date);
        ends.push(evm.ac.max_date);
    } else {
        // Not finished yet: extend to the latest recorded sample only
        ends.extend(evm.ev.cumulative_ev.last_date());
        ends.extend(evm.ac.cumulative_ac.last_date());
    }

    DateRange::new(
        starts.into_iter().min().unwrap_or(evm.basis_date),
        ends.into_iter().max().unwrap_or(evm.basis_date),
    )
}

/// Overlay lines drawn only when forecasting
#[derive(Default)]
struct ForecastLines {
    bac_top_line: Series,
    eac_top_line: Series,
    actual_cost_forecast: Series,
    earned_value_forecast: Series,
}

impl ForecastLines {
    fn new(evm: &EvmResult, duration: DateRange) -> Self {
        let mut lines = ForecastLines::default();
        let Some(forecast) = &evm.forecast else {
            return lines;
        };

        lines.bac_top_line.insert(duration.start, evm.bac);
        lines.bac_top_line.insert(duration.end, evm.bac);

        if let Some(eac) = forecast.eac {
            lines.eac_top_line.insert(duration.start, eac);
            lines.eac_top_line.insert(duration.end, eac);
        }

        if let Some(today_ac) = forecast.today_ac {
            lines.actual_cost_forecast.insert(evm.basis_date, today_ac);
        }
        if let Some(eac) = forecast.eac {
            lines
                .actual_cost_forecast
                .insert(forecast.forecast_finish_date, eac);
        }

        lines
            .earned_value_forecast
            .insert(evm.basis_date, forecast.today_ev);
        lines
            .earned_value_forecast
            .insert(forecast.forecast_finish_date, evm.bac);

        lines
    }
}

/// Dense daily EVM chart for `evm`
pub fn evm_chart_data(evm: &EvmResult) -> EvmChartData {
    let duration = chart_duration(evm);

    // PV lines end at their own due date
    let planned_value = evm
        .pv_actual
        .cumulative_pv
        .clipped_to(evm.pv_actual.due_date);
    let baseline_value = evm
        .pv_baseline
        .as_ref()
        .map(|baseline| baseline.cumulative_pv.clipped_to(baseline.due_date));

    // EV and AC stop at the basis date or the finished date
    let chart_adjust_date = evm.chart_adjust_date();
    let earned_value = evm.ev.cumulative_ev.clipped_to(chart_adjust_date);
    let actual_cost = evm.ac.cumulative_ac.clipped_to(chart_adjust_date);

    let forecast = ForecastLines::new(evm, duration);

    let days = duration.days();
    let mut chart = EvmChartData {
        labels: Vec::with_capacity(days),
        pv: Vec::with_capacity(days),
        ac: Vec::with_capacity(days),
        ev: Vec::with_capacity(days),
        baseline: Vec::with_capacity(days),
        pv_daily: Vec::with_capacity(days),
        bac: Vec::with_capacity(days),
        eac: Vec::with_capacity(days),
        ac_forecast: Vec::with_capacity(days),
        ev_forecast: Vec::with_capacity(days),
    };

    for day in duration.iter() {
        chart.labels.push(to_label(day));
        chart.pv.push(plot(planned_value.get(day)));
        chart.ac.push(plot(actual_cost.get(day)));
        chart.ev.push(plot(earned_value.get(day)));
        chart.baseline.push(plot(
            baseline_value.as_ref().and_then(|baseline| baseline.get(day)),
        ));
        chart.pv_daily.push(plot(evm.pv.daily_pv.get(day)));
        chart.bac.push(plot(forecast.bac_top_line.get(day)));
        chart.eac.push(plot(forecast.eac_top_line.get(day)));
        chart.ac_forecast.push(plot(forecast.actual_cost_forecast.get(day)));
        chart.ev_forecast.push(plot(forecast.earned_value_forecast.get(day)));
    }

    log::debug!(
        "EVM chart built: {} days from {} to {}",
        chart.len(),
        duration.start,
        duration.end
    );

    chart
}
