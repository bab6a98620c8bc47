//! Performance chart data: SPI, CPI and CR per day

use crate::{complement_evm_value, plot, to_label};
use evm_charts_calc::{ratio, EvmResult};
use evm_charts_shared::{DateRange, PerformanceChartData, Series};

/// Days on which every series has a value; `None` when they do not overlap
pub fn performance_range(series: &[&Series]) -> Option<DateRange> {
    let start = series
        .iter()
        .map(|s| s.first_date())
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .max()?;
    let end = series
        .iter()
        .map(|s| s.last_date())
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .min()?;

    let range = DateRange::new(start, end);
    (!range.is_empty()).then_some(range)
}

/// Daily performance indices for `evm`.
///
/// EV and AC are cut at the chart adjust date, then EV, AC and PV are
/// densified by linear interpolation. An index whose denominator is zero is
/// `None` for that day.
pub fn performance_chart_data(evm: &EvmResult) -> PerformanceChartData {
    let chart_adjust_date = evm.chart_adjust_date();
    let earned_value = complement_evm_value(&evm.ev.cumulative_ev.clipped_to(chart_adjust_date));
    let actual_cost = complement_evm_value(&evm.ac.cumulative_ac.clipped_to(chart_adjust_date));
    let planned_value = complement_evm_value(&evm.pv.cumulative_pv);

    let Some(range) = performance_range(&[&earned_value, &actual_cost, &planned_value]) else {
        log::debug!("No overlapping PV/EV/AC range, performance chart is empty");
        return PerformanceChartData::default();
    };

    let mut chart = PerformanceChartData::default();
    for day in range.iter() {
        let ev = earned_value.get(day);
        let spi = ev
            .zip(planned_value.get(day))
            .and_then(|(ev, pv)| ratio(ev, pv));
        let cpi = ev
            .zip(actual_cost.get(day))
            .and_then(|(ev, ac)| ratio(ev, ac));

        chart.labels.push(to_label(day));
        chart.spi.push(plot(spi));
        chart.cpi.push(plot(cpi));
        chart.cr.push(plot(spi.zip(cpi).map(|(spi, cpi)| spi * cpi)));
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Series {
        points.iter().copied().collect()
    }

    #[test]
    fn test_range_is_intersection() {
        let a = series(&[(date(2024, 1, 1), 1.0), (date(2024, 1, 10), 1.0)]);
        let b = series(&[(date(2024, 1, 3), 1.0), (date(2024, 1, 12), 1.0)]);
        let c = series(&[(date(2024, 1, 2), 1.0), (date(2024, 1, 8), 1.0)]);

        let range = performance_range(&[&a, &b, &c]).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 3), date(2024, 1, 8)));
    }

    #[test]
    fn test_range_none_when_any_series_empty() {
        let a = series(&[(date(2024, 1, 1), 1.0)]);
        assert_eq!(performance_range(&[&a, &Series::new()]), None);
    }

    #[test]
    fn test_range_none_when_disjoint() {
        let a = series(&[(date(2024, 1, 1), 1.0), (date(2024, 1, 2), 1.0)]);
        let b = series(&[(date(2024, 2, 1), 1.0)]);
        assert_eq!(performance_range(&[&a, &b]), None);
    }
}
