//! Linear densification of sparse cumulative series

use chrono::NaiveDate;
use evm_charts_shared::Series;

/// Fill every calendar day between the first and last sample of `series`.
///
/// Days between two consecutive samples `(d0, v0)` and `(d1, v1)` get
/// `v0 + i * (v1 - v0) / (d1 - d0)` for offset `i`. Sample days keep their
/// values unchanged. Dense input comes back unchanged.
pub fn complement_evm_value(series: &Series) -> Series {
    let mut dense = Series::new();
    let mut previous: Option<(NaiveDate, f64)> = None;

    for (date, value) in series.iter() {
        if let Some((before_date, before_value)) = previous {
            let span = (date - before_date).num_days();
            if span > 1 {
                let difference = value - before_value;
                for (offset, day) in before_date
                    .iter_days()
                    .enumerate()
                    .skip(1)
                    .take(span as usize - 1)
                {
                    dense.insert(
                        day,
                        before_value + offset as f64 * difference / span as f64,
                    );
                }
            }
        }
        dense.insert(date, value);
        previous = Some((date, value));
    }

    dense
}
