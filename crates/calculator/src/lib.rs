//! EVM calculator for EVM Charts
//!
//! Turns scheduled work items and dated cost observations into planned
//! value, earned value and actual cost series, plus the budget, finish date
//! and forecast scalars derived from them.

pub mod actual;
pub mod earned;
pub mod evm;
pub mod forecast;
pub mod indicators;
pub mod planned;

pub use actual::ActualCost;
pub use earned::EarnedValue;
pub use evm::{EvmCalculator, EvmResult};
pub use forecast::Forecast;
pub use indicators::{EvmIndicators, ValueUnit};
pub use planned::PlannedValue;

/// `numerator / denominator`, or `None` when the quotient is undefined
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Round an EVM value to two decimal places
pub fn evm_round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_guards_zero_denominator() {
        assert_eq!(ratio(80.0, 100.0), Some(0.8));
        assert_eq!(ratio(80.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(f64::NAN, 1.0), None);
    }

    #[test]
    fn test_evm_round() {
        assert_eq!(evm_round(0.6399999), 0.64);
        assert_eq!(evm_round(1.005 * 1000.0), 1005.0);
        assert_eq!(evm_round(2.0 / 3.0), 0.67);
        assert_eq!(evm_round(-1.234), -1.23);
    }
}
