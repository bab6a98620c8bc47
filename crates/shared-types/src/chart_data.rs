//! Chart payloads handed to a charting layer
//!
//! Every value array is positionally aligned with `labels` and has the same
//! length. A day without a value holds `None`, never zero.

use serde::{Deserialize, Serialize};

/// Dense daily EVM chart: PV, EV, AC, baseline, daily PV and forecast overlays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvmChartData {
    /// Local midnight of each day, in epoch milliseconds
    pub labels: Vec<i64>,
    pub pv: Vec<Option<f64>>,
    pub ac: Vec<Option<f64>>,
    pub ev: Vec<Option<f64>>,
    pub baseline: Vec<Option<f64>>,
    pub pv_daily: Vec<Option<f64>>,
    pub bac: Vec<Option<f64>>,
    pub eac: Vec<Option<f64>>,
    pub ac_forecast: Vec<Option<f64>>,
    pub ev_forecast: Vec<Option<f64>>,
}

impl EvmChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All value arrays, in output order
    pub fn series(&self) -> [(&'static str, &[Option<f64>]); 9] {
        [
            ("pv", self.pv.as_slice()),
            ("ac", self.ac.as_slice()),
            ("ev", self.ev.as_slice()),
            ("baseline", self.baseline.as_slice()),
            ("pv_daily", self.pv_daily.as_slice()),
            ("bac", self.bac.as_slice()),
            ("eac", self.eac.as_slice()),
            ("ac_forecast", self.ac_forecast.as_slice()),
            ("ev_forecast", self.ev_forecast.as_slice()),
        ]
    }

    /// Every value array has one entry per label
    pub fn is_aligned(&self) -> bool {
        self.series()
            .iter()
            .all(|(_, values)| values.len() == self.labels.len())
    }
}

/// Daily performance indices over the range where PV, EV and AC all exist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceChartData {
    pub labels: Vec<i64>,
    pub spi: Vec<Option<f64>>,
    pub cpi: Vec<Option<f64>>,
    pub cr: Vec<Option<f64>>,
}

impl PerformanceChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.labels.len();
        self.spi.len() == n && self.cpi.len() == n && self.cr.len() == n
    }
}
