//! Command-line front end for EVM Charts
//!
//! Turns command-line flags into request parameters, loads the dataset and
//! settings files, and renders the view the same way a tracker would.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use evm_charts_calc::{EvmIndicators, ValueUnit};
use evm_charts_config::{EvmSettings, RequestParams};
use evm_charts_integration::{Dataset, EvmService, EvmView, InMemoryStore};
use std::path::{Path, PathBuf};

/// Flags shared by every rendering command
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Dataset file (YAML, JSON or TOML) with issues, costs and baselines
    #[arg(long, value_name = "FILE")]
    pub dataset: PathBuf,

    /// Basis date, YYYY-MM-DD; today when omitted
    #[arg(long, value_name = "DATE")]
    pub basis_date: Option<String>,

    /// Draw forecast lines
    #[arg(long)]
    pub forecast: bool,

    /// Include the SPI/CPI/CR chart
    #[arg(long)]
    pub performance: bool,

    /// List incomplete issues
    #[arg(long)]
    pub incomplete: bool,

    /// Ignore baselines
    #[arg(long)]
    pub no_baseline: bool,

    /// Baseline id; the latest baseline when omitted
    #[arg(long, value_name = "ID")]
    pub baseline: Option<u64>,

    /// Tracker ids (comma-separated)
    #[arg(long, value_name = "IDS")]
    pub tracker: Option<String>,

    /// Version id
    #[arg(long, value_name = "ID")]
    pub version: Option<u64>,

    /// Assignee id
    #[arg(long, value_name = "ID")]
    pub assignee: Option<u64>,

    /// ETC method: method1, method2 or method3
    #[arg(long, value_name = "METHOD")]
    pub etc_method: Option<String>,

    /// Report indicators in working days instead of hours
    #[arg(long)]
    pub days: bool,
}

impl RequestArgs {
    /// Request parameters for the flags that were given. Absent switches are
    /// left out so the settings file decides.
    pub fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        if let Some(date) = &self.basis_date {
            params.insert("basis_date", date.as_str());
        }
        let switches = [
            ("forecast", self.forecast),
            ("display_performance", self.performance),
            ("display_incomplete", self.incomplete),
            ("no_use_baseline", self.no_baseline),
        ];
        for (name, set) in switches {
            if set {
                params.insert(name, "true");
            }
        }
        if let Some(id) = self.baseline {
            params.insert("baseline_id", id.to_string());
        }
        if let Some(ids) = &self.tracker {
            params.insert("selected_tracker_ids", ids.as_str());
        }
        if let Some(id) = self.version {
            params.insert("selected_version_id", id.to_string());
        }
        if let Some(id) = self.assignee {
            params.insert("selected_assignee_id", id.to_string());
        }
        if let Some(method) = &self.etc_method {
            params.insert("etc_method", method.as_str());
        }
        params
    }

    pub fn unit(&self) -> ValueUnit {
        if self.days {
            ValueUnit::Days
        } else {
            ValueUnit::Hours
        }
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<EvmSettings> {
    match path {
        Some(path) => EvmSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(EvmSettings::default()),
    }
}

/// Load everything the request needs and render it
pub fn build_view(args: &RequestArgs, settings: &EvmSettings, today: NaiveDate) -> Result<EvmView> {
    let options = args
        .to_params()
        .to_options(settings, today)
        .context("Invalid request options")?;

    let dataset = Dataset::load(&args.dataset)
        .with_context(|| format!("Failed to load dataset from {}", args.dataset.display()))?;
    let store = InMemoryStore::from_dataset(dataset).context("Failed to build project store")?;

    let service = EvmService::new(store).with_unit(args.unit());
    Ok(service.render(&options))
}

/// Indicator table as `label: value` lines
pub fn summary_lines(indicators: &EvmIndicators) -> Vec<String> {
    fn opt(value: Option<f64>) -> String {
        value.map_or_else(|| "-".to_string(), |v| v.to_string())
    }

    let unit = match indicators.unit {
        ValueUnit::Hours => "h",
        ValueUnit::Days => "d",
    };
    vec![
        format!("Basis date: {}", indicators.basis_date),
        format!(
            "Planned: {} .. {}",
            indicators.planned_start_date, indicators.planned_due_date
        ),
        format!("BAC: {}{}", indicators.bac, unit),
        format!("PV: {}{}", indicators.today_pv, unit),
        format!("EV: {}{}", indicators.today_ev, unit),
        format!("AC: {}", opt(indicators.today_ac)),
        format!("SV: {}  CV: {}", indicators.sv, opt(indicators.cv)),
        format!(
            "SPI: {}  CPI: {}  CR: {}",
            opt(indicators.spi),
            opt(indicators.cpi),
            opt(indicators.cr)
        ),
        format!(
            "ETC: {}  EAC: {}  VAC: {}  TCPI: {}",
            opt(indicators.etc),
            opt(indicators.eac),
            opt(indicators.vac),
            opt(indicators.tcpi)
        ),
        format!(
            "Complete: EV {}%  PV {}%",
            opt(indicators.complete_ev),
            opt(indicators.complete_pv)
        ),
        format!(
            "Forecast finish: {} (delay {} days)",
            indicators.forecast_finish_date, indicators.delay_days
        ),
    ]
}
