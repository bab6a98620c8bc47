//! Per-request parameters
//!
//! Requests carry flat string pairs (`forecast=true`, `basis_date=2024-01-31`).
//! Anything a request leaves out falls back to the project's [`EvmSettings`].

use crate::{EvmSettings, Result};
use chrono::NaiveDate;
use evm_charts_shared::{invalid_param, parse_date, EtcMethod, EvmOptions};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value, trimmed; blank values count as absent
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Boolean flag, `None` when the request does not set it
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        let Some(raw) = self.values.get(name) else {
            return Ok(None);
        };
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Ok(Some(true)),
            "false" | "0" | "off" | "no" | "" => Ok(Some(false)),
            _ => Err(invalid_param!(name, "expected a boolean, got '{}'", raw).into()),
        }
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>> {
        self.get(name)
            .map(parse_date)
            .transpose()
            .map_err(Into::into)
    }

    pub fn id(&self, name: &str) -> Result<Option<u64>> {
        self.get(name)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| invalid_param!(name, "expected a numeric id, got '{}'", raw).into())
            })
            .transpose()
    }

    /// Comma separated id list, empty when absent
    pub fn ids(&self, name: &str) -> Result<Vec<u64>> {
        let Some(raw) = self.get(name) else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| invalid_param!(name, "expected a numeric id, got '{}'", part).into())
            })
            .collect()
    }

    fn number(&self, name: &str) -> Result<Option<f64>> {
        self.get(name)
            .map(|raw| match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
                _ => Err(invalid_param!(name, "expected a positive number, got '{}'", raw).into()),
            })
            .transpose()
    }

    /// Build the options for one calculation; request values win over settings
    pub fn to_options(&self, settings: &EvmSettings, today: NaiveDate) -> Result<EvmOptions> {
        let basis_date = self.date("basis_date")?.unwrap_or(today);
        let mut options = settings.options_for(basis_date);

        if let Some(forecast) = self.flag("forecast")? {
            options.forecast = forecast;
        }
        if let Some(performance) = self.flag("display_performance")? {
            options.display_performance = performance;
        }
        if let Some(incomplete) = self.flag("display_incomplete")? {
            options.display_incomplete = incomplete;
        }
        if let Some(no_use_baseline) = self.flag("no_use_baseline")? {
            options.no_use_baseline = no_use_baseline;
        }
        if let Some(method) = self.get("etc_method") {
            options.etc_method = method.parse::<EtcMethod>()?;
        }
        if let Some(hours) = self.number("working_hours")? {
            options.working_hours = hours;
        }

        options.baseline_id = self.id("baseline_id")?;
        options.selected_tracker_ids = self.ids("selected_tracker_ids")?;
        options.selected_version_id = self.id("selected_version_id")?;
        options.selected_assignee_id = self.id("selected_assignee_id")?;

        log::debug!(
            "Request options: basis {}, forecast {}, scope {:?}",
            options.basis_date,
            options.forecast,
            options.selector()
        );
        Ok(options)
    }
}
