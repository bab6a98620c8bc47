//! Configuration system for EVM Charts
//!
//! Two layers: project-level [`EvmSettings`] loaded from a YAML, JSON or
//! TOML file, and per-request [`RequestParams`] that override them to build
//! the immutable [`EvmOptions`] handed to the calculator.

pub mod params;
pub mod parser;
pub mod validation;

pub use params::RequestParams;
pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer, TemplateExpander};
pub use validation::ConfigValidator;

use chrono::NaiveDate;
use evm_charts_shared::{DistributionPolicy, EtcMethod, EvmError, EvmOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Invalid(#[from] EvmError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Project-level defaults for EVM calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvmSettings {
    /// Hours in one working day
    pub working_hours: f64,
    pub etc_method: EtcMethod,
    /// Spread planned effort over working days only
    pub exclude_holidays: bool,
    pub holidays: Vec<NaiveDate>,
    pub forecast: bool,
    pub display_performance: bool,
    pub display_incomplete: bool,
    pub no_use_baseline: bool,
}

impl Default for EvmSettings {
    fn default() -> Self {
        Self {
            working_hours: 8.0,
            etc_method: EtcMethod::Method2,
            exclude_holidays: false,
            holidays: Vec::new(),
            forecast: false,
            display_performance: false,
            display_incomplete: false,
            no_use_baseline: false,
        }
    }
}

impl EvmSettings {
    /// Parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ConfigParser::parse_file(path)?;
        ConfigValidator::validate(&settings)?;
        Ok(settings)
    }

    pub fn distribution(&self) -> DistributionPolicy {
        if self.exclude_holidays {
            DistributionPolicy::working_days(self.holidays.iter().copied())
        } else {
            DistributionPolicy::CalendarDays
        }
    }

    /// Options for a request that sets nothing but the basis date
    pub fn options_for(&self, basis_date: NaiveDate) -> EvmOptions {
        let mut options = EvmOptions::new(basis_date)
            .with_forecast(self.forecast)
            .with_performance(self.display_performance)
            .with_incomplete(self.display_incomplete)
            .with_etc_method(self.etc_method)
            .with_distribution(self.distribution());
        options.no_use_baseline = self.no_use_baseline;
        options.working_hours = self.working_hours;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = EvmSettings::default();
        assert!(ConfigValidator::validate(&settings).is_ok());
        assert_eq!(settings.distribution(), DistributionPolicy::CalendarDays);
    }

    #[test]
    fn test_options_inherit_settings() {
        let settings = EvmSettings {
            working_hours: 7.5,
            etc_method: EtcMethod::Method3,
            exclude_holidays: true,
            holidays: vec![date(2024, 1, 1)],
            forecast: true,
            ..EvmSettings::default()
        };
        let options = settings.options_for(date(2024, 1, 15));

        assert_eq!(options.basis_date, date(2024, 1, 15));
        assert!(options.forecast);
        assert!(!options.display_performance);
        assert_eq!(options.etc_method, EtcMethod::Method3);
        assert_eq!(options.working_hours, 7.5);
        assert_eq!(
            options.distribution,
            DistributionPolicy::working_days([date(2024, 1, 1)])
        );
    }
}
