//! Request options for a single EVM calculation
//!
//! An [`EvmOptions`] value is built once per request (see the config crate)
//! and passed by reference to every component. Nothing mutates it afterwards.

use crate::errors::{EvmError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How the estimate to complete is derived from current performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EtcMethod {
    /// Remaining work at the planned rate: `BAC - EV`
    Method1,
    /// Remaining work at the current cost performance: `(BAC - EV) / CPI`
    #[default]
    Method2,
    /// Remaining work at the combined ratio: `(BAC - EV) / CR`
    Method3,
}

impl EtcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EtcMethod::Method1 => "method1",
            EtcMethod::Method2 => "method2",
            EtcMethod::Method3 => "method3",
        }
    }
}

impl fmt::Display for EtcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EtcMethod {
    type Err = EvmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "method1" => Ok(EtcMethod::Method1),
            "method2" => Ok(EtcMethod::Method2),
            "method3" => Ok(EtcMethod::Method3),
            _ => Err(EvmError::UnknownEtcMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Which days a work item's planned effort is spread across
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DistributionPolicy {
    /// Every calendar day between start and due carries the same share
    #[default]
    CalendarDays,
    /// Weekends and the listed holidays carry nothing
    WorkingDays {
        #[serde(default)]
        holidays: BTreeSet<NaiveDate>,
    },
}

impl DistributionPolicy {
    pub fn working_days(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        DistributionPolicy::WorkingDays {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Whether `date` receives a share of planned effort
    pub fn counts(&self, date: NaiveDate) -> bool {
        match self {
            DistributionPolicy::CalendarDays => true,
            DistributionPolicy::WorkingDays { holidays } => {
                !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
                    && !holidays.contains(&date)
            }
        }
    }
}

/// Which work items and costs a calculation covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum ScopeSelector {
    Project,
    Trackers(Vec<u64>),
    Version(u64),
    Assignee(u64),
}

/// Immutable configuration bag for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmOptions {
    pub basis_date: NaiveDate,
    pub selected_tracker_ids: Vec<u64>,
    pub selected_version_id: Option<u64>,
    pub selected_assignee_id: Option<u64>,
    /// Baseline to compare against; the latest one when `None`
    pub baseline_id: Option<u64>,
    pub no_use_baseline: bool,
    pub forecast: bool,
    pub display_performance: bool,
    pub display_incomplete: bool,
    pub etc_method: EtcMethod,
    /// Hours in one working day, used to express values in days
    pub working_hours: f64,
    pub distribution: DistributionPolicy,
}

impl EvmOptions {
    pub fn new(basis_date: NaiveDate) -> Self {
        Self {
            basis_date,
            selected_tracker_ids: Vec::new(),
            selected_version_id: None,
            selected_assignee_id: None,
            baseline_id: None,
            no_use_baseline: false,
            forecast: false,
            display_performance: false,
            display_incomplete: false,
            etc_method: EtcMethod::default(),
            working_hours: 8.0,
            distribution: DistributionPolicy::default(),
        }
    }

    pub fn with_forecast(mut self, forecast: bool) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn with_performance(mut self, display_performance: bool) -> Self {
        self.display_performance = display_performance;
        self
    }

    pub fn with_incomplete(mut self, display_incomplete: bool) -> Self {
        self.display_incomplete = display_incomplete;
        self
    }

    pub fn without_baseline(mut self) -> Self {
        self.no_use_baseline = true;
        self
    }

    pub fn with_etc_method(mut self, etc_method: EtcMethod) -> Self {
        self.etc_method = etc_method;
        self
    }

    pub fn with_distribution(mut self, distribution: DistributionPolicy) -> Self {
        self.distribution = distribution;
        self
    }

    /// Scope implied by the selected ids. A version wins over trackers,
    /// trackers over an assignee.
    pub fn selector(&self) -> ScopeSelector {
        if let Some(version_id) = self.selected_version_id {
            ScopeSelector::Version(version_id)
        } else if !self.selected_tracker_ids.is_empty() {
            ScopeSelector::Trackers(self.selected_tracker_ids.clone())
        } else if let Some(assignee_id) = self.selected_assignee_id {
            ScopeSelector::Assignee(assignee_id)
        } else {
            ScopeSelector::Project
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_etc_method_parse() {
        assert_eq!("method1".parse::<EtcMethod>().unwrap(), EtcMethod::Method1);
        assert_eq!(" METHOD3 ".parse::<EtcMethod>().unwrap(), EtcMethod::Method3);
        assert!("method4".parse::<EtcMethod>().is_err());
        assert_eq!(EtcMethod::default().to_string(), "method2");
    }

    #[test]
    fn test_working_day_policy() {
        let policy = DistributionPolicy::working_days([date(2024, 1, 1)]);
        // 2024-01-01 is a Monday holiday, 01-06 and 01-07 a weekend
        assert!(!policy.counts(date(2024, 1, 1)));
        assert!(policy.counts(date(2024, 1, 2)));
        assert!(!policy.counts(date(2024, 1, 6)));
        assert!(!policy.counts(date(2024, 1, 7)));
        assert!(DistributionPolicy::CalendarDays.counts(date(2024, 1, 6)));
    }

    #[test]
    fn test_selector_precedence() {
        let mut options = EvmOptions::new(date(2024, 1, 1));
        assert_eq!(options.selector(), ScopeSelector::Project);

        options.selected_assignee_id = Some(4);
        assert_eq!(options.selector(), ScopeSelector::Assignee(4));

        options.selected_tracker_ids = vec![1, 2];
        assert_eq!(options.selector(), ScopeSelector::Trackers(vec![1, 2]));

        options.selected_version_id = Some(9);
        assert_eq!(options.selector(), ScopeSelector::Version(9));
    }

    #[test]
    fn test_distribution_policy_serde() {
        let policy: DistributionPolicy = serde_json::from_str(
            r#"{"policy": "working_days", "holidays": ["2024-05-01"]}"#,
        )
        .unwrap();
        assert_eq!(policy, DistributionPolicy::working_days([date(2024, 5, 1)]));
    }
}
