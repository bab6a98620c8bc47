//! Settings validation

use crate::{ConfigError, EvmSettings, Result};
use std::collections::BTreeSet;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete settings file
    pub fn validate(settings: &EvmSettings) -> Result<()> {
        Self::validate_working_hours(settings.working_hours)?;
        Self::validate_holidays(settings)?;
        Self::validate_cross_field(settings);
        Ok(())
    }

    fn validate_working_hours(hours: f64) -> Result<()> {
        if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid working_hours: {}. Must be greater than 0 and at most 24",
                hours
            )));
        }
        Ok(())
    }

    fn validate_holidays(settings: &EvmSettings) -> Result<()> {
        let mut seen = BTreeSet::new();
        for holiday in &settings.holidays {
            if !seen.insert(*holiday) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate holiday: {}",
                    holiday
                )));
            }
        }
        Ok(())
    }

    fn validate_cross_field(settings: &EvmSettings) {
        if !settings.exclude_holidays && !settings.holidays.is_empty() {
            log::warn!(
                "{} holidays listed but exclude_holidays is off; they will be ignored",
                settings.holidays.len()
            );
        }
    }
}
