//! Common error types used across the EVM Charts crates

use chrono::NaiveDate;
use thiserror::Error;

/// Base error type for EVM Charts operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvmError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Unknown ETC method: {name}")]
    UnknownEtcMethod { name: String },
}

/// Result type alias for EVM Charts operations
pub type Result<T> = std::result::Result<T, EvmError>;

/// Parse an ISO calendar date (`2024-01-31`)
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EvmError::InvalidDate {
        value: value.to_string(),
    })
}

/// Helper macro for creating parameter errors
#[macro_export]
macro_rules! invalid_param {
    ($name:expr, $($arg:tt)*) => {
        $crate::errors::EvmError::InvalidParameter {
            name: $name.to_string(),
            message: format!($($arg)*),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        match parse_date("2024-13-01") {
            Err(EvmError::InvalidDate { value }) => assert_eq!(value, "2024-13-01"),
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_param_macro() {
        let err = invalid_param!("forecast", "expected a flag, got {}", "maybe");
        assert_eq!(
            err.to_string(),
            "Invalid parameter forecast: expected a flag, got maybe"
        );
    }
}
