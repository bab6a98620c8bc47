//! Service glue for EVM Charts
//!
//! Connects a [`ProjectStore`] to the calculator and the chart series
//! builder. [`EvmService::render`] turns one request's options into the
//! complete [`EvmView`] payload.

pub mod service;
pub mod store;

pub use service::{EvmService, EvmView};
pub use store::{Baseline, Dataset, InMemoryStore, ProjectStore};

use evm_charts_config::ConfigError;
use thiserror::Error;

/// System integration errors
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(String),
}

pub type Result<T> = std::result::Result<T, IntegrationError>;
