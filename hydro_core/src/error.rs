use thiserror::Error;

use crate::measurement::MeasurementKey;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HydroError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("reading source error: {0}")]
    Source(String),
    #[error("series for {0} has no points")]
    EmptySeries(MeasurementKey),
}

impl HydroError {
    pub(crate) fn no_range(key: MeasurementKey) -> Self {
        Self::Configuration(format!("no ideal range registered for {key}"))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
