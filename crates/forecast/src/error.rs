//! Forecast error model.

use thiserror::Error;

/// Result type used across the forecasting pipeline.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Failures surfaced by the forecasting pipeline.
///
/// The pipeline itself is total over valid inputs; errors come from rejected
/// configuration or from collaborators that supply the snapshots.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Forecast configuration was rejected (e.g. negative safety stock).
    #[error("invalid forecast configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot source could not produce its inputs.
    #[error("snapshot source failed: {0}")]
    SnapshotFailed(String),
}

impl ForecastError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn snapshot_failed(msg: impl Into<String>) -> Self {
        Self::SnapshotFailed(msg.into())
    }
}


