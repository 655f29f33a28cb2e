//! Ranker error types.
//!
//! Nothing in this taxonomy escapes the engine as a fatal error: model
//! failures fall back to rule-based scoring at the call site, and bad
//! inputs are clamped rather than rejected.

use thiserror::Error;

pub type RankerResult<T> = Result<T, RankerError>;

#[derive(Debug, Error)]
pub enum RankerError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Model scoring failed: {0}")]
    ModelScore(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RankerError {
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    pub fn model_score(msg: impl Into<String>) -> Self {
        Self::ModelScore(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Check if this is a per-call scoring failure.
    ///
    /// Scoring failures are absorbed by the rule-based fallback; the engine
    /// stays in model mode and the tick continues.
    pub fn is_scoring_failure(&self) -> bool {
        matches!(self, RankerError::ModelScore(_))
    }
}
