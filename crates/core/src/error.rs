//! Error types for the configuration, model and pipeline boundaries.
//!
//! The derivation engine itself never fails: out-of-range inputs are clamped
//! and missing optional inputs fall back to defaults. Errors only come from
//! loading or validating coefficients and models.

use std::path::PathBuf;
use thiserror::Error;

/// Problems loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A coefficient is outside the range its formula accepts.
    #[error("invalid coefficient `{name}` = {value}: {reason}")]
    InvalidCoefficient {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems loading or evaluating an inference model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model references a feature column the feature record does not provide.
    #[error("unknown feature column `{0}`")]
    UnknownFeature(String),

    #[error("model has {columns} feature columns but {weights} weights")]
    ShapeMismatch { columns: usize, weights: usize },

    #[error("model parameter `{name}` is not finite")]
    NonFiniteParameter { name: String },

    #[error("model produced a non-finite prediction ({0})")]
    NonFiniteOutput(f64),

    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error returned by the pipeline.
#[derive(Debug, Error)]
pub enum ThreatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T, E = ThreatError> = std::result::Result<T, E>;
