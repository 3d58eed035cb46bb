//! Inference boundary
//!
//! The rate-of-spread regressor and the ignition classifier are trained
//! elsewhere. The engine only sees them through [`SpreadRateModel`] and
//! [`IgnitionModel`]. [`LinearModel`] is a small serialisable implementation
//! of both: a weighted sum over named feature columns with an optional
//! logistic link, loaded from JSON.
//!
//! ```json
//! {
//!   "feature_columns": ["wind_speed_ms", "vpd_kpa", "ndvi"],
//!   "weights": [0.42, 1.1, 2.3],
//!   "intercept": 0.5,
//!   "link": "identity"
//! }
//! ```

use crate::core_types::features::{ResolvedFeatures, FEATURE_COLUMNS};
use crate::error::ModelError;
use crate::physics::unit_interval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Predicts a base rate of spread (m/min) for a site
pub trait SpreadRateModel: Send + Sync {
    /// # Errors
    /// Implementations return [`ModelError`] when the features cannot be
    /// evaluated or the prediction is not a finite number.
    fn predict_ros(&self, features: &ResolvedFeatures) -> Result<f64, ModelError>;
}

/// Predicts the probability (0-1) that a fire ignites at a site
pub trait IgnitionModel: Send + Sync {
    /// # Errors
    /// Implementations return [`ModelError`] when the features cannot be
    /// evaluated or the prediction is not a finite number.
    fn predict_probability(&self, features: &ResolvedFeatures) -> Result<f64, ModelError>;
}

/// Output transform applied to the linear predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

/// y = link(intercept + Σ wᵢ·xᵢ)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_columns: Vec<String>,
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub link: Link,
}

impl LinearModel {
    /// Build and validate a model.
    ///
    /// # Errors
    /// See [`LinearModel::validate`].
    pub fn new(
        feature_columns: Vec<String>,
        weights: Vec<f64>,
        intercept: f64,
        link: Link,
    ) -> Result<Self, ModelError> {
        let model = Self {
            feature_columns,
            weights,
            intercept,
            link,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a JSON model.
    ///
    /// # Errors
    /// Returns [`ModelError::Json`] for malformed JSON, otherwise the errors of
    /// [`LinearModel::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a JSON model file.
    ///
    /// # Errors
    /// Returns [`ModelError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LinearModel::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Check shape, column names and parameter finiteness.
    ///
    /// # Errors
    /// - [`ModelError::ShapeMismatch`] if columns and weights differ in length
    /// - [`ModelError::UnknownFeature`] for a column no feature record provides
    /// - [`ModelError::NonFiniteParameter`] for a NaN or infinite weight or intercept
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.feature_columns.len() != self.weights.len() {
            return Err(ModelError::ShapeMismatch {
                columns: self.feature_columns.len(),
                weights: self.weights.len(),
            });
        }
        if let Some(unknown) = self
            .feature_columns
            .iter()
            .find(|name| !FEATURE_COLUMNS.contains(&name.as_str()))
        {
            return Err(ModelError::UnknownFeature(unknown.clone()));
        }
        if let Some((name, _)) = self
            .feature_columns
            .iter()
            .zip(&self.weights)
            .find(|(_, weight)| !weight.is_finite())
        {
            return Err(ModelError::NonFiniteParameter { name: name.clone() });
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::NonFiniteParameter {
                name: "intercept".to_string(),
            });
        }
        Ok(())
    }

    /// Evaluate the model on one feature record.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownFeature`] if a column is missing and
    /// [`ModelError::NonFiniteOutput`] if the result is NaN or infinite.
    pub fn predict(&self, features: &ResolvedFeatures) -> Result<f64, ModelError> {
        let mut eta = self.intercept;
        for (name, weight) in self.feature_columns.iter().zip(&self.weights) {
            let value = features
                .column(name)
                .ok_or_else(|| ModelError::UnknownFeature(name.clone()))?;
            eta += weight * value;
        }

        let output = match self.link {
            Link::Identity => eta,
            Link::Logistic => 1.0 / (1.0 + (-eta).exp()),
        };
        if output.is_finite() {
            Ok(output)
        } else {
            Err(ModelError::NonFiniteOutput(output))
        }
    }
}

impl SpreadRateModel for LinearModel {
    fn predict_ros(&self, features: &ResolvedFeatures) -> Result<f64, ModelError> {
        self.predict(features)
    }
}

impl IgnitionModel for LinearModel {
    fn predict_probability(&self, features: &ResolvedFeatures) -> Result<f64, ModelError> {
        self.predict(features).map(unit_interval)
    }
}

/// Five-band ignition risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl RiskLevel {
    const BANDS: [RiskLevel; 5] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::VeryHigh,
        RiskLevel::Extreme,
    ];

    /// Equal-width bands of 0.2 over the probability
    pub fn from_probability(probability: f64) -> Self {
        // Value is in [0, 5]; truncation is the band index
        let index = (unit_interval(probability) * 5.0).floor() as usize;
        Self::BANDS[index.min(Self::BANDS.len() - 1)]
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ignition classifier output as reported to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionRisk {
    pub probability: f64,
    /// Probability as a percentage, rounded to two decimals
    pub fire_risk_percentage: f64,
    pub risk_level: RiskLevel,
    /// The classifier's hard decision: fire only when the probability is
    /// strictly above 0.5
    pub fire_expected: bool,
}

impl IgnitionRisk {
    pub fn from_probability(probability: f64) -> Self {
        let probability = unit_interval(probability);
        Self {
            probability,
            fire_risk_percentage: (probability * 10_000.0).round() / 100.0,
            risk_level: RiskLevel::from_probability(probability),
            fire_expected: probability > 0.5,
        }
    }
}
