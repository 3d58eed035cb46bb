//! End-to-end threat prediction
//!
//! [`ThreatPipeline`] wires a rate-of-spread model, an optional ignition
//! model and the [`FireBehaviorEngine`] together: resolve the raw features,
//! predict the spread rate, score ignition risk, derive the report and assess
//! it. The pipeline is immutable after construction, so one instance can serve
//! any number of threads; [`ThreatPipeline::predict_batch`] uses rayon.

use crate::assessment::threat::ThreatAssessment;
use crate::core_types::features::{EnvironmentalFeatures, ResolvedFeatures};
use crate::error::{ModelError, Result};
use crate::inference::{IgnitionModel, IgnitionRisk, SpreadRateModel};
use crate::report::{FireBehaviorEngine, FireBehaviorReport};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Smallest rate of spread accepted from a model (m/min)
pub const MIN_PREDICTED_ROS_M_PER_MIN: f64 = 0.01;

/// Full prediction for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatPrediction {
    /// Inputs after defaults and clamping, including the derived VPD
    pub features: ResolvedFeatures,
    pub ros_prediction_m_per_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignition_risk: Option<IgnitionRisk>,
    pub fire_behavior: FireBehaviorReport,
    pub threat_assessment: ThreatAssessment,
}

/// Spread model, optional ignition model and derivation engine
pub struct ThreatPipeline {
    engine: FireBehaviorEngine,
    spread_model: Box<dyn SpreadRateModel>,
    ignition_model: Option<Box<dyn IgnitionModel>>,
}

impl ThreatPipeline {
    pub fn new(engine: FireBehaviorEngine, spread_model: Box<dyn SpreadRateModel>) -> Self {
        info!("Threat pipeline ready (spread model only)");
        Self {
            engine,
            spread_model,
            ignition_model: None,
        }
    }

    /// Attach an ignition classifier; its risk is reported alongside the threat.
    pub fn with_ignition_model(mut self, ignition_model: Box<dyn IgnitionModel>) -> Self {
        info!("Ignition model attached to threat pipeline");
        self.ignition_model = Some(ignition_model);
        self
    }

    pub fn engine(&self) -> &FireBehaviorEngine {
        &self.engine
    }

    /// Predict the spread rate for resolved features, floored at
    /// [`MIN_PREDICTED_ROS_M_PER_MIN`].
    ///
    /// # Errors
    /// Propagates the spread model's [`ModelError`], and returns
    /// [`ModelError::NonFiniteOutput`] for a NaN or infinite prediction.
    pub fn predict_ros(&self, features: &ResolvedFeatures) -> Result<f64, ModelError> {
        let raw = self.spread_model.predict_ros(features)?;
        if !raw.is_finite() {
            return Err(ModelError::NonFiniteOutput(raw));
        }
        if raw < MIN_PREDICTED_ROS_M_PER_MIN {
            warn!(
                raw,
                floor = MIN_PREDICTED_ROS_M_PER_MIN,
                "spread model predicted below floor, clamping"
            );
            return Ok(MIN_PREDICTED_ROS_M_PER_MIN);
        }
        Ok(raw)
    }

    /// Run the whole pipeline for one site.
    ///
    /// # Errors
    /// Returns [`ThreatError::Model`](crate::error::ThreatError::Model) if
    /// either model fails. The derivation itself cannot fail.
    pub fn predict(&self, features: &EnvironmentalFeatures) -> Result<ThreatPrediction> {
        let resolved = features.resolve(&self.engine.config().defaults);
        let ros = self.predict_ros(&resolved)?;

        let ignition_risk = match &self.ignition_model {
            Some(model) => Some(IgnitionRisk::from_probability(
                model.predict_probability(&resolved)?,
            )),
            None => None,
        };

        let evaluation = self.engine.evaluate_resolved(resolved, ros);
        Ok(ThreatPrediction {
            features: evaluation.features,
            ros_prediction_m_per_min: ros,
            ignition_risk,
            fire_behavior: evaluation.fire_behavior,
            threat_assessment: evaluation.threat_assessment,
        })
    }

    /// Predict many sites in parallel. Results keep the input order and are
    /// identical to calling [`predict`](Self::predict) on each site in turn.
    pub fn predict_batch(&self, sites: &[EnvironmentalFeatures]) -> Vec<Result<ThreatPrediction>> {
        info!(sites = sites.len(), "Running batch threat prediction");
        sites.par_iter().map(|site| self.predict(site)).collect()
    }
}
