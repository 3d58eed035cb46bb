//! Fire behaviour derivation
//!
//! [`FireBehaviorEngine`] turns a rate-of-spread estimate and a site's
//! environmental features into a [`FireBehaviorReport`] and a
//! [`ThreatAssessment`]. Each call is a fixed sequence of closed-form steps:
//!
//! 1. terrain adjustment of the base spread rate (slope and aspect)
//! 2. fuel load and fuel moisture from the vegetation indices
//! 3. Byram fireline intensity and flame length
//! 4. severity, crown fire, spotting and containment classification
//! 5. damage and burn-time estimates over the reference window
//! 6. occurrence probability, expected threat and the overall assessment
//!
//! The engine holds only its configuration, so it is `Send + Sync` and the
//! same inputs always give bit-identical outputs.

use crate::assessment::containment::{assess_containment_difficulty, ContainmentDifficulty};
use crate::assessment::damage::{estimate_damage, time_to_burn_area_hours};
use crate::assessment::severity::{classify_severity, severity_index, SeverityClass};
use crate::assessment::threat::{
    build_threat_assessment, expected_threat, occurrence_probability, ThreatAssessment,
};
use crate::config::EngineConfig;
use crate::core_types::features::{EnvironmentalFeatures, ResolvedFeatures};
use crate::error::ConfigError;
use crate::physics::albini_spotting::compute_spotting_distance;
use crate::physics::byram::{compute_flame_length, compute_intensity};
use crate::physics::crown_fire::{compute_crown_fire_score, CrownFireClass};
use crate::physics::fuel::{fuel_load_from_ndvi, fuel_moisture_pct};
use crate::physics::bounded;
use crate::physics::terrain_physics::TerrainAdjustment;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ceiling on the base rate of spread (m/min). The fastest measured grassfire
/// runs are a few hundred m/min; anything above this is taken as the ceiling
/// so every derived quantity stays finite.
pub const MAX_RATE_OF_SPREAD_M_PER_MIN: f64 = 1000.0;

/// Derived fire behaviour for one site
///
/// Every numeric field is finite and non-negative. Field names are the JSON keys the
/// dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBehaviorReport {
    /// Rate of spread as supplied, before terrain adjustment (m/min)
    pub ros_base_m_per_min: f64,
    /// Rate of spread after slope and aspect adjustment (m/min)
    pub ros_effective_m_per_min: f64,
    pub slope_multiplier: f64,
    pub aspect_factor: f64,
    pub fuel_load_kg_m2: f64,
    pub fuel_moisture_pct: f64,
    #[serde(rename = "intensity_kW_per_m")]
    pub intensity_kw_per_m: f64,
    pub flame_length_m: f64,
    pub severity_index: f64,
    pub severity_class: SeverityClass,
    pub crown_fire_score: f64,
    pub crown_fire_class: CrownFireClass,
    pub spotting_distance_km: f64,
    /// Hours to burn the reference window; `None` when the fire does not spread
    pub time_to_burn_hours: Option<f64>,
    pub damage_estimate_rs: f64,
    pub containment_difficulty: ContainmentDifficulty,
    pub occurrence_probability: f64,
    pub expected_threat: f64,
}

/// Everything the engine derives for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBehaviorEvaluation {
    /// Inputs after defaults and clamping
    pub features: ResolvedFeatures,
    pub fire_behavior: FireBehaviorReport,
    pub threat_assessment: ThreatAssessment,
}

/// Stateless fire behaviour and threat derivation
#[derive(Debug, Clone, Default)]
pub struct FireBehaviorEngine {
    config: EngineConfig,
}

impl FireBehaviorEngine {
    /// Create an engine after validating `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidCoefficient`] if any coefficient fails
    /// [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive the fire behaviour report from resolved features and a base
    /// rate of spread (m/min). Negative or NaN spread rates count as no spread;
    /// rates above [`MAX_RATE_OF_SPREAD_M_PER_MIN`], infinity included, are
    /// capped at the ceiling.
    pub fn derive(&self, features: &ResolvedFeatures, ros_m_per_min: f64) -> FireBehaviorReport {
        let cfg = &self.config;
        let ros_base = bounded(ros_m_per_min, 0.0, MAX_RATE_OF_SPREAD_M_PER_MIN);

        let terrain = TerrainAdjustment::for_site(
            *features.slope_deg,
            *features.aspect_deg,
            &cfg.terrain,
        );
        let ros_effective = terrain.effective_ros(ros_base);

        let fuel_load = fuel_load_from_ndvi(features.ndvi, &cfg.fuel);
        let fuel_moisture = fuel_moisture_pct(
            *features.temp_c,
            *features.rel_humidity_pct,
            *features.precip_mm,
            features.ndvi,
            features.ndmi,
            &cfg.fuel,
        );

        let intensity =
            compute_intensity(ros_effective, fuel_load, cfg.fuel.heat_of_combustion_kj_per_kg);
        let flame_length = compute_flame_length(intensity);
        let severity_class = classify_severity(flame_length);
        let severity_idx = severity_index(flame_length);

        let crown_fire_score = compute_crown_fire_score(
            *features.wind_speed_ms,
            features.ndvi,
            *features.rel_humidity_pct,
            &cfg.crown_fire,
        );
        let spotting_distance =
            compute_spotting_distance(*features.wind_speed_ms, flame_length, &cfg.spotting);

        let time_to_burn = time_to_burn_area_hours(ros_effective, cfg.damage.window_area_ha);
        let damage = estimate_damage(
            severity_class,
            cfg.damage.window_area_ha,
            cfg.damage.cost_per_ha_rs,
            &cfg.damage.severity_factors,
        );
        let containment = assess_containment_difficulty(
            ros_effective,
            *features.slope_deg,
            crown_fire_score,
            &cfg.containment,
        );

        let occurrence = occurrence_probability(severity_idx, crown_fire_score);
        let expected = expected_threat(occurrence, severity_idx);

        debug!(
            ros_base,
            ros_effective,
            intensity,
            flame_length,
            ?severity_class,
            crown_fire_score,
            spotting_distance,
            "derived fire behaviour"
        );

        FireBehaviorReport {
            ros_base_m_per_min: ros_base,
            ros_effective_m_per_min: ros_effective,
            slope_multiplier: terrain.slope_multiplier,
            aspect_factor: terrain.aspect_factor,
            fuel_load_kg_m2: fuel_load,
            fuel_moisture_pct: fuel_moisture,
            intensity_kw_per_m: intensity,
            flame_length_m: flame_length,
            severity_index: severity_idx,
            severity_class,
            crown_fire_score,
            crown_fire_class: CrownFireClass::from_score(crown_fire_score),
            spotting_distance_km: spotting_distance,
            time_to_burn_hours: time_to_burn,
            damage_estimate_rs: damage,
            containment_difficulty: containment,
            occurrence_probability: occurrence,
            expected_threat: expected,
        }
    }

    /// Build the threat assessment for a derived report.
    pub fn assess(&self, report: &FireBehaviorReport, lightning_detected: bool) -> ThreatAssessment {
        build_threat_assessment(report, lightning_detected, &self.config.threat)
    }

    /// Resolve raw features, derive the report and assess it in one call.
    pub fn evaluate(
        &self,
        features: &EnvironmentalFeatures,
        ros_m_per_min: f64,
    ) -> FireBehaviorEvaluation {
        let resolved = features.resolve(&self.config.defaults);
        self.evaluate_resolved(resolved, ros_m_per_min)
    }

    /// Same as [`evaluate`](Self::evaluate) for features that are already resolved.
    pub fn evaluate_resolved(
        &self,
        features: ResolvedFeatures,
        ros_m_per_min: f64,
    ) -> FireBehaviorEvaluation {
        let fire_behavior = self.derive(&features, ros_m_per_min);
        let threat_assessment = self.assess(&fire_behavior, features.lightning_detected());
        FireBehaviorEvaluation {
            features,
            fire_behavior,
            threat_assessment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::threat::ThreatLevel;

    fn reference_features() -> EnvironmentalFeatures {
        EnvironmentalFeatures::new(30.0, 45.0, 0.7)
            .with_ndvi(0.395)
            .with_terrain(55.0, 0.0, 180.0)
    }

    #[test]
    fn test_reference_site() {
        let engine = FireBehaviorEngine::default();
        let evaluation = engine.evaluate(&reference_features(), 3.32);
        let report = &evaluation.fire_behavior;

        assert!((report.fuel_load_kg_m2 - 0.6004).abs() < 1e-9);
        assert!((report.intensity_kw_per_m - 598.0).abs() < 1.0);
        assert!((report.flame_length_m - 1.47).abs() < 0.01);
        assert_eq!(report.severity_class, SeverityClass::Moderate);
        assert_eq!(report.crown_fire_class, CrownFireClass::Low);
        assert_eq!(report.containment_difficulty, ContainmentDifficulty::Easy);
        assert!((report.damage_estimate_rs - 7_500_000.0).abs() < 1e-6);
        assert_eq!(evaluation.threat_assessment.threat_level, ThreatLevel::Moderate);
    }

    #[test]
    fn test_zero_spread_has_no_burn_time() {
        let engine = FireBehaviorEngine::default();
        let resolved = reference_features().resolve(&engine.config().defaults);
        let report = engine.derive(&resolved, 0.0);

        assert_eq!(report.intensity_kw_per_m, 0.0);
        assert_eq!(report.flame_length_m, 0.0);
        assert_eq!(report.severity_class, SeverityClass::Low);
        assert_eq!(report.time_to_burn_hours, None);
    }

    #[test]
    fn test_negative_spread_treated_as_zero() {
        let engine = FireBehaviorEngine::default();
        let resolved = reference_features().resolve(&engine.config().defaults);
        assert_eq!(engine.derive(&resolved, -5.0), engine.derive(&resolved, 0.0));
    }

    #[test]
    fn test_runaway_spread_is_capped() {
        let engine = FireBehaviorEngine::default();
        let resolved = reference_features().resolve(&engine.config().defaults);
        let ceiling = engine.derive(&resolved, MAX_RATE_OF_SPREAD_M_PER_MIN);

        for ros in [1e306, f64::MAX, f64::INFINITY] {
            let report = engine.derive(&resolved, ros);
            assert_eq!(report, ceiling);
            assert!(report.intensity_kw_per_m.is_finite());
            assert!(report.spotting_distance_km.is_finite());
        }
    }

    #[test]
    fn test_upslope_increases_effective_spread() {
        let engine = FireBehaviorEngine::default();
        let flat = engine.evaluate(&reference_features(), 3.32).fire_behavior;
        let steep = engine
            .evaluate(&reference_features().with_terrain(55.0, 25.0, 180.0), 3.32)
            .fire_behavior;

        assert!(steep.slope_multiplier > 1.0);
        assert!(steep.ros_effective_m_per_min > flat.ros_effective_m_per_min);
        assert!(steep.intensity_kw_per_m > flat.intensity_kw_per_m);
        assert_eq!(steep.ros_base_m_per_min, flat.ros_base_m_per_min);
    }

    #[test]
    fn test_report_json_field_names() {
        let engine = FireBehaviorEngine::default();
        let report = engine.evaluate(&reference_features(), 3.32).fire_behavior;
        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("intensity_kW_per_m").is_some());
        assert!(value.get("intensity_kw_per_m").is_none());
        assert_eq!(value["severity_class"], "Moderate");

        let stalled = engine.evaluate(&reference_features(), 0.0).fire_behavior;
        let value = serde_json::to_value(&stalled).unwrap();
        assert!(value["time_to_burn_hours"].is_null());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.spotting.ember_mass_kg = 0.0;
        assert!(FireBehaviorEngine::new(config).is_err());
    }
}
