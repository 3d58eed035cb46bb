//! Engine configuration
//!
//! Every empirical coefficient used by the derivation engine lives here so it
//! can be tuned from a JSON file instead of being baked into the formulas.
//! The defaults reproduce the reference threat report; none of them should be
//! read as carrying more authority than "calibrated to look plausible".
//!
//! Missing keys in a JSON file fall back to the defaults (`#[serde(default)]`
//! on every section), so a config file only needs the values it overrides:
//!
//! ```
//! use wildfire_threat_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "damage": { "cost_per_ha_rs": 80000.0 } }"#).unwrap();
//! assert_eq!(config.damage.cost_per_ha_rs, 80000.0);
//! assert_eq!(config.fuel.heat_of_combustion_kj_per_kg, 18000.0);
//! ```

use crate::assessment::threat::ThreatLevel;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for [`FireBehaviorEngine`](crate::report::FireBehaviorEngine).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub defaults: FeatureDefaults,
    pub fuel: FuelConfig,
    pub terrain: TerrainConfig,
    pub crown_fire: CrownFireConfig,
    pub spotting: SpottingConfig,
    pub damage: DamageConfig,
    pub containment: ContainmentConfig,
    pub threat: ThreatConfig,
}

/// Fallback values for inputs that are missing or NaN.
///
/// The vegetation and weather fallbacks match what the data layer substitutes
/// when a fetcher is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDefaults {
    pub temp_c: f64,
    pub rel_humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub precip_mm: f64,
    pub ndvi: f64,
    pub ndmi: f64,
    pub elevation_m: f64,
    pub slope_deg: f64,
    pub aspect_deg: f64,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            temp_c: 25.0,
            rel_humidity_pct: 50.0,
            wind_speed_ms: 5.0,
            precip_mm: 0.0,
            ndvi: 0.5,
            ndmi: 0.3,
            elevation_m: 0.0,
            slope_deg: 0.0,
            aspect_deg: 180.0,
        }
    }
}

/// Fuel bed coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Low heat of combustion H in Byram's equation (kJ/kg)
    pub heat_of_combustion_kj_per_kg: f64,
    /// Fuel load per unit NDVI (kg/m²)
    pub fuel_load_per_ndvi: f64,
    /// Floor for bare or sparsely vegetated ground (kg/m²)
    pub min_fuel_load_kg_m2: f64,
    /// Fuel moisture added per mm of 24 h precipitation (percentage points)
    pub rain_moisture_pct_per_mm: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            heat_of_combustion_kj_per_kg: 18000.0,
            fuel_load_per_ndvi: 1.52,
            min_fuel_load_kg_m2: 0.05,
            rain_moisture_pct_per_mm: 0.5,
        }
    }
}

/// Slope and aspect adjustments to the base spread rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cap on the slope multiplier
    pub max_slope_multiplier: f64,
    /// Peak +/- adjustment for sun-facing versus shaded slopes
    pub aspect_weight: f64,
    /// Aspect receiving the most solar drying (180° south in the northern hemisphere)
    pub sun_facing_aspect_deg: f64,
    /// Slope at which the aspect effect reaches full strength (degrees)
    pub aspect_full_effect_slope_deg: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            max_slope_multiplier: 10.0,
            aspect_weight: 0.15,
            sun_facing_aspect_deg: 180.0,
            aspect_full_effect_slope_deg: 30.0,
        }
    }
}

/// Weights of the crown-fire composite score.
///
/// `score = 100 × (wind_weight·w + canopy_weight·c + dryness_weight·d)` with each
/// term normalised into `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrownFireConfig {
    pub wind_weight: f64,
    pub canopy_weight: f64,
    pub dryness_weight: f64,
    /// Wind speed at which the wind term saturates (m/s)
    pub wind_saturation_ms: f64,
}

impl Default for CrownFireConfig {
    fn default() -> Self {
        Self {
            wind_weight: 0.45,
            canopy_weight: 0.35,
            dryness_weight: 0.20,
            wind_saturation_ms: 15.0,
        }
    }
}

/// Albini-style ember transport parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpottingConfig {
    /// Lofting height coefficient: `H = coefficient × I^exponent`
    pub lofting_coefficient: f64,
    pub lofting_exponent: f64,
    /// Power-law wind shear exponent (open terrain ≈ 0.15)
    pub wind_shear_exponent: f64,
    /// Height the input wind speed is measured at (m)
    pub reference_height_m: f64,
    /// Representative firebrand mass (kg)
    pub ember_mass_kg: f64,
    /// Representative firebrand diameter (m)
    pub ember_diameter_m: f64,
}

impl Default for SpottingConfig {
    fn default() -> Self {
        Self {
            lofting_coefficient: 6.1,
            lofting_exponent: 0.4,
            wind_shear_exponent: 0.15,
            reference_height_m: 10.0,
            ember_mass_kg: 0.0005,
            ember_diameter_m: 0.025,
        }
    }
}

/// Fraction of asset value lost in each severity band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityFactors {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
    pub extreme: f64,
}

impl Default for SeverityFactors {
    fn default() -> Self {
        Self {
            low: 0.10,
            moderate: 0.30,
            high: 0.60,
            very_high: 0.85,
            extreme: 1.00,
        }
    }
}

/// Monetary damage model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Reference burn window (hectares); 500 ha = 5 km²
    pub window_area_ha: f64,
    /// Asset value per hectare (Rs)
    pub cost_per_ha_rs: f64,
    pub severity_factors: SeverityFactors,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            window_area_ha: 500.0,
            cost_per_ha_rs: 50000.0,
            severity_factors: SeverityFactors::default(),
        }
    }
}

/// Weights of the containment-difficulty composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainmentConfig {
    pub ros_weight: f64,
    /// Spread rate at which the ROS term saturates (m/min)
    pub ros_reference_m_per_min: f64,
    pub slope_weight: f64,
    /// Slope at which the slope term saturates (degrees)
    pub slope_reference_deg: f64,
    pub crown_weight: f64,
}

impl Default for ContainmentConfig {
    fn default() -> Self {
        Self {
            ros_weight: 0.5,
            ros_reference_m_per_min: 20.0,
            slope_weight: 0.2,
            slope_reference_deg: 45.0,
            crown_weight: 0.3,
        }
    }
}

/// Thresholds that turn report values into key concerns and threat levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Crown-fire score above which crowning is flagged
    pub crown_concern_score: f64,
    /// Spotting distance above which long-range spotting is flagged (km)
    pub spotting_concern_km: f64,
    /// Effective spread rate above which spread is flagged as rapid (m/min)
    pub rapid_spread_m_per_min: f64,
    /// Minimum threat level when lightning was detected in the last 24 h
    pub lightning_floor: ThreatLevel,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            crown_concern_score: 60.0,
            spotting_concern_km: 2.0,
            rapid_spread_m_per_min: 10.0,
            lightning_floor: ThreatLevel::Moderate,
        }
    }
}

/// Reject anything that is not a finite number strictly above zero.
fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must be finite and not negative",
        })
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] for malformed JSON and
    /// [`ConfigError::InvalidCoefficient`] if any coefficient fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Override the damage model's asset value per hectare.
    pub fn with_cost_per_ha(mut self, cost_per_ha_rs: f64) -> Self {
        self.damage.cost_per_ha_rs = cost_per_ha_rs;
        self
    }

    /// Override the reference burn window.
    pub fn with_window_area_ha(mut self, window_area_ha: f64) -> Self {
        self.damage.window_area_ha = window_area_ha;
        self
    }

    /// Override the lightning threat floor.
    pub fn with_lightning_floor(mut self, level: ThreatLevel) -> Self {
        self.threat.lightning_floor = level;
        self
    }

    /// Check every coefficient against the domain its formula needs.
    ///
    /// # Errors
    /// Returns the first [`ConfigError::InvalidCoefficient`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.defaults;
        if !(0.0..=100.0).contains(&d.rel_humidity_pct) {
            return Err(ConfigError::InvalidCoefficient {
                name: "defaults.rel_humidity_pct",
                value: d.rel_humidity_pct,
                reason: "must lie in [0, 100]",
            });
        }
        for (name, value) in [("defaults.ndvi", d.ndvi), ("defaults.ndmi", d.ndmi)] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidCoefficient {
                    name,
                    value,
                    reason: "must lie in [-1, 1]",
                });
            }
        }
        if !d.temp_c.is_finite() || !d.elevation_m.is_finite() || !d.aspect_deg.is_finite() {
            return Err(ConfigError::InvalidCoefficient {
                name: "defaults",
                value: f64::NAN,
                reason: "temperature, elevation and aspect defaults must be finite",
            });
        }
        require_non_negative("defaults.wind_speed_ms", d.wind_speed_ms)?;
        require_non_negative("defaults.precip_mm", d.precip_mm)?;
        require_non_negative("defaults.slope_deg", d.slope_deg)?;

        let f = &self.fuel;
        require_positive("fuel.heat_of_combustion_kj_per_kg", f.heat_of_combustion_kj_per_kg)?;
        require_non_negative("fuel.fuel_load_per_ndvi", f.fuel_load_per_ndvi)?;
        require_non_negative("fuel.min_fuel_load_kg_m2", f.min_fuel_load_kg_m2)?;
        require_non_negative("fuel.rain_moisture_pct_per_mm", f.rain_moisture_pct_per_mm)?;

        let t = &self.terrain;
        if !(t.max_slope_multiplier.is_finite() && t.max_slope_multiplier >= 1.0) {
            return Err(ConfigError::InvalidCoefficient {
                name: "terrain.max_slope_multiplier",
                value: t.max_slope_multiplier,
                reason: "must be finite and at least 1",
            });
        }
        if !(0.0..1.0).contains(&t.aspect_weight) {
            return Err(ConfigError::InvalidCoefficient {
                name: "terrain.aspect_weight",
                value: t.aspect_weight,
                reason: "must lie in [0, 1) so the aspect factor stays positive",
            });
        }
        require_positive("terrain.aspect_full_effect_slope_deg", t.aspect_full_effect_slope_deg)?;
        if !t.sun_facing_aspect_deg.is_finite() {
            return Err(ConfigError::InvalidCoefficient {
                name: "terrain.sun_facing_aspect_deg",
                value: t.sun_facing_aspect_deg,
                reason: "must be finite",
            });
        }

        let c = &self.crown_fire;
        require_non_negative("crown_fire.wind_weight", c.wind_weight)?;
        require_non_negative("crown_fire.canopy_weight", c.canopy_weight)?;
        require_non_negative("crown_fire.dryness_weight", c.dryness_weight)?;
        require_positive("crown_fire.wind_saturation_ms", c.wind_saturation_ms)?;

        let s = &self.spotting;
        require_positive("spotting.lofting_coefficient", s.lofting_coefficient)?;
        require_positive("spotting.lofting_exponent", s.lofting_exponent)?;
        require_non_negative("spotting.wind_shear_exponent", s.wind_shear_exponent)?;
        require_positive("spotting.reference_height_m", s.reference_height_m)?;
        require_positive("spotting.ember_mass_kg", s.ember_mass_kg)?;
        require_positive("spotting.ember_diameter_m", s.ember_diameter_m)?;

        let dm = &self.damage;
        require_non_negative("damage.window_area_ha", dm.window_area_ha)?;
        require_non_negative("damage.cost_per_ha_rs", dm.cost_per_ha_rs)?;
        let sf = &dm.severity_factors;
        let factors = [sf.low, sf.moderate, sf.high, sf.very_high, sf.extreme];
        for value in factors {
            require_non_negative("damage.severity_factors", value)?;
        }
        if factors.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::InvalidCoefficient {
                name: "damage.severity_factors",
                value: f64::NAN,
                reason: "must not decrease from low to extreme",
            });
        }
        let worst_case = dm.window_area_ha * dm.cost_per_ha_rs * sf.extreme;
        if !worst_case.is_finite() {
            return Err(ConfigError::InvalidCoefficient {
                name: "damage",
                value: worst_case,
                reason: "window area times cost per hectare must stay finite",
            });
        }

        let ct = &self.containment;
        require_non_negative("containment.ros_weight", ct.ros_weight)?;
        require_positive("containment.ros_reference_m_per_min", ct.ros_reference_m_per_min)?;
        require_non_negative("containment.slope_weight", ct.slope_weight)?;
        require_positive("containment.slope_reference_deg", ct.slope_reference_deg)?;
        require_non_negative("containment.crown_weight", ct.crown_weight)?;

        let th = &self.threat;
        require_non_negative("threat.crown_concern_score", th.crown_concern_score)?;
        require_non_negative("threat.spotting_concern_km", th.spotting_concern_km)?;
        require_non_negative("threat.rapid_spread_m_per_min", th.rapid_spread_m_per_min)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{ "crown_fire": { "wind_weight": 0.6 } }"#).unwrap();
        assert_eq!(config.crown_fire.wind_weight, 0.6);
        assert_eq!(config.crown_fire.canopy_weight, 0.35);
        assert_eq!(config.spotting, SpottingConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default()
            .with_cost_per_ha(75000.0)
            .with_lightning_floor(ThreatLevel::High);
        let json = serde_json::to_string(&config).unwrap();
        let back = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_zero_heat_of_combustion() {
        let err = EngineConfig::from_json_str(
            r#"{ "fuel": { "heat_of_combustion_kj_per_kg": 0.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCoefficient {
                name: "fuel.heat_of_combustion_kj_per_kg",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_decreasing_severity_factors() {
        let mut config = EngineConfig::default();
        config.damage.severity_factors.high = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_default_ndvi() {
        let mut config = EngineConfig::default();
        config.defaults.ndvi = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_sun_facing_aspect() {
        let mut config = EngineConfig::default();
        config.terrain.sun_facing_aspect_deg = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCoefficient { name: "terrain.sun_facing_aspect_deg", .. }
        ));
    }

    #[test]
    fn test_rejects_overflowing_damage_window() {
        let config = EngineConfig::default()
            .with_window_area_ha(1e200)
            .with_cost_per_ha(1e200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/threat-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
