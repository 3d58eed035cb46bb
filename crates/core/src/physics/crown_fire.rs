//! Crown Fire Potential
//!
//! A composite 0-100 score for how likely a surface fire is to transition
//! into the canopy. Full Van Wagner (1977) initiation needs crown base height
//! and foliar moisture, which are not observable from the satellite indices
//! the data layer provides, so the score combines the three drivers that are:
//! - Wind speed (flame tilt and convective heating of the canopy)
//! - Canopy density, proxied by NDVI
//! - Atmospheric dryness (1 − RH)
//!
//! # Scientific References
//! - Van Wagner, C.E. (1977). "Conditions for the start and spread of crown fire"
//!   Canadian Journal of Forest Research, 7(1), 23-34
//! - Cruz, M.G., Alexander, M.E. (2010). "Assessing crown fire potential in coniferous forests"
//!   Forest Ecology and Management, 259(3), 562-570

use super::{bounded, unit_interval};
use crate::config::CrownFireConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crown fire score band boundaries (lower bound inclusive)
pub mod crown_score_ranges {
    use std::ops::{Range, RangeFrom};

    /// Surface fire expected `[0, 30)`
    pub const LOW: Range<f64> = 0.0..30.0;

    /// Isolated torching possible `[30, 60)`
    pub const MODERATE: Range<f64> = 30.0..60.0;

    /// Passive crowning likely `[60, 80)`
    pub const HIGH: Range<f64> = 60.0..80.0;

    /// Active crown fire `[80, 100]`
    pub const EXTREME: RangeFrom<f64> = 80.0..;
}

/// Crown fire potential classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrownFireClass {
    Low,
    Moderate,
    High,
    Extreme,
}

impl CrownFireClass {
    /// Classify a crown fire score; anything below the moderate band is `Low`.
    pub fn from_score(score: f64) -> Self {
        if crown_score_ranges::EXTREME.contains(&score) {
            CrownFireClass::Extreme
        } else if crown_score_ranges::HIGH.contains(&score) {
            CrownFireClass::High
        } else if crown_score_ranges::MODERATE.contains(&score) {
            CrownFireClass::Moderate
        } else {
            CrownFireClass::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CrownFireClass::Low => "Low",
            CrownFireClass::Moderate => "Moderate",
            CrownFireClass::High => "High",
            CrownFireClass::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for CrownFireClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calculate the crown fire composite score
///
/// score = 100 × (a × min(U / U_sat, 1) + b × clamp(NDVI) + c × (1 − RH/100))
///
/// # Arguments
/// * `wind_speed` - 10 m wind speed (m/s)
/// * `canopy_density_proxy` - NDVI, used as canopy density (clamped to 0-1)
/// * `humidity` - Relative humidity (%)
///
/// # Returns
/// Score in `[0, 100]` for every input, including infinities and NaN
pub fn compute_crown_fire_score(
    wind_speed: f64,
    canopy_density_proxy: f64,
    humidity: f64,
    config: &CrownFireConfig,
) -> f64 {
    let wind_term = unit_interval(wind_speed / config.wind_saturation_ms);
    let canopy_term = unit_interval(canopy_density_proxy);
    // NaN humidity gives a NaN dryness, which unit_interval maps to "not dry"
    let dryness_term = unit_interval(1.0 - humidity / 100.0);

    let composite = config.wind_weight * wind_term
        + config.canopy_weight * canopy_term
        + config.dryness_weight * dryness_term;

    bounded(100.0 * composite, 0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_case_score() {
        let config = CrownFireConfig::default();
        // 0.45 × 0.7/15 + 0.35 × 0.395 + 0.20 × 0.55 = 0.26925
        let score = compute_crown_fire_score(0.7, 0.395, 45.0, &config);
        assert!((score - 26.925).abs() < 1e-6, "score was {}", score);
        assert_eq!(CrownFireClass::from_score(score), CrownFireClass::Low);
    }

    #[test]
    fn test_score_clamped_for_extreme_inputs() {
        let config = CrownFireConfig::default();
        let cases = [
            (f64::INFINITY, 5.0, -400.0),
            (-50.0, -3.0, 900.0),
            (f64::NAN, f64::NAN, f64::NAN),
            (1e300, 1e300, -1e300),
            (f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        ];
        for (wind, ndvi, rh) in cases {
            let score = compute_crown_fire_score(wind, ndvi, rh, &config);
            assert!(
                (0.0..=100.0).contains(&score),
                "score {} out of range for ({}, {}, {})",
                score,
                wind,
                ndvi,
                rh
            );
        }
    }

    #[test]
    fn test_worst_case_hits_ceiling() {
        let config = CrownFireConfig::default();
        let score = compute_crown_fire_score(25.0, 0.9, 5.0, &config);
        assert!(score > 80.0);
        assert_eq!(CrownFireClass::from_score(score), CrownFireClass::Extreme);
    }

    #[test]
    fn test_overweighted_config_still_clamped() {
        let config = CrownFireConfig {
            wind_weight: 2.0,
            canopy_weight: 2.0,
            dryness_weight: 2.0,
            wind_saturation_ms: 15.0,
        };
        assert_eq!(compute_crown_fire_score(20.0, 1.0, 0.0, &config), 100.0);
    }

    #[test]
    fn test_class_boundaries_lower_inclusive() {
        assert_eq!(CrownFireClass::from_score(29.999), CrownFireClass::Low);
        assert_eq!(CrownFireClass::from_score(30.0), CrownFireClass::Moderate);
        assert_eq!(CrownFireClass::from_score(60.0), CrownFireClass::High);
        assert_eq!(CrownFireClass::from_score(80.0), CrownFireClass::Extreme);
        assert_eq!(CrownFireClass::from_score(-10.0), CrownFireClass::Low);
        assert_eq!(CrownFireClass::from_score(f64::NAN), CrownFireClass::Low);
    }

    #[test]
    fn test_classes_are_ordered() {
        assert!(CrownFireClass::Low < CrownFireClass::Moderate);
        assert!(CrownFireClass::High < CrownFireClass::Extreme);
    }
}
