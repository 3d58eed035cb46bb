//! Terrain-Based Fire Spread Adjustments
//!
//! Converts the model's flat-ground rate of spread into an effective rate
//! for the site's slope and aspect.
//!
//! # Scientific References
//!
//! - Rothermel, R.C. (1972). "A Mathematical Model for Predicting Fire Spread
//!   in Wildland Fuels." USDA Forest Service Research Paper INT-115.
//! - `McArthur`, A.G. (1967). "Fire Behaviour in Eucalypt Forests."
//!   Forestry and Timber Bureau Leaflet 107.

use super::{bounded, unit_interval};
use crate::config::TerrainConfig;
use serde::{Deserialize, Serialize};

/// Calculate slope effect on upslope fire spread
///
/// Rothermel's slope factor grows with tan²θ; for typical fuels this is close
/// to a 2x increase per 10° of slope, approximated here as
///
/// `φ_s` = 1 + 2 × (θ / 10)^1.5
///
/// The site is assumed to burn upslope (worst case), so the multiplier is
/// never below 1.
///
/// # Returns
/// Multiplier for fire spread rate, in `[1, max_multiplier]`
pub fn slope_multiplier(slope_deg: f64, max_multiplier: f64) -> f64 {
    let slope = bounded(slope_deg, 0.0, 90.0);
    (1.0 + (slope / 10.0).powf(1.5) * 2.0).min(max_multiplier.max(1.0))
}

/// Calculate aspect effect on fuel dryness and spread
///
/// Sun-facing slopes are drier and burn faster; shaded slopes the opposite.
/// The effect fades out on gentle slopes because flat ground has no aspect:
///
/// f = 1 + w × cos(aspect − sun_facing) × min(θ / θ_full, 1)
///
/// # Returns
/// Multiplier in `[1 − w, 1 + w]`; exactly 1 on flat ground
pub fn aspect_factor(aspect_deg: f64, slope_deg: f64, config: &TerrainConfig) -> f64 {
    if !aspect_deg.is_finite() {
        return 1.0;
    }
    let steepness = unit_interval(slope_deg / config.aspect_full_effect_slope_deg);
    let alignment = (aspect_deg - config.sun_facing_aspect_deg).to_radians().cos();
    1.0 + config.aspect_weight * alignment * steepness
}

/// Combined slope and aspect adjustment for one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainAdjustment {
    pub slope_multiplier: f64,
    pub aspect_factor: f64,
}

impl TerrainAdjustment {
    pub fn for_site(slope_deg: f64, aspect_deg: f64, config: &TerrainConfig) -> Self {
        Self {
            slope_multiplier: slope_multiplier(slope_deg, config.max_slope_multiplier),
            aspect_factor: aspect_factor(aspect_deg, slope_deg, config),
        }
    }

    /// Apply to a base rate of spread (m/min). Negative rates clamp to zero.
    pub fn effective_ros(&self, base_ros: f64) -> f64 {
        (base_ros * self.slope_multiplier * self.aspect_factor).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_is_neutral() {
        let config = TerrainConfig::default();
        let adjustment = TerrainAdjustment::for_site(0.0, 90.0, &config);
        assert_eq!(adjustment.slope_multiplier, 1.0);
        assert_eq!(adjustment.aspect_factor, 1.0);
        assert_eq!(adjustment.effective_ros(3.32), 3.32);
    }

    #[test]
    fn test_slope_roughly_triples_spread_at_10_degrees() {
        let multiplier = slope_multiplier(10.0, 10.0);
        assert!((multiplier - 3.0).abs() < 1e-9, "φ was {}", multiplier);
    }

    #[test]
    fn test_slope_multiplier_capped() {
        assert_eq!(slope_multiplier(60.0, 10.0), 10.0);
        assert_eq!(slope_multiplier(-20.0, 10.0), 1.0);
        assert_eq!(slope_multiplier(f64::NAN, 10.0), 1.0);
    }

    #[test]
    fn test_sun_facing_slope_burns_faster() {
        let config = TerrainConfig::default();
        let sunny = aspect_factor(180.0, 30.0, &config);
        let shaded = aspect_factor(0.0, 30.0, &config);
        assert!((sunny - 1.15).abs() < 1e-9);
        assert!((shaded - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_effect_scales_with_steepness() {
        let config = TerrainConfig::default();
        let gentle = aspect_factor(180.0, 6.0, &config);
        let steep = aspect_factor(180.0, 25.0, &config);
        assert!(gentle > 1.0 && steep > gentle);
    }

    #[test]
    fn test_negative_base_ros_clamps() {
        let config = TerrainConfig::default();
        let adjustment = TerrainAdjustment::for_site(15.0, 200.0, &config);
        assert_eq!(adjustment.effective_ros(-1.0), 0.0);
    }
}
