//! Containment difficulty
//!
//! How hard the fire would be to hold, from a weighted composite of spread
//! rate, terrain steepness and crowning potential.

use crate::config::ContainmentConfig;
use crate::physics::unit_interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite band boundaries (lower bound inclusive)
pub mod containment_ranges {
    use std::ops::{Range, RangeFrom};

    pub const EASY: Range<f64> = 0.0..0.25;
    pub const MODERATE: Range<f64> = 0.25..0.5;
    pub const DIFFICULT: Range<f64> = 0.5..0.75;
    pub const EXTREME: RangeFrom<f64> = 0.75..;
}

/// Ordered containment difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContainmentDifficulty {
    Easy,
    Moderate,
    Difficult,
    Extreme,
}

impl ContainmentDifficulty {
    pub fn label(self) -> &'static str {
        match self {
            ContainmentDifficulty::Easy => "Easy",
            ContainmentDifficulty::Moderate => "Moderate",
            ContainmentDifficulty::Difficult => "Difficult",
            ContainmentDifficulty::Extreme => "Extreme",
        }
    }

    fn from_composite(composite: f64) -> Self {
        if composite >= containment_ranges::EXTREME.start {
            ContainmentDifficulty::Extreme
        } else if composite >= containment_ranges::DIFFICULT.start {
            ContainmentDifficulty::Difficult
        } else if composite >= containment_ranges::MODERATE.start {
            ContainmentDifficulty::Moderate
        } else {
            ContainmentDifficulty::Easy
        }
    }
}

impl fmt::Display for ContainmentDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weighted composite in `[0, Σweights]`
///
/// c = a × min(R / R_ref, 1) + b × min(θ / θ_ref, 1) + c × (score / 100)
pub fn containment_composite(
    rate_of_spread: f64,
    terrain_slope: f64,
    crown_fire_score: f64,
    config: &ContainmentConfig,
) -> f64 {
    config.ros_weight * unit_interval(rate_of_spread / config.ros_reference_m_per_min)
        + config.slope_weight * unit_interval(terrain_slope / config.slope_reference_deg)
        + config.crown_weight * unit_interval(crown_fire_score / 100.0)
}

/// Classify containment difficulty
///
/// # Arguments
/// * `rate_of_spread` - Effective rate of spread (m/min)
/// * `terrain_slope` - Slope (degrees)
/// * `crown_fire_score` - Crown fire composite score (0-100)
pub fn assess_containment_difficulty(
    rate_of_spread: f64,
    terrain_slope: f64,
    crown_fire_score: f64,
    config: &ContainmentConfig,
) -> ContainmentDifficulty {
    ContainmentDifficulty::from_composite(containment_composite(
        rate_of_spread,
        terrain_slope,
        crown_fire_score,
        config,
    ))
}
