//! Fire severity classification from flame length
//!
//! Bands follow the usual suppression interpretation of flame length:
//! hand crews below 1.2 m (4 ft), equipment up to 2.4 m (8 ft), indirect
//! attack up to 3.4 m (11 ft), and beyond that control efforts at the head
//! of the fire are ineffective.

use crate::config::SeverityFactors;
use crate::physics::byram::compute_flame_length;
use crate::physics::unit_interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flame length band boundaries in meters (lower bound inclusive)
pub mod flame_length_ranges {
    use std::ops::{Range, RangeFrom};

    /// "Low" severity `[0.0, 1.2)`
    pub const LOW: Range<f64> = 0.0..1.2;

    /// "Moderate" severity `[1.2, 2.4)`
    pub const MODERATE: Range<f64> = 1.2..2.4;

    /// "High" severity `[2.4, 3.4)`
    pub const HIGH: Range<f64> = 2.4..3.4;

    /// "Very High" severity `[3.4, 6.0)`
    pub const VERY_HIGH: Range<f64> = 3.4..6.0;

    /// "Extreme" severity `[6.0, ∞)`
    pub const EXTREME: RangeFrom<f64> = 6.0..;
}

/// Ordered fire severity bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityClass {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl SeverityClass {
    pub fn label(self) -> &'static str {
        match self {
            SeverityClass::Low => "Low",
            SeverityClass::Moderate => "Moderate",
            SeverityClass::High => "High",
            SeverityClass::VeryHigh => "Very High",
            SeverityClass::Extreme => "Extreme",
        }
    }

    /// Fraction of asset value lost for this band
    pub fn damage_factor(self, factors: &SeverityFactors) -> f64 {
        match self {
            SeverityClass::Low => factors.low,
            SeverityClass::Moderate => factors.moderate,
            SeverityClass::High => factors.high,
            SeverityClass::VeryHigh => factors.very_high,
            SeverityClass::Extreme => factors.extreme,
        }
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify flame length (m) into a severity band
///
/// Total over the real line: values below the moderate threshold, negative
/// values and NaN all map to `Low`.
pub fn classify_severity(flame_length: f64) -> SeverityClass {
    if flame_length >= flame_length_ranges::EXTREME.start {
        SeverityClass::Extreme
    } else if flame_length >= flame_length_ranges::VERY_HIGH.start {
        SeverityClass::VeryHigh
    } else if flame_length >= flame_length_ranges::HIGH.start {
        SeverityClass::High
    } else if flame_length >= flame_length_ranges::MODERATE.start {
        SeverityClass::Moderate
    } else {
        SeverityClass::Low
    }
}

/// Classify fireline intensity (kW/m) via its Byram flame length
pub fn classify_intensity(intensity: f64) -> SeverityClass {
    classify_severity(compute_flame_length(intensity))
}

/// Flame length normalised by the extreme threshold, in `[0, 1]`
pub fn severity_index(flame_length: f64) -> f64 {
    unit_interval(flame_length / flame_length_ranges::EXTREME.start)
}
