//! Impact estimates over a reference burn window
//!
//! Deliberately simple: damage is a severity-keyed fraction of asset value
//! over a fixed area, and burn time assumes a circular fire growing at the
//! effective spread rate. Neither is a fire-growth simulation.

use super::severity::SeverityClass;
use crate::config::SeverityFactors;
use crate::physics::non_negative;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Monetary damage estimate
///
/// D = A × C × f(severity)
///
/// # Arguments
/// * `severity` - Severity band
/// * `area_ha` - Area assumed burnt (hectares)
/// * `cost_per_ha` - Asset value per hectare (currency units)
/// * `factors` - Loss fraction for each severity band
pub fn estimate_damage(
    severity: SeverityClass,
    area_ha: f64,
    cost_per_ha: f64,
    factors: &SeverityFactors,
) -> f64 {
    non_negative(area_ha) * non_negative(cost_per_ha) * non_negative(severity.damage_factor(factors))
}

/// Hours for a point ignition to burn out a circle of `area_ha`
///
/// t = sqrt(A / π) / R
///
/// Returns `None` when the fire does not spread (R ≤ 0 or NaN).
pub fn time_to_burn_area_hours(rate_of_spread: f64, area_ha: f64) -> Option<f64> {
    if rate_of_spread.is_nan() || rate_of_spread <= 0.0 {
        return None;
    }
    let area_m2 = non_negative(area_ha) * SQUARE_METERS_PER_HECTARE;
    let radius_m = (area_m2 / std::f64::consts::PI).sqrt();
    Some(radius_m / rate_of_spread / 60.0)
}
