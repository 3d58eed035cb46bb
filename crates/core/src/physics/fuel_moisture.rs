//! Atmospheric drying: equilibrium moisture content and vapour pressure deficit
//!
//! # Scientific References
//! - Simard, A.J. (1968). "The moisture content of forest fuels"
//!   Forest Fire Research Institute, Ottawa, Information Report FF-X-14
//! - Nelson, R.M. (2000). "Prediction of diurnal change in 10-h fuel stick moisture content"
//!   Canadian Journal of Forest Research, 30(7), 1071-1087
//! - Tetens, O. (1930). "Über einige meteorologische Begriffe"
//!   Zeitschrift für Geophysik, 6, 297-309

use super::{bounded, unit_interval};

/// Equilibrium moisture content of drying fuel
///
/// Simard (1968) desorption equation:
/// EMC = b×H + c×T + d×H×T
///
/// # Arguments
/// * `temperature` - Air temperature (°C)
/// * `humidity` - Relative humidity (%)
///
/// # Returns
/// Equilibrium moisture content (fraction 0.01-0.40)
///
/// # References
/// Simard (1968), Nelson (2000)
pub fn calculate_equilibrium_moisture(temperature: f64, humidity: f64) -> f64 {
    let (b, c, d) = (0.00282, -0.000176, -0.0000201);

    // With negative d, higher temperature reduces the humidity effect
    let emc = b * humidity + c * temperature + d * humidity * temperature;

    // NaN collapses to the dry end
    bounded(emc, 0.01, 0.40)
}

/// Saturation vapour pressure over water (kPa), Tetens formula
///
/// e_s = 0.6108 × exp(17.27 × T / (T + 237.3))
pub fn saturation_vapour_pressure_kpa(temperature: f64) -> f64 {
    0.6108 * (17.27 * temperature / (temperature + 237.3)).exp()
}

/// Vapour pressure deficit (kPa)
///
/// VPD = e_s × (1 − RH/100)
///
/// Humidity is clamped into [0, 100] so the deficit is never negative.
pub fn vapour_pressure_deficit_kpa(temperature: f64, humidity: f64) -> f64 {
    let rh_fraction = unit_interval(humidity / 100.0);
    (saturation_vapour_pressure_kpa(temperature) * (1.0 - rh_fraction)).max(0.0)
}
