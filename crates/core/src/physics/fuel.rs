//! Fuel bed properties from satellite vegetation indices
//!
//! NDVI stands in for fuel quantity (greener canopy, more biomass) and NDMI
//! for canopy water content. Both mappings are linear proxies, not inversions
//! of a radiative transfer model.

use super::fuel_moisture::calculate_equilibrium_moisture;
use super::{bounded, non_negative, unit_interval};
use crate::config::FuelConfig;

/// Lower and upper bound on reported fuel moisture (%)
const MOISTURE_RANGE_PCT: (f64, f64) = (1.0, 40.0);

/// Fuel load available to the flaming front (kg/m²)
///
/// w = max(k × NDVI, w_min)
///
/// Negative NDVI (water, bare rock, snow) yields the floor value.
pub fn fuel_load_from_ndvi(ndvi: f64, config: &FuelConfig) -> f64 {
    (config.fuel_load_per_ndvi * unit_interval(ndvi)).max(config.min_fuel_load_kg_m2)
}

/// Vegetation moisture proxy from NDMI and NDVI (fraction)
fn vegetation_moisture_fraction(ndvi: f64, ndmi: f64) -> f64 {
    let ndvi = if ndvi.is_nan() { 0.0 } else { ndvi.clamp(-1.0, 1.0) };
    let ndmi = if ndmi.is_nan() { 0.0 } else { ndmi.clamp(-1.0, 1.0) };
    (0.10 + 0.25 * ndmi + 0.05 * ndvi).clamp(0.01, 0.40)
}

/// Fine fuel moisture content (%)
///
/// Mean of the Simard equilibrium moisture for drying fuel and the vegetation
/// moisture proxy, plus a wetting term for recent rain. Clamped to 1-40 %.
pub fn fuel_moisture_pct(
    temperature: f64,
    humidity: f64,
    precip_mm: f64,
    ndvi: f64,
    ndmi: f64,
    config: &FuelConfig,
) -> f64 {
    let emc = calculate_equilibrium_moisture(temperature, humidity);
    let vegetation = vegetation_moisture_fraction(ndvi, ndmi);
    let blended_pct = 100.0 * (emc + vegetation) / 2.0;
    let rain_pct = config.rain_moisture_pct_per_mm * non_negative(precip_mm);

    let (lo, hi) = MOISTURE_RANGE_PCT;
    bounded(blended_pct + rain_pct, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_load_scales_with_ndvi() {
        let config = FuelConfig::default();
        let load = fuel_load_from_ndvi(0.395, &config);
        assert!((load - 0.6004).abs() < 1e-9, "w was {}", load);
        assert!(fuel_load_from_ndvi(0.8, &config) > load);
    }

    #[test]
    fn test_fuel_load_floor_for_bare_ground() {
        let config = FuelConfig::default();
        assert_eq!(fuel_load_from_ndvi(-0.3, &config), 0.05);
        assert_eq!(fuel_load_from_ndvi(f64::NAN, &config), 0.05);
    }

    #[test]
    fn test_moisture_rises_with_rain() {
        let config = FuelConfig::default();
        let dry = fuel_moisture_pct(30.0, 40.0, 0.0, 0.4, 0.2, &config);
        let wet = fuel_moisture_pct(30.0, 40.0, 10.0, 0.4, 0.2, &config);
        assert!((wet - dry - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_moisture_stays_in_range() {
        let config = FuelConfig::default();
        let soaked = fuel_moisture_pct(5.0, 100.0, 500.0, 1.0, 1.0, &config);
        let parched = fuel_moisture_pct(45.0, 0.0, 0.0, -1.0, -1.0, &config);
        assert_eq!(soaked, 40.0);
        assert!((1.0..=40.0).contains(&parched));
    }

    #[test]
    fn test_wetter_canopy_means_wetter_fuel() {
        let config = FuelConfig::default();
        let stressed = fuel_moisture_pct(30.0, 40.0, 0.0, 0.4, -0.2, &config);
        let lush = fuel_moisture_pct(30.0, 40.0, 0.0, 0.4, 0.5, &config);
        assert!(lush > stressed);
    }
}
