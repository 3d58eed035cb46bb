//! Byram Fireline Intensity and Flame Length (1959)
//!
//! Fireline intensity is the rate of heat release per unit length of the fire
//! front; flame length follows from it through Byram's empirical power law.
//!
//! # Scientific References
//! - Byram, G.M. (1959). "Combustion of forest fuels"
//!   In: Forest Fire: Control and Use, McGraw-Hill, 61-89
//! - Alexander, M.E. (1982). "Calculating and interpreting forest fire intensities"
//!   Canadian Journal of Botany, 60(4), 349-357

use super::non_negative;

/// Byram flame length coefficient (m per (kW/m)^0.46)
pub const FLAME_LENGTH_COEFFICIENT: f64 = 0.0775;

/// Byram flame length exponent
pub const FLAME_LENGTH_EXPONENT: f64 = 0.46;

/// Calculate Byram's fireline intensity
///
/// I = H × w × r
///
/// # Arguments
/// * `rate_of_spread` - Rate of spread (m/min), converted to m/s internally
/// * `fuel_load` - Fuel consumed per unit area (kg/m²)
/// * `heat_of_combustion` - Low heat of combustion (kJ/kg)
///
/// # Returns
/// Fireline intensity in kW/m. Negative or NaN inputs are treated as zero,
/// so the result is never negative.
///
/// # References
/// Byram (1959)
pub fn compute_intensity(rate_of_spread: f64, fuel_load: f64, heat_of_combustion: f64) -> f64 {
    let r = non_negative(rate_of_spread) / 60.0;
    let w = non_negative(fuel_load);
    let h = non_negative(heat_of_combustion);

    // inf × 0 produces NaN; the outer clamp maps it back to zero
    non_negative(h * w * r)
}

/// Calculate flame length from fireline intensity
///
/// L = 0.0775 × I^0.46
///
/// # Returns
/// Flame length in meters; zero for zero (or negative) intensity.
///
/// # References
/// Byram (1959)
pub fn compute_flame_length(intensity: f64) -> f64 {
    FLAME_LENGTH_COEFFICIENT * non_negative(intensity).powf(FLAME_LENGTH_EXPONENT)
}

/// Invert the flame length relation to recover fireline intensity (kW/m)
pub fn intensity_from_flame_length(flame_length: f64) -> f64 {
    (non_negative(flame_length) / FLAME_LENGTH_COEFFICIENT).powf(1.0 / FLAME_LENGTH_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_reference_case() {
        // 18000 kJ/kg × 0.6004 kg/m² × (3.32 / 60) m/s ≈ 598 kW/m
        let intensity = compute_intensity(3.32, 0.6004, 18000.0);
        assert!((intensity - 598.0).abs() < 0.5, "I was {}", intensity);
    }

    #[test]
    fn test_intensity_clamps_negative_inputs() {
        assert_eq!(compute_intensity(-5.0, 1.0, 18000.0), 0.0);
        assert_eq!(compute_intensity(5.0, -1.0, 18000.0), 0.0);
        assert_eq!(compute_intensity(f64::NAN, 1.0, 18000.0), 0.0);
        assert_eq!(compute_intensity(f64::INFINITY, 0.0, 18000.0), 0.0);
    }

    #[test]
    fn test_intensity_monotonic_in_spread_rate() {
        let mut previous = 0.0;
        for step in 0..200 {
            let ros = f64::from(step) * 0.5;
            let intensity = compute_intensity(ros, 0.8, 18000.0);
            assert!(intensity >= previous);
            previous = intensity;
        }
    }

    #[test]
    fn test_flame_length_zero_at_zero_intensity() {
        assert_eq!(compute_flame_length(0.0), 0.0);
        assert_eq!(compute_flame_length(-100.0), 0.0);
    }

    #[test]
    fn test_flame_length_reference_case() {
        // 0.0775 × 598^0.46 ≈ 1.47 m
        let flame = compute_flame_length(598.0);
        assert!((flame - 1.47).abs() < 0.01, "L was {}", flame);
    }

    #[test]
    fn test_flame_length_inverse() {
        for intensity in [10.0, 598.0, 4000.0, 50000.0] {
            let back = intensity_from_flame_length(compute_flame_length(intensity));
            assert!((back - intensity).abs() / intensity < 1e-9);
        }
    }
}
