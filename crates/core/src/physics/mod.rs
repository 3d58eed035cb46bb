//! Closed-form fire behaviour physics
//!
//! Every function here is total: negative, infinite or NaN inputs are clamped
//! rather than rejected, because a physical quantity cannot be negative and the
//! engine must always produce a report.

pub mod albini_spotting;
pub mod byram;
pub mod crown_fire;
pub mod fuel;
pub mod fuel_moisture;
pub mod terrain_physics;

pub use albini_spotting::compute_spotting_distance;
pub use byram::{compute_flame_length, compute_intensity};
pub use crown_fire::{compute_crown_fire_score, CrownFireClass};
pub use fuel::{fuel_load_from_ndvi, fuel_moisture_pct};
pub use fuel_moisture::vapour_pressure_deficit_kpa;
pub use terrain_physics::TerrainAdjustment;

/// Clamp to `[0, ∞)`; NaN becomes zero (`f64::max` ignores a NaN operand).
#[inline]
pub(crate) fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

/// Clamp to `[lo, hi]`; NaN becomes `lo`.
#[inline]
pub(crate) fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Clamp to `[0, 1]`; NaN becomes zero.
#[inline]
pub(crate) fn unit_interval(value: f64) -> f64 {
    bounded(value, 0.0, 1.0)
}
