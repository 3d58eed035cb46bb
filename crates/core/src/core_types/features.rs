//! Environmental feature records
//!
//! [`EnvironmentalFeatures`] is what the data layer hands over: weather is
//! required, vegetation and terrain are optional because their fetchers are
//! the ones that most often come back empty. [`EnvironmentalFeatures::resolve`]
//! turns it into a [`ResolvedFeatures`] with every field present and clamped
//! into its physical domain, which is what the formulas consume.

use crate::config::FeatureDefaults;
use crate::core_types::units::{Celsius, Degrees, Meters, MetersPerSecond, Millimeters, Percent};
use crate::physics::fuel_moisture::vapour_pressure_deficit_kpa;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-location inputs as delivered by the upstream fetchers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalFeatures {
    pub temp_c: Celsius,
    pub rel_humidity_pct: Percent,
    pub wind_speed_ms: MetersPerSecond,
    /// 24 h precipitation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_mm: Option<Millimeters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndvi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<Meters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_deg: Option<Degrees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_deg: Option<Degrees>,
    /// Strikes within the search radius over the last 24 h
    #[serde(default)]
    pub lightning_strikes_24h: u32,
}

impl EnvironmentalFeatures {
    /// Create a record with only the weather fields set.
    pub fn new(temp_c: f64, rel_humidity_pct: f64, wind_speed_ms: f64) -> Self {
        Self {
            temp_c: Celsius::new(temp_c),
            rel_humidity_pct: Percent::new(rel_humidity_pct),
            wind_speed_ms: MetersPerSecond::new(wind_speed_ms),
            precip_mm: None,
            ndvi: None,
            ndmi: None,
            elevation_m: None,
            slope_deg: None,
            aspect_deg: None,
            lightning_strikes_24h: 0,
        }
    }

    pub fn with_precipitation(mut self, precip_mm: f64) -> Self {
        self.precip_mm = Some(Millimeters::new(precip_mm));
        self
    }

    pub fn with_vegetation(mut self, ndvi: f64, ndmi: f64) -> Self {
        self.ndvi = Some(ndvi);
        self.ndmi = Some(ndmi);
        self
    }

    pub fn with_ndvi(mut self, ndvi: f64) -> Self {
        self.ndvi = Some(ndvi);
        self
    }

    pub fn with_terrain(mut self, elevation_m: f64, slope_deg: f64, aspect_deg: f64) -> Self {
        self.elevation_m = Some(Meters::new(elevation_m));
        self.slope_deg = Some(Degrees::new(slope_deg));
        self.aspect_deg = Some(Degrees::new(aspect_deg));
        self
    }

    pub fn with_lightning(mut self, strikes_24h: u32) -> Self {
        self.lightning_strikes_24h = strikes_24h;
        self
    }

    /// Whether any lightning was recorded in the last 24 h
    pub fn lightning_detected(&self) -> bool {
        self.lightning_strikes_24h > 0
    }

    /// Fill missing fields from `defaults` and clamp everything into range.
    ///
    /// Never fails: NaN falls back to the default, out-of-range values are
    /// clamped to the nearest valid value.
    pub fn resolve(&self, defaults: &FeatureDefaults) -> ResolvedFeatures {
        let temp_c = clamp_feature("temp_c", *self.temp_c, -90.0, 70.0, defaults.temp_c);
        let rel_humidity_pct = clamp_feature(
            "rel_humidity_pct",
            *self.rel_humidity_pct,
            0.0,
            100.0,
            defaults.rel_humidity_pct,
        );
        let wind_speed_ms = clamp_feature(
            "wind_speed_ms",
            *self.wind_speed_ms,
            0.0,
            MAX_WIND_SPEED_MS,
            defaults.wind_speed_ms,
        );
        let precip_mm = clamp_feature(
            "precip_mm",
            self.precip_mm.map_or(defaults.precip_mm, f64::from),
            0.0,
            MAX_PRECIP_MM,
            defaults.precip_mm,
        );
        let ndvi = clamp_feature(
            "ndvi",
            self.ndvi.unwrap_or(defaults.ndvi),
            -1.0,
            1.0,
            defaults.ndvi,
        );
        let ndmi = clamp_feature(
            "ndmi",
            self.ndmi.unwrap_or(defaults.ndmi),
            -1.0,
            1.0,
            defaults.ndmi,
        );
        let elevation_m = clamp_feature(
            "elevation_m",
            self.elevation_m.map_or(defaults.elevation_m, f64::from),
            -500.0,
            9000.0,
            defaults.elevation_m,
        );
        let slope_deg = clamp_feature(
            "slope_deg",
            self.slope_deg.map_or(defaults.slope_deg, f64::from),
            0.0,
            90.0,
            defaults.slope_deg,
        );
        let raw_aspect = self.aspect_deg.map_or(defaults.aspect_deg, f64::from);
        let aspect_deg = if raw_aspect.is_finite() {
            Degrees::new(raw_aspect).normalized_bearing()
        } else {
            debug!(raw = raw_aspect, "aspect not finite, using default");
            Degrees::new(defaults.aspect_deg).normalized_bearing()
        };

        ResolvedFeatures {
            temp_c: Celsius::new(temp_c),
            rel_humidity_pct: Percent::new(rel_humidity_pct),
            wind_speed_ms: MetersPerSecond::new(wind_speed_ms),
            precip_mm: Millimeters::new(precip_mm),
            vpd_kpa: vapour_pressure_deficit_kpa(temp_c, rel_humidity_pct),
            ndvi,
            ndmi,
            elevation_m: Meters::new(elevation_m),
            slope_deg: Degrees::new(slope_deg),
            aspect_deg,
            lightning_strikes_24h: self.lightning_strikes_24h,
        }
    }
}

/// Upper clamp for 10 m wind speed (m/s), above the strongest recorded gusts.
pub const MAX_WIND_SPEED_MS: f64 = 120.0;

/// Upper clamp for 24 h rainfall (mm), above the world 24 h record.
pub const MAX_PRECIP_MM: f64 = 2000.0;

/// Clamp into `[lo, hi]`, substituting `fallback` for NaN.
fn clamp_feature(name: &'static str, raw: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if raw.is_nan() {
        debug!(feature = name, fallback, "feature is NaN, using default");
        return fallback.clamp(lo, hi);
    }
    let clamped = raw.clamp(lo, hi);
    if clamped != raw {
        debug!(feature = name, raw, clamped, "clamped out-of-range feature");
    }
    clamped
}

/// Column names accepted by [`ResolvedFeatures::column`].
pub const FEATURE_COLUMNS: [&str; 12] = [
    "temp_c",
    "rel_humidity_pct",
    "wind_speed_ms",
    "precip_mm",
    "vpd_kpa",
    "ndvi",
    "ndmi",
    "elevation_m",
    "slope_deg",
    "aspect_deg",
    "lightning_strike_24h",
    "lightning_count",
];

/// A complete, range-checked feature record.
///
/// Serialises with the column names the inference models are trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFeatures {
    pub temp_c: Celsius,
    pub rel_humidity_pct: Percent,
    pub wind_speed_ms: MetersPerSecond,
    pub precip_mm: Millimeters,
    /// Vapour pressure deficit derived from temperature and humidity
    pub vpd_kpa: f64,
    pub ndvi: f64,
    pub ndmi: f64,
    pub elevation_m: Meters,
    pub slope_deg: Degrees,
    pub aspect_deg: Degrees,
    pub lightning_strikes_24h: u32,
}

impl ResolvedFeatures {
    pub fn lightning_detected(&self) -> bool {
        self.lightning_strikes_24h > 0
    }

    /// Look up a model input column by name.
    ///
    /// `lightning_strike_24h` is the 0/1 indicator the ignition classifier
    /// was trained on; `lightning_count` is the raw strike count.
    pub fn column(&self, name: &str) -> Option<f64> {
        let value = match name {
            "temp_c" => *self.temp_c,
            "rel_humidity_pct" => *self.rel_humidity_pct,
            "wind_speed_ms" => *self.wind_speed_ms,
            "precip_mm" => *self.precip_mm,
            "vpd_kpa" => self.vpd_kpa,
            "ndvi" => self.ndvi,
            "ndmi" => self.ndmi,
            "elevation_m" => *self.elevation_m,
            "slope_deg" => *self.slope_deg,
            "aspect_deg" => *self.aspect_deg,
            "lightning_strike_24h" => f64::from(u8::from(self.lightning_detected())),
            "lightning_count" => f64::from(self.lightning_strikes_24h),
            _ => return None,
        };
        Some(value)
    }
}
