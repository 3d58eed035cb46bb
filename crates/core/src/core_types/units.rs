//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep weather and terrain quantities from being mixed up
//! at the feature boundary (a wind speed in m/s is not a slope in degrees,
//! even though both are plain floats on the wire).
//!
//! # Design Philosophy
//! - Every unit is an `f64` newtype; the formulas work in `f64` end to end
//! - Total ordering via `Ord` (NaN sorts above every value, per `total_cmp`)
//! - Serde (de)serializes each unit as its bare number
//! - `Deref` to `f64` so formula code reads like the equations it implements
//!
//! # Usage
//! ```
//! use wildfire_threat_core::core_types::units::{Degrees, Percent};
//!
//! let aspect = Degrees::new(-90.0).normalized_bearing();
//! assert_eq!(*aspect, 270.0);
//!
//! let rh = Percent::new(45.0);
//! assert_eq!(Percent::new(10.0).max(rh), rh);
//! assert_eq!(format!("{rh:.1}"), "45.0%");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Generates the shared newtype plumbing: ordering, deref, conversions, display.
macro_rules! scalar_unit {
    ($(#[$meta:meta])* $name:ident, $suffix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(f64);

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Wrap a raw value. No validation; clamping happens at the feature boundary.
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*}{}", p, self.0, $suffix),
                    None => write!(f, "{}{}", self.0, $suffix),
                }
            }
        }
    };
}

scalar_unit!(
    /// Air temperature in degrees Celsius
    Celsius,
    "°C"
);

scalar_unit!(
    /// A percentage (0-100), used for relative humidity
    Percent,
    "%"
);

scalar_unit!(
    /// Wind speed in meters per second (10 m reference height)
    MetersPerSecond,
    " m/s"
);

scalar_unit!(
    /// Precipitation depth in millimeters
    Millimeters,
    " mm"
);

scalar_unit!(
    /// Length or elevation in meters
    Meters,
    " m"
);

scalar_unit!(
    /// Angle in degrees (slope steepness or compass aspect)
    Degrees,
    "°"
);

impl Degrees {
    /// Wrap a compass bearing into `[0, 360)`
    #[inline]
    #[must_use]
    pub fn normalized_bearing(self) -> Self {
        Degrees(self.0.rem_euclid(360.0))
    }
}
