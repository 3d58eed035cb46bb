//! Core types and utilities

pub mod features;
pub mod units;

pub use features::{EnvironmentalFeatures, ResolvedFeatures, FEATURE_COLUMNS};
pub use units::*;
