//! Wildfire Threat Core Library
//!
//! Turns a rate-of-spread estimate and a site's environmental features
//! (weather, vegetation indices, terrain, lightning) into a fire behaviour
//! report and an overall threat assessment using closed-form fire physics.
//!
//! ## Derivation
//!
//! - Byram fireline intensity and flame length
//! - Slope and aspect adjustment of the spread rate
//! - Crown fire potential, Albini-style spotting distance
//! - Severity, containment difficulty, damage and burn-time estimates
//! - Threat level and rule-generated key concerns
//!
//! The engine is a pure function of its inputs and configuration. Inference
//! models plug in through the [`inference`] traits and the [`pipeline`] runs
//! both together.

// Core types and utilities
pub mod core_types;
pub mod config;
pub mod error;

// Formulas and classification
pub mod assessment;
pub mod physics;

// Orchestration
pub mod inference;
pub mod pipeline;
pub mod report;

// Re-export core types
pub use core_types::{EnvironmentalFeatures, ResolvedFeatures};
pub use config::EngineConfig;
pub use error::{ConfigError, ModelError, ThreatError};

// Re-export outputs
pub use assessment::{
    ContainmentDifficulty, KeyConcern, SeverityClass, ThreatAssessment, ThreatLevel,
};
pub use physics::CrownFireClass;
pub use report::{FireBehaviorEngine, FireBehaviorEvaluation, FireBehaviorReport};

// Re-export inference and pipeline
pub use inference::{IgnitionModel, IgnitionRisk, LinearModel, Link, RiskLevel, SpreadRateModel};
pub use pipeline::{ThreatPipeline, ThreatPrediction};
