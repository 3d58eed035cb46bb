//! Classification and impact layers built on top of the physics

pub mod containment;
pub mod damage;
pub mod severity;
pub mod threat;

pub use containment::{assess_containment_difficulty, ContainmentDifficulty};
pub use damage::{estimate_damage, time_to_burn_area_hours};
pub use severity::{classify_severity, severity_index, SeverityClass};
pub use threat::{
    build_threat_assessment, expected_threat, occurrence_probability, KeyConcern,
    ThreatAssessment, ThreatLevel,
};
