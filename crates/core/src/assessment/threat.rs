//! Overall threat assessment
//!
//! Folds the fire behaviour report and the lightning signal into a single
//! ordinal threat level, a list of rule-generated key concerns and a one-line
//! summary for the dashboard.

use super::containment::ContainmentDifficulty;
use super::severity::SeverityClass;
use crate::config::ThreatConfig;
use crate::physics::unit_interval;
use crate::report::FireBehaviorReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Expected-threat thresholds (strictly greater than)
mod expected_threat_thresholds {
    pub const EXTREME: f64 = 0.7;
    pub const HIGH: f64 = 0.5;
    pub const MODERATE: f64 = 0.3;
}

/// Ordered overall threat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl ThreatLevel {
    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Moderate => "Moderate",
            ThreatLevel::High => "High",
            ThreatLevel::Extreme => "Extreme",
        }
    }

    /// Threat implied by severity alone. Very High flames stay at `High`;
    /// only the extreme band escalates to `Extreme`.
    pub fn from_severity(severity: SeverityClass) -> Self {
        match severity {
            SeverityClass::Low => ThreatLevel::Low,
            SeverityClass::Moderate => ThreatLevel::Moderate,
            SeverityClass::High | SeverityClass::VeryHigh => ThreatLevel::High,
            SeverityClass::Extreme => ThreatLevel::Extreme,
        }
    }

    /// Threat implied by the expected-threat score (0-1)
    pub fn from_expected_threat(score: f64) -> Self {
        if score > expected_threat_thresholds::EXTREME {
            ThreatLevel::Extreme
        } else if score > expected_threat_thresholds::HIGH {
            ThreatLevel::High
        } else if score > expected_threat_thresholds::MODERATE {
            ThreatLevel::Moderate
        } else {
            ThreatLevel::Low
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rule-generated concern, serialised as its human-readable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyConcern {
    #[serde(rename = "High crown fire potential")]
    CrownFire,
    #[serde(rename = "Long-range spotting risk")]
    LongRangeSpotting,
    #[serde(rename = "Rapid fire spread")]
    RapidSpread,
    #[serde(rename = "Difficult suppression conditions")]
    DifficultSuppression,
    #[serde(rename = "Lightning ignition risk")]
    LightningIgnition,
}

impl KeyConcern {
    pub fn message(self) -> &'static str {
        match self {
            KeyConcern::CrownFire => "High crown fire potential",
            KeyConcern::LongRangeSpotting => "Long-range spotting risk",
            KeyConcern::RapidSpread => "Rapid fire spread",
            KeyConcern::DifficultSuppression => "Difficult suppression conditions",
            KeyConcern::LightningIgnition => "Lightning ignition risk",
        }
    }
}

impl fmt::Display for KeyConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Summary of the threat posed by a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    pub threat_level: ThreatLevel,
    pub expected_threat_score: f64,
    pub lightning_detected: bool,
    pub key_concerns: Vec<KeyConcern>,
    pub summary: String,
}

/// Probability that a fire at this site reaches damaging behaviour
///
/// p = min(1, severity_index × crown_score / 100)
pub fn occurrence_probability(severity_index: f64, crown_fire_score: f64) -> f64 {
    unit_interval(unit_interval(severity_index) * crown_fire_score / 100.0)
}

/// Expected threat: occurrence probability weighted by severity, in `[0, 1]`
pub fn expected_threat(occurrence_probability: f64, severity_index: f64) -> f64 {
    unit_interval(occurrence_probability) * unit_interval(severity_index)
}

/// Build the threat assessment for a fire behaviour report
///
/// The level is the maximum of the severity-derived level, the level implied
/// by the expected threat and, when lightning was detected, the configured
/// lightning floor. Lightning can therefore only raise the level.
pub fn build_threat_assessment(
    report: &FireBehaviorReport,
    lightning_detected: bool,
    config: &ThreatConfig,
) -> ThreatAssessment {
    let severity_level = ThreatLevel::from_severity(report.severity_class);
    let expected_level = ThreatLevel::from_expected_threat(report.expected_threat);
    let mut threat_level = severity_level.max(expected_level);
    if lightning_detected {
        threat_level = threat_level.max(config.lightning_floor);
    }

    let mut key_concerns = Vec::new();
    if report.crown_fire_score > config.crown_concern_score {
        key_concerns.push(KeyConcern::CrownFire);
    }
    if report.spotting_distance_km > config.spotting_concern_km {
        key_concerns.push(KeyConcern::LongRangeSpotting);
    }
    if report.ros_effective_m_per_min > config.rapid_spread_m_per_min {
        key_concerns.push(KeyConcern::RapidSpread);
    }
    if report.containment_difficulty >= ContainmentDifficulty::Difficult {
        key_concerns.push(KeyConcern::DifficultSuppression);
    }
    if lightning_detected {
        key_concerns.push(KeyConcern::LightningIgnition);
    }

    debug!(
        ?severity_level,
        ?expected_level,
        lightning_detected,
        ?threat_level,
        concerns = key_concerns.len(),
        "threat assessed"
    );

    let summary = format!(
        "{} wildfire threat with {} severity and {} crown fire potential",
        threat_level.label().to_uppercase(),
        report.severity_class.label().to_lowercase(),
        report.crown_fire_class.label().to_lowercase()
    );

    ThreatAssessment {
        threat_level,
        expected_threat_score: report.expected_threat,
        lightning_detected,
        key_concerns,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::crown_fire::CrownFireClass;

    fn calm_report() -> FireBehaviorReport {
        FireBehaviorReport {
            ros_base_m_per_min: 3.32,
            ros_effective_m_per_min: 3.32,
            slope_multiplier: 1.0,
            aspect_factor: 1.0,
            fuel_load_kg_m2: 0.6004,
            fuel_moisture_pct: 12.0,
            intensity_kw_per_m: 598.0,
            flame_length_m: 1.47,
            severity_index: 0.245,
            severity_class: SeverityClass::Moderate,
            crown_fire_score: 26.9,
            crown_fire_class: CrownFireClass::Low,
            spotting_distance_km: 0.012,
            time_to_burn_hours: Some(6.33),
            damage_estimate_rs: 7_500_000.0,
            containment_difficulty: ContainmentDifficulty::Easy,
            occurrence_probability: 0.066,
            expected_threat: 0.016,
        }
    }

    #[test]
    fn test_calm_report_is_moderate_without_concerns() {
        let assessment = build_threat_assessment(&calm_report(), false, &ThreatConfig::default());
        assert_eq!(assessment.threat_level, ThreatLevel::Moderate);
        assert!(assessment.key_concerns.is_empty());
        assert_eq!(
            assessment.summary,
            "MODERATE wildfire threat with moderate severity and low crown fire potential"
        );
    }

    #[test]
    fn test_lightning_raises_floor_and_adds_concern() {
        let mut report = calm_report();
        report.severity_class = SeverityClass::Low;
        let config = ThreatConfig::default();

        let without = build_threat_assessment(&report, false, &config);
        let with = build_threat_assessment(&report, true, &config);

        assert_eq!(without.threat_level, ThreatLevel::Low);
        assert_eq!(with.threat_level, ThreatLevel::Moderate);
        assert_eq!(with.key_concerns, vec![KeyConcern::LightningIgnition]);
    }

    #[test]
    fn test_lightning_never_lowers_level() {
        let config = ThreatConfig::default();
        for severity in [
            SeverityClass::Low,
            SeverityClass::Moderate,
            SeverityClass::High,
            SeverityClass::VeryHigh,
            SeverityClass::Extreme,
        ] {
            let mut report = calm_report();
            report.severity_class = severity;
            let without = build_threat_assessment(&report, false, &config);
            let with = build_threat_assessment(&report, true, &config);
            assert!(with.threat_level >= without.threat_level);
        }
    }

    #[test]
    fn test_expected_threat_escalates_level() {
        let mut report = calm_report();
        report.severity_class = SeverityClass::Low;
        report.expected_threat = 0.75;
        let assessment = build_threat_assessment(&report, false, &ThreatConfig::default());
        assert_eq!(assessment.threat_level, ThreatLevel::Extreme);
    }

    #[test]
    fn test_concerns_fire_in_rule_order() {
        let mut report = calm_report();
        report.crown_fire_score = 85.0;
        report.spotting_distance_km = 3.5;
        report.ros_effective_m_per_min = 25.0;
        report.containment_difficulty = ContainmentDifficulty::Extreme;
        let assessment = build_threat_assessment(&report, true, &ThreatConfig::default());
        assert_eq!(
            assessment.key_concerns,
            vec![
                KeyConcern::CrownFire,
                KeyConcern::LongRangeSpotting,
                KeyConcern::RapidSpread,
                KeyConcern::DifficultSuppression,
                KeyConcern::LightningIgnition,
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut report = calm_report();
        report.crown_fire_score = 60.0;
        report.spotting_distance_km = 2.0;
        report.ros_effective_m_per_min = 10.0;
        let assessment = build_threat_assessment(&report, false, &ThreatConfig::default());
        assert!(assessment.key_concerns.is_empty());
    }

    #[test]
    fn test_expected_threat_level_boundaries() {
        assert_eq!(ThreatLevel::from_expected_threat(0.3), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_expected_threat(0.31), ThreatLevel::Moderate);
        assert_eq!(ThreatLevel::from_expected_threat(0.51), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_expected_threat(f64::NAN), ThreatLevel::Low);
    }

    #[test]
    fn test_occurrence_and_expected_threat_bounded() {
        assert_eq!(occurrence_probability(1.0, 250.0), 1.0);
        assert_eq!(occurrence_probability(0.5, -40.0), 0.0);
        let occurrence = occurrence_probability(0.5, 60.0);
        assert!((occurrence - 0.3).abs() < 1e-12);
        assert!((expected_threat(occurrence, 0.5) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_concerns_serialize_as_messages() {
        let json = serde_json::to_string(&vec![KeyConcern::RapidSpread]).unwrap();
        assert_eq!(json, r#"["Rapid fire spread"]"#);
    }
}
