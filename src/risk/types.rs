//! Risk Scoring Types
//!
//! Core types for the risk scorer. No scoring logic here.

use serde::{Deserialize, Serialize};

use crate::analysis::Behavior;
use crate::telemetry::ExecutionId;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Final three-tier classification derived from the clamped score.
///
/// Distinct from the analyzer's LOW/MEDIUM/HIGH tier; the two vocabularies
/// are independent outputs with different thresholds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskClass {
    Normal,
    Suspicious,
    Malicious,
}

impl RiskClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Normal => "NORMAL",
            RiskClass::Suspicious => "SUSPICIOUS",
            RiskClass::Malicious => "MALICIOUS",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskClass::Normal => 0,
            RiskClass::Suspicious => 1,
            RiskClass::Malicious => 2,
        }
    }

    /// Short descriptor used in explanation headers
    pub fn description(&self) -> &'static str {
        match self {
            RiskClass::Normal => "Normal execution behavior",
            RiskClass::Suspicious => "Suspicious behavior detected",
            RiskClass::Malicious => "High-risk behavior detected",
        }
    }
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONTRIBUTIONS
// ============================================================================

/// Where a contribution entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionSource {
    SustainedHighCpu,
    MonotonicMemoryGrowth,
    HighIoSyscallRate,
    PolicyViolation,
    /// STRICT-profile severity multiplier
    PolicyViolationStrict,
    /// 3+ behaviors multiplier
    MultipleBehaviors,
    /// Exactly 2 behaviors multiplier
    CombinedBehaviors,
}

impl From<Behavior> for ContributionSource {
    fn from(behavior: Behavior) -> Self {
        match behavior {
            Behavior::SustainedHighCpu => ContributionSource::SustainedHighCpu,
            Behavior::MonotonicMemoryGrowth => ContributionSource::MonotonicMemoryGrowth,
            Behavior::HighIoSyscallRate => ContributionSource::HighIoSyscallRate,
            Behavior::PolicyViolation => ContributionSource::PolicyViolation,
        }
    }
}

/// Flat points for behavior weights, or the accumulated percentage label
/// for multipliers ("+50%"). Serializes as a bare number or string,
/// matching what report consumers already parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContributionWeight {
    Points(u32),
    Percent(String),
}

impl ContributionWeight {
    /// Label for the accumulated multiplier at the time of application
    pub fn from_multiplier(multiplier: f64) -> Self {
        let percent = ((multiplier - 1.0) * 100.0).round() as i64;
        ContributionWeight::Percent(format!("+{}%", percent))
    }

    pub fn as_points(&self) -> Option<u32> {
        match self {
            ContributionWeight::Points(p) => Some(*p),
            ContributionWeight::Percent(_) => None,
        }
    }
}

/// One applied weight or multiplier, in application order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub source: ContributionSource,
    pub weight: ContributionWeight,
    pub reason: String,
}

// ============================================================================
// RISK SCORE RESULT
// ============================================================================

/// Deterministic risk assessment for one execution, one-to-one with its
/// ExecutionAnalysis. Cached per execution id by the scorer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub id: ExecutionId,
    pub pid: u32,
    /// Final score in [0, 100]
    pub score: u32,
    pub risk_level: RiskClass,
    pub threshold_normal: u32,
    pub threshold_suspicious: u32,
    /// Sum of behavior weights before multipliers
    pub base_score: u32,
    /// Accumulated severity multiplier (>= 1.0)
    pub multiplier: f64,
    pub contributions: Vec<Contribution>,
    pub explanation: String,
}

impl RiskScoreResult {
    /// Serialize for report surfaces
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_class_wire_strings() {
        assert_eq!(serde_json::to_string(&RiskClass::Normal).unwrap(), "\"NORMAL\"");
        assert_eq!(
            serde_json::to_string(&RiskClass::Suspicious).unwrap(),
            "\"SUSPICIOUS\""
        );
        assert_eq!(
            serde_json::to_string(&RiskClass::Malicious).unwrap(),
            "\"MALICIOUS\""
        );
    }

    #[test]
    fn test_contribution_source_wire_strings() {
        assert_eq!(
            serde_json::to_string(&ContributionSource::PolicyViolationStrict).unwrap(),
            "\"POLICY_VIOLATION_STRICT\""
        );
        assert_eq!(
            serde_json::to_string(&ContributionSource::from(Behavior::SustainedHighCpu)).unwrap(),
            "\"SUSTAINED_HIGH_CPU\""
        );
    }

    #[test]
    fn test_weight_serialization_shapes() {
        let points = serde_json::to_value(ContributionWeight::Points(40)).unwrap();
        assert!(points.is_number());

        let percent = serde_json::to_value(ContributionWeight::from_multiplier(1.5)).unwrap();
        assert_eq!(percent, serde_json::json!("+50%"));
    }

    #[test]
    fn test_multiplier_percent_labels() {
        assert_eq!(
            ContributionWeight::from_multiplier(1.2),
            ContributionWeight::Percent("+20%".to_string())
        );
        assert_eq!(
            ContributionWeight::from_multiplier(2.25),
            ContributionWeight::Percent("+125%".to_string())
        );
        assert_eq!(
            ContributionWeight::from_multiplier(1.8),
            ContributionWeight::Percent("+80%".to_string())
        );
    }
}
