//! Risk Scorer
//!
//! Turns an ExecutionAnalysis into a bounded 0-100 score, a three-level
//! classification, a contribution breakdown, and a plain-text narrative.
//! Deterministic: weights and multipliers only, no learned components.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::{Behavior, ExecutionAnalysis};
use crate::telemetry::{ExecutionId, PROFILE_STRICT};

use super::rules::{
    base_weight, COMBINED_BEHAVIORS_MULTIPLIER, MAX_SCORE, MULTI_COMBINED_MULTIPLIER,
    STRICT_VIOLATION_MULTIPLIER, THRESHOLD_NORMAL, THRESHOLD_SUSPICIOUS,
};
use super::types::{
    Contribution, ContributionSource, ContributionWeight, RiskClass, RiskScoreResult,
};

/// Fixed statement for executions with nothing detected
const BENIGN_EXPLANATION: &str = "No anomalous behaviors detected. Process executed normally \
     with minimal resource usage and no policy violations. This execution appears safe.";

// ============================================================================
// SCORER
// ============================================================================

/// Deterministic risk scoring engine.
///
/// Side-effect-free apart from its own execution-id-keyed memoization
/// cache, which is independent of the analyzer's cache and lives as long
/// as the scorer instance.
pub struct RiskScorer {
    cache: RwLock<HashMap<ExecutionId, Arc<RiskScoreResult>>>,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Score one analysis. Memoized per execution id; first writer wins.
    pub fn score(&self, analysis: &ExecutionAnalysis) -> Arc<RiskScoreResult> {
        if let Some(hit) = self.cache.read().get(&analysis.id) {
            log::debug!("score cache hit for execution {}", analysis.id);
            return hit.clone();
        }

        let result = Arc::new(compute_score(analysis));

        self.cache
            .write()
            .entry(analysis.id)
            .or_insert(result)
            .clone()
    }

    /// Number of cached results
    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Classify a clamped score by the fixed thresholds
pub fn classify(score: u32) -> RiskClass {
    if score <= THRESHOLD_NORMAL {
        RiskClass::Normal
    } else if score <= THRESHOLD_SUSPICIOUS {
        RiskClass::Suspicious
    } else {
        RiskClass::Malicious
    }
}

fn compute_score(analysis: &ExecutionAnalysis) -> RiskScoreResult {
    let behaviors = &analysis.detected_behaviors;
    let mut contributions = Vec::new();

    // Step 1: base weights for each detected behavior, in detection order
    let mut base_score = 0u32;
    for &behavior in behaviors {
        let weight = base_weight(behavior);
        base_score += weight;
        contributions.push(Contribution {
            source: behavior.into(),
            weight: ContributionWeight::Points(weight),
            reason: format!("{} detected", behavior),
        });
    }

    // Step 2: multipliers, in fixed order. Profile severity first, then
    // the behavior-count multiplier (3+ takes precedence, never stacks
    // with the 2-behavior rule).
    let mut multiplier = 1.0f64;

    if behaviors.contains(&Behavior::PolicyViolation) && analysis.profile == PROFILE_STRICT {
        multiplier *= STRICT_VIOLATION_MULTIPLIER;
        contributions.push(Contribution {
            source: ContributionSource::PolicyViolationStrict,
            weight: ContributionWeight::from_multiplier(multiplier),
            reason: "Policy violation in STRICT profile (maximum enforcement)".to_string(),
        });
    }

    if behaviors.len() >= 3 {
        multiplier *= MULTI_COMBINED_MULTIPLIER;
        contributions.push(Contribution {
            source: ContributionSource::MultipleBehaviors,
            weight: ContributionWeight::from_multiplier(multiplier),
            reason: "3+ behaviors detected (compounding risk indicators)".to_string(),
        });
    } else if behaviors.len() == 2 {
        multiplier *= COMBINED_BEHAVIORS_MULTIPLIER;
        contributions.push(Contribution {
            source: ContributionSource::CombinedBehaviors,
            weight: ContributionWeight::from_multiplier(multiplier),
            reason: "2+ behaviors detected (combined risk indicators)".to_string(),
        });
    }

    // Step 3: apply and clamp
    let score = ((base_score as f64 * multiplier).round() as u32).min(MAX_SCORE);

    // Step 4: classification
    let risk_level = classify(score);

    // Step 5: narrative
    let explanation = build_explanation(analysis, score, risk_level, multiplier);

    log::info!(
        "scored execution {} (pid {}): {}/100, {} (base {}, x{:.2})",
        analysis.id,
        analysis.pid,
        score,
        risk_level,
        base_score,
        multiplier
    );

    RiskScoreResult {
        id: analysis.id,
        pid: analysis.pid,
        score,
        risk_level,
        threshold_normal: THRESHOLD_NORMAL,
        threshold_suspicious: THRESHOLD_SUSPICIOUS,
        base_score,
        multiplier,
        contributions,
        explanation,
    }
}

// ============================================================================
// EXPLANATION
// ============================================================================

fn build_explanation(
    analysis: &ExecutionAnalysis,
    score: u32,
    risk_level: RiskClass,
    multiplier: f64,
) -> String {
    let behaviors = &analysis.detected_behaviors;
    if behaviors.is_empty() {
        return BENIGN_EXPLANATION.to_string();
    }

    let behavior_list = behaviors
        .iter()
        .map(Behavior::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut explanation = format!(
        "Risk Score: {}/100 ({}). Detected behaviors: {}. ",
        score,
        risk_level.description(),
        behavior_list
    );

    if behaviors.contains(&Behavior::PolicyViolation) {
        explanation.push_str(
            "Security-critical finding: Process attempted unauthorized system calls \
             that were blocked by the sandbox policy. ",
        );
    }

    if behaviors.contains(&Behavior::SustainedHighCpu) {
        let sustained = analysis
            .metrics
            .cpu
            .as_ref()
            .map(|m| m.sustained_percentage)
            .unwrap_or(0.0);
        explanation.push_str(&format!(
            "Process sustained high CPU usage ({:.0}% of runtime). ",
            sustained
        ));
    }

    if behaviors.contains(&Behavior::MonotonicMemoryGrowth) {
        let growth_kb = analysis
            .metrics
            .memory
            .as_ref()
            .map(|m| m.total_growth_kb)
            .unwrap_or(0);
        explanation.push_str(&format!(
            "Memory grew significantly ({:.1} MB). ",
            growth_kb as f64 / 1024.0
        ));
    }

    if behaviors.contains(&Behavior::HighIoSyscallRate) {
        let rate = analysis
            .metrics
            .io
            .as_ref()
            .map(|m| m.syscalls_per_100ms)
            .unwrap_or(0.0);
        explanation.push_str(&format!(
            "Abnormal I/O syscall rate ({:.1} per 100ms). ",
            rate
        ));
    }

    if multiplier > 1.0 {
        explanation.push_str(&format!(
            "(Risk amplified {:.1}x due to compounding factors.)",
            multiplier
        ));
    }

    explanation
}

// ============================================================================
// TESTS
// ============================================================================
