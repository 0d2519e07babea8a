//! Behavioral Analyzer
//!
//! Orchestrates the four detectors in fixed order, derives the coarse
//! risk tier, and memoizes results per execution id for the lifetime of
//! the analyzer instance.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::telemetry::{ExecutionId, ExecutionRecord};

use super::detectors::{
    detect_io_rate, detect_memory_growth, detect_policy_violation, detect_sustained_cpu,
};
use super::rules::DetectionThresholds;
use super::types::{AnalysisMetrics, Behavior, Detection, ExecutionAnalysis, RiskLevel};

// ============================================================================
// ANALYZER
// ============================================================================

/// Deterministic behavioral analysis engine.
///
/// Stateless apart from its result cache. Analyses of different execution
/// ids may run concurrently; a same-id race is resolved first-writer-wins,
/// which is benign because detectors are deterministic.
pub struct BehavioralAnalyzer {
    thresholds: DetectionThresholds,
    cache: RwLock<HashMap<ExecutionId, Arc<ExecutionAnalysis>>>,
}

impl BehavioralAnalyzer {
    pub fn new() -> Self {
        Self::with_thresholds(DetectionThresholds::default())
    }

    pub fn with_thresholds(thresholds: DetectionThresholds) -> Self {
        Self {
            thresholds,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Analyze one execution.
    ///
    /// Memoized by execution id: repeated calls return the cached analysis
    /// without re-running detectors, even if a different record carries the
    /// same id. The cache lives as long as this instance and is never
    /// invalidated.
    pub fn analyze(&self, record: &ExecutionRecord) -> Arc<ExecutionAnalysis> {
        if let Some(hit) = self.cache.read().get(&record.id) {
            log::debug!("analysis cache hit for execution {}", record.id);
            return hit.clone();
        }

        let analysis = Arc::new(self.evaluate(record));

        // First writer wins: a concurrent evaluation of the same id may
        // have landed between the read and this write.
        self.cache
            .write()
            .entry(record.id)
            .or_insert(analysis)
            .clone()
    }

    /// Number of cached analyses
    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }

    fn evaluate(&self, record: &ExecutionRecord) -> ExecutionAnalysis {
        let telemetry = &record.telemetry;

        let mut detected_behaviors = Vec::new();
        let mut explanations = BTreeMap::new();
        let mut metrics = AnalysisMetrics::default();

        // Fixed evaluation order: CPU, Memory, I/O, Policy
        let detections = [
            detect_sustained_cpu(telemetry, &self.thresholds),
            detect_memory_growth(telemetry, &self.thresholds),
            detect_io_rate(telemetry, &self.thresholds),
            detect_policy_violation(telemetry, &self.thresholds),
        ];

        for detection in detections.into_iter().flatten() {
            let Detection {
                behavior,
                explanation,
                metrics: evidence,
            } = detection;

            if behavior.is_security_critical() {
                log::warn!(
                    "execution {} (pid {}): {} detected",
                    record.id,
                    telemetry.pid,
                    behavior
                );
            }

            detected_behaviors.push(behavior);
            explanations.insert(behavior, explanation);
            metrics.record(evidence);
        }

        let risk_level = compute_risk_level(&detected_behaviors);

        log::info!(
            "analyzed execution {} (pid {}, program {}): {} behavior(s), risk level {}",
            record.id,
            telemetry.pid,
            telemetry.program,
            detected_behaviors.len(),
            risk_level
        );

        ExecutionAnalysis {
            id: record.id,
            pid: telemetry.pid,
            program: telemetry.program.clone(),
            profile: telemetry.profile.clone(),
            detected_behaviors,
            explanations,
            metrics,
            risk_level,
        }
    }
}

impl Default for BehavioralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RISK TIER
// ============================================================================

/// Coarse tier from detected behaviors: any policy violation is HIGH, any
/// resource behavior is MEDIUM (one or many), otherwise LOW.
fn compute_risk_level(behaviors: &[Behavior]) -> RiskLevel {
    if behaviors.contains(&Behavior::PolicyViolation) {
        RiskLevel::High
    } else if !behaviors.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// TESTS
// ============================================================================
