//! Aggregation Service
//!
//! Multi-execution views composed from repeated analyzer/scorer calls.
//! Owns the ingestion registry and one instance of each engine; every
//! view is a pure reducer over their outputs and holds no state of its
//! own.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::{Behavior, BehavioralAnalyzer, ExecutionAnalysis};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::risk::{RiskScoreResult, RiskScorer, THRESHOLD_NORMAL, THRESHOLD_SUSPICIOUS};
use crate::telemetry::{ExecutionId, ExecutionRecord, TelemetryRecord};

use super::stats;
use super::types::{
    ComparisonReport, DistributionBuckets, ProfileRiskStats, RiskDistribution, TimelineComparison,
    TimelineMetric, TimelineSeries, INSUFFICIENT_COMPARISON,
};

// ============================================================================
// SERVICE
// ============================================================================

/// High-level analytics service over many executions.
pub struct AggregationService {
    executions: RwLock<HashMap<ExecutionId, Arc<ExecutionRecord>>>,
    analyzer: BehavioralAnalyzer,
    scorer: RiskScorer,
}

impl AggregationService {
    pub fn new() -> Self {
        Self {
            executions: RwLock::new(HashMap::new()),
            analyzer: BehavioralAnalyzer::new(),
            scorer: RiskScorer::new(),
        }
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Register a runner record, minting its execution identity.
    pub fn ingest(&self, telemetry: TelemetryRecord) -> ExecutionId {
        let record = Arc::new(ExecutionRecord::ingest(telemetry));
        let id = record.id;
        self.executions.write().insert(id, record);
        id
    }

    /// Look up a registered execution
    pub fn execution(&self, id: ExecutionId) -> Option<Arc<ExecutionRecord>> {
        self.executions.read().get(&id).cloned()
    }

    pub fn execution_count(&self) -> usize {
        self.executions.read().len()
    }

    // ------------------------------------------------------------------
    // Single-execution passthrough
    // ------------------------------------------------------------------

    /// Behavioral analysis for one execution
    pub fn analysis(&self, id: ExecutionId) -> AnalyticsResult<Arc<ExecutionAnalysis>> {
        let record = self
            .execution(id)
            .ok_or(AnalyticsError::ExecutionNotFound(id))?;
        Ok(self.analyzer.analyze(&record))
    }

    /// Risk score for one execution
    pub fn score(&self, id: ExecutionId) -> AnalyticsResult<Arc<RiskScoreResult>> {
        let analysis = self.analysis(id)?;
        Ok(self.scorer.score(&analysis))
    }

    /// Score many executions; unknown ids are skipped.
    pub fn score_batch(&self, ids: &[ExecutionId]) -> Vec<Arc<RiskScoreResult>> {
        ids.iter().filter_map(|&id| self.score(id).ok()).collect()
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Compare several executions side-by-side.
    ///
    /// Unknown ids are skipped. Fewer than two valid executions yields the
    /// insufficient-input report rather than an error.
    pub fn compare(&self, ids: &[ExecutionId]) -> ComparisonReport {
        let mut analyses = Vec::new();
        for &id in ids {
            match self.analysis(id) {
                Ok(analysis) => analyses.push((*analysis).clone()),
                Err(err) => log::warn!("comparison skipping execution: {}", err),
            }
        }

        if analyses.len() < 2 {
            return ComparisonReport {
                executions: analyses,
                summary: INSUFFICIENT_COMPARISON.to_string(),
                unique_behaviors: Vec::new(),
                risk_distribution: BTreeMap::new(),
            };
        }

        // Union of behaviors in taxonomy order, tally of coarse levels
        let mut unique_behaviors: Vec<Behavior> = analyses
            .iter()
            .flat_map(|a| a.detected_behaviors.iter().copied())
            .collect();
        unique_behaviors.sort_unstable();
        unique_behaviors.dedup();

        let mut risk_distribution = BTreeMap::new();
        for analysis in &analyses {
            *risk_distribution.entry(analysis.risk_level).or_insert(0) += 1;
        }

        let level_list = analyses
            .iter()
            .map(|a| a.risk_level.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let behavior_list = if unique_behaviors.is_empty() {
            "None detected".to_string()
        } else {
            unique_behaviors
                .iter()
                .map(Behavior::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let summary = format!(
            "Compared {} executions. Risk levels: {}. Common behaviors: {}.",
            analyses.len(),
            level_list,
            behavior_list
        );

        ComparisonReport {
            executions: analyses,
            summary,
            unique_behaviors,
            risk_distribution,
        }
    }

    // ------------------------------------------------------------------
    // Distribution
    // ------------------------------------------------------------------

    /// Score distribution over the given executions. Unknown ids are
    /// skipped; an empty input yields a zeroed result.
    pub fn distribution(&self, ids: &[ExecutionId]) -> RiskDistribution {
        let scores: Vec<u32> = self.score_batch(ids).iter().map(|r| r.score).collect();
        if scores.is_empty() {
            return RiskDistribution::default();
        }

        RiskDistribution {
            total_executions: scores.len(),
            avg_risk: stats::mean(&scores),
            median_risk: stats::median(&scores),
            max_risk: scores.iter().copied().max().unwrap_or(0),
            min_risk: scores.iter().copied().min().unwrap_or(0),
            risk_distribution: bucket_counts(&scores),
        }
    }

    // ------------------------------------------------------------------
    // Profile comparison
    // ------------------------------------------------------------------

    /// Score statistics for every registered execution, grouped by
    /// enforcement profile.
    pub fn profile_comparison(&self) -> BTreeMap<String, ProfileRiskStats> {
        let records: Vec<Arc<ExecutionRecord>> =
            self.executions.read().values().cloned().collect();

        let mut scores_by_profile: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for record in records {
            let analysis = self.analyzer.analyze(&record);
            let result = self.scorer.score(&analysis);
            scores_by_profile
                .entry(record.telemetry.profile.clone())
                .or_default()
                .push(result.score);
        }

        scores_by_profile
            .into_iter()
            .map(|(profile, scores)| {
                let buckets = bucket_counts(&scores);
                let stats = ProfileRiskStats {
                    count: scores.len(),
                    avg_score: stats::mean(&scores),
                    median_score: stats::median(&scores),
                    std_dev: stats::std_dev(&scores),
                    max_score: scores.iter().copied().max().unwrap_or(0),
                    min_score: scores.iter().copied().min().unwrap_or(0),
                    high_risk_count: buckets.malicious,
                    suspicious_count: buckets.suspicious,
                    normal_count: buckets.normal,
                };
                (profile, stats)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Timeline comparison
    // ------------------------------------------------------------------

    /// Raw sampled series across executions for one metric. Unknown ids
    /// are skipped; output order follows input order.
    pub fn timeline_comparison(
        &self,
        ids: &[ExecutionId],
        metric: TimelineMetric,
    ) -> TimelineComparison {
        let mut timelines = Vec::new();
        for &id in ids {
            let Some(record) = self.execution(id) else {
                log::warn!("timeline comparison skipping unknown execution {}", id);
                continue;
            };
            let telemetry = &record.telemetry;
            let values = match metric {
                TimelineMetric::CpuPercent => telemetry
                    .timeline
                    .cpu_percent
                    .iter()
                    .map(|&v| v as u64)
                    .collect(),
                TimelineMetric::MemoryKb => telemetry.timeline.memory_kb.clone(),
            };
            timelines.push(TimelineSeries {
                id,
                pid: telemetry.pid,
                program: telemetry.program.clone(),
                profile: telemetry.profile.clone(),
                time_ms: telemetry.timeline.time_ms.clone(),
                values,
            });
        }

        TimelineComparison { metric, timelines }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket scores into classification bands using the scorer thresholds
fn bucket_counts(scores: &[u32]) -> DistributionBuckets {
    DistributionBuckets {
        normal: scores.iter().filter(|&&s| s <= THRESHOLD_NORMAL).count(),
        suspicious: scores
            .iter()
            .filter(|&&s| s > THRESHOLD_NORMAL && s <= THRESHOLD_SUSPICIOUS)
            .count(),
        malicious: scores.iter().filter(|&&s| s > THRESHOLD_SUSPICIOUS).count(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskLevel;
    use crate::risk::RiskClass;
    use crate::telemetry::{ExecutionSummary, Timeline};

    fn clean_record(pid: u32, profile: &str) -> TelemetryRecord {
        TelemetryRecord {
            pid,
            program: "./samples/normal_program".to_string(),
            profile: profile.to_string(),
            summary: ExecutionSummary {
                runtime_ms: 500,
                exit_reason: "EXITED_NORMALLY".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn violation_record(pid: u32, profile: &str) -> TelemetryRecord {
        TelemetryRecord {
            pid,
            program: "./samples/fs_attack".to_string(),
            profile: profile.to_string(),
            summary: ExecutionSummary {
                runtime_ms: 120,
                blocked_syscalls: 1,
                blocked_syscall: "openat".to_string(),
                exit_reason: "SECCOMP_VIOLATION".to_string(),
                termination: "SIG31".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn cpu_record(pid: u32, profile: &str) -> TelemetryRecord {
        TelemetryRecord {
            pid,
            program: "./samples/cpu_stress".to_string(),
            profile: profile.to_string(),
            timeline: Timeline {
                time_ms: (0..10).map(|i| i * 100).collect(),
                cpu_percent: vec![99; 10],
                memory_kb: vec![2000; 10],
            },
            summary: ExecutionSummary {
                runtime_ms: 1000,
                peak_cpu: 100,
                exit_reason: "EXITED_NORMALLY".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_unknown_id_is_structured_not_found() {
        let service = AggregationService::new();
        let missing = ExecutionId::generate();

        match service.analysis(missing) {
            Err(AnalyticsError::ExecutionNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected not-found, got {:?}", other.map(|a| a.risk_level)),
        }
    }

    #[test]
    fn test_compare_requires_two_valid_executions() {
        let service = AggregationService::new();
        let only = service.ingest(clean_record(1, "LEARNING"));

        let report = service.compare(&[only, ExecutionId::generate()]);
        assert!(!report.is_sufficient());
        assert_eq!(report.summary, INSUFFICIENT_COMPARISON);
        assert_eq!(report.executions.len(), 1);
    }

    #[test]
    fn test_compare_summarizes_in_input_order() {
        let service = AggregationService::new();
        let violation = service.ingest(violation_record(2, "STRICT"));
        let clean = service.ingest(clean_record(3, "STRICT"));

        let report = service.compare(&[violation, clean]);
        assert!(report.is_sufficient());
        assert_eq!(
            report.summary,
            "Compared 2 executions. Risk levels: HIGH, LOW. \
             Common behaviors: POLICY_VIOLATION."
        );
        assert_eq!(report.unique_behaviors, vec![Behavior::PolicyViolation]);
        assert_eq!(report.risk_distribution[&RiskLevel::High], 1);
        assert_eq!(report.risk_distribution[&RiskLevel::Low], 1);
    }

    #[test]
    fn test_distribution_buckets_and_stats() {
        let service = AggregationService::new();
        let ids = vec![
            service.ingest(clean_record(10, "LEARNING")),    // 0
            service.ingest(cpu_record(11, "LEARNING")),      // 15
            service.ingest(violation_record(12, "LEARNING")), // 40
            service.ingest(violation_record(13, "STRICT")),  // 60
        ];

        let dist = service.distribution(&ids);
        assert_eq!(dist.total_executions, 4);
        assert_eq!(dist.min_risk, 0);
        assert_eq!(dist.max_risk, 60);
        assert_eq!(dist.avg_risk, 28.75);
        assert_eq!(dist.median_risk, 27.5);
        assert_eq!(dist.risk_distribution.normal, 2);
        assert_eq!(dist.risk_distribution.suspicious, 2);
        assert_eq!(dist.risk_distribution.malicious, 0);
    }

    #[test]
    fn test_distribution_empty_input_is_zeroed() {
        let service = AggregationService::new();
        let dist = service.distribution(&[]);
        assert_eq!(dist, RiskDistribution::default());
    }

    #[test]
    fn test_distribution_order_independent() {
        let service = AggregationService::new();
        let a = service.ingest(clean_record(20, "LEARNING"));
        let b = service.ingest(violation_record(21, "STRICT"));
        let c = service.ingest(cpu_record(22, "LEARNING"));

        assert_eq!(
            service.distribution(&[a, b, c]),
            service.distribution(&[c, a, b])
        );
    }

    #[test]
    fn test_profile_comparison_groups_and_counts() {
        let service = AggregationService::new();
        service.ingest(violation_record(30, "STRICT")); // 60
        service.ingest(clean_record(31, "STRICT")); // 0
        service.ingest(clean_record(32, "LEARNING")); // 0

        let by_profile = service.profile_comparison();
        assert_eq!(by_profile.len(), 2);

        let strict = &by_profile["STRICT"];
        assert_eq!(strict.count, 2);
        assert_eq!(strict.avg_score, 30.0);
        assert_eq!(strict.median_score, 30.0);
        assert_eq!(strict.std_dev, 30.0);
        assert_eq!(strict.max_score, 60);
        assert_eq!(strict.min_score, 0);
        assert_eq!(strict.suspicious_count, 1);
        assert_eq!(strict.normal_count, 1);
        assert_eq!(strict.high_risk_count, 0);

        let learning = &by_profile["LEARNING"];
        assert_eq!(learning.count, 1);
        assert_eq!(learning.std_dev, 0.0);
    }

    #[test]
    fn test_score_batch_skips_unknown() {
        let service = AggregationService::new();
        let known = service.ingest(violation_record(40, "LEARNING"));

        let results = service.score_batch(&[known, ExecutionId::generate()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].risk_level, RiskClass::Suspicious);
    }

    #[test]
    fn test_timeline_comparison_follows_input_order() {
        let service = AggregationService::new();
        let a = service.ingest(cpu_record(50, "LEARNING"));
        let b = service.ingest(clean_record(51, "LEARNING"));

        let comparison = service.timeline_comparison(&[b, a], TimelineMetric::CpuPercent);
        assert_eq!(comparison.timelines.len(), 2);
        assert_eq!(comparison.timelines[0].pid, 51);
        assert_eq!(comparison.timelines[1].pid, 50);
        assert_eq!(comparison.timelines[1].values, vec![99; 10]);
    }

    #[test]
    fn test_timeline_comparison_memory_metric() {
        let service = AggregationService::new();
        let id = service.ingest(cpu_record(52, "LEARNING"));

        let comparison = service.timeline_comparison(&[id], TimelineMetric::MemoryKb);
        assert_eq!(comparison.metric, TimelineMetric::MemoryKb);
        assert_eq!(comparison.timelines[0].values, vec![2000; 10]);
    }
}
