//! Aggregation View Types
//!
//! Summary views composed from many analyses and score results. Data
//! only; the reducers live in the service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{Behavior, ExecutionAnalysis, RiskLevel};
use crate::telemetry::ExecutionId;

/// Summary text when fewer than two valid executions were supplied
pub const INSUFFICIENT_COMPARISON: &str = "Need at least 2 executions for comparison";

// ============================================================================
// COMPARISON
// ============================================================================

/// Side-by-side comparison of several executions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Analyses of the valid executions, in input order
    pub executions: Vec<ExecutionAnalysis>,
    /// Textual summary; the fixed insufficient-input sentence when fewer
    /// than two executions were valid
    pub summary: String,
    /// Union of detected behaviors, in taxonomy order
    pub unique_behaviors: Vec<Behavior>,
    /// Tally of coarse risk levels
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
}

impl ComparisonReport {
    /// Whether enough executions were supplied for a real comparison
    pub fn is_sufficient(&self) -> bool {
        self.executions.len() >= 2
    }
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

/// Counts per classification band
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBuckets {
    pub normal: usize,
    pub suspicious: usize,
    pub malicious: usize,
}

/// Score distribution across many executions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub total_executions: usize,
    pub avg_risk: f64,
    pub median_risk: f64,
    pub max_risk: u32,
    pub min_risk: u32,
    pub risk_distribution: DistributionBuckets,
}

// ============================================================================
// PROFILE COMPARISON
// ============================================================================

/// Aggregated score statistics for one enforcement profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRiskStats {
    pub count: usize,
    pub avg_score: f64,
    pub median_score: f64,
    /// Population standard deviation, 0.0 for a single execution
    pub std_dev: f64,
    pub max_score: u32,
    pub min_score: u32,
    /// Scores above the suspicion threshold
    pub high_risk_count: usize,
    /// Scores inside the suspicious band
    pub suspicious_count: usize,
    /// Scores at or below the normal threshold
    pub normal_count: usize,
}

// ============================================================================
// TIMELINE COMPARISON
// ============================================================================

/// Which sampled series to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineMetric {
    CpuPercent,
    MemoryKb,
}

impl TimelineMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineMetric::CpuPercent => "cpu_percent",
            TimelineMetric::MemoryKb => "memory_kb",
        }
    }
}

/// One execution's series for the compared metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    pub id: ExecutionId,
    pub pid: u32,
    pub program: String,
    pub profile: String,
    pub time_ms: Vec<u64>,
    pub values: Vec<u64>,
}

/// Timeline data across several executions for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineComparison {
    pub metric: TimelineMetric,
    pub timelines: Vec<TimelineSeries>,
}
