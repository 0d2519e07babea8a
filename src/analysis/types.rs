//! Behavioral Analysis Types
//!
//! Core types for behavior detection. No detection logic here, only data
//! structures shared by the detectors, the analyzer, and the scorer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::ExecutionId;

// ============================================================================
// BEHAVIOR TAXONOMY
// ============================================================================

/// Named behavior patterns the detectors can emit.
///
/// The taxonomy is closed and stable: dashboards, CLIs, and report
/// generators depend on the exact wire strings. Variant order is the
/// detector evaluation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Behavior {
    /// CPU pinned at or above the sustain threshold for several samples
    SustainedHighCpu,
    /// Stepwise memory growth large enough to indicate a leak
    MonotonicMemoryGrowth,
    /// I/O syscall rate far above the normal-program baseline
    HighIoSyscallRate,
    /// Sandbox policy enforcement fired (blocked syscall or violation exit)
    PolicyViolation,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::SustainedHighCpu => "SUSTAINED_HIGH_CPU",
            Behavior::MonotonicMemoryGrowth => "MONOTONIC_MEMORY_GROWTH",
            Behavior::HighIoSyscallRate => "HIGH_IO_SYSCALL_RATE",
            Behavior::PolicyViolation => "POLICY_VIOLATION",
        }
    }

    /// The only behavior with security-enforcement meaning; the rest are
    /// resource-usage heuristics.
    pub fn is_security_critical(&self) -> bool {
        matches!(self, Behavior::PolicyViolation)
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// COARSE RISK LEVEL
// ============================================================================

/// Coarse per-execution tier derived from detected behaviors.
///
/// Distinct from the scorer's NORMAL/SUSPICIOUS/MALICIOUS classification;
/// the two vocabularies are independent outputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PER-CATEGORY METRICS
// ============================================================================

/// Evidence behind a SUSTAINED_HIGH_CPU detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub peak_cpu: u32,
    /// Samples at or above the sustain threshold
    pub sustained_samples: usize,
    pub total_samples: usize,
    /// sustained_samples as a percentage of total_samples
    pub sustained_percentage: f64,
}

/// Evidence behind a MONOTONIC_MEMORY_GROWTH detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub peak_memory_kb: u64,
    pub starting_memory_kb: u64,
    pub ending_memory_kb: u64,
    pub total_growth_kb: i64,
    /// Samples that exceeded the running maximum
    pub growth_steps: usize,
    pub total_samples: usize,
    pub page_faults_major: u64,
}

/// Evidence behind a HIGH_IO_SYSCALL_RATE detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoMetrics {
    pub read_syscalls: u64,
    pub write_syscalls: u64,
    pub total_io_syscalls: u64,
    pub runtime_ms: u64,
    pub syscalls_per_100ms: f64,
    /// Normal-program baseline, carried for the explanatory ratio
    pub baseline_syscalls_per_100ms: u32,
}

/// Evidence behind a POLICY_VIOLATION detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyMetrics {
    pub exit_reason: String,
    pub blocked_syscalls: u64,
    pub blocked_syscall_name: String,
    pub termination_signal: String,
    pub profile: String,
}

/// Metrics payload of a single detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMetrics {
    Cpu(CpuMetrics),
    Memory(MemoryMetrics),
    Io(IoMetrics),
    Policy(PolicyMetrics),
}

/// Structured evidence for one analysis, one slot per behavior category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io: Option<IoMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyMetrics>,
}

impl AnalysisMetrics {
    /// File a detection's evidence into its category slot
    pub fn record(&mut self, metrics: DetectionMetrics) {
        match metrics {
            DetectionMetrics::Cpu(m) => self.cpu = Some(m),
            DetectionMetrics::Memory(m) => self.memory = Some(m),
            DetectionMetrics::Io(m) => self.io = Some(m),
            DetectionMetrics::Policy(m) => self.policy = Some(m),
        }
    }
}

// ============================================================================
// DETECTION
// ============================================================================

/// Output of one behavior detector: name + justification + evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub behavior: Behavior,
    pub explanation: String,
    pub metrics: DetectionMetrics,
}

// ============================================================================
// EXECUTION ANALYSIS
// ============================================================================

/// Full behavioral analysis of one execution.
///
/// Computed once per execution id and cached by the analyzer for its
/// lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionAnalysis {
    pub id: ExecutionId,
    pub pid: u32,
    pub program: String,
    pub profile: String,
    /// Behaviors in detector evaluation order (CPU, Memory, I/O, Policy)
    pub detected_behaviors: Vec<Behavior>,
    /// Behavior -> human-readable justification
    pub explanations: BTreeMap<Behavior, String>,
    pub metrics: AnalysisMetrics,
    pub risk_level: RiskLevel,
}

impl ExecutionAnalysis {
    pub fn has_behavior(&self, behavior: Behavior) -> bool {
        self.detected_behaviors.contains(&behavior)
    }

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
    fn test_behavior_wire_strings() {
        assert_eq!(Behavior::SustainedHighCpu.as_str(), "SUSTAINED_HIGH_CPU");
        assert_eq!(
            Behavior::MonotonicMemoryGrowth.as_str(),
            "MONOTONIC_MEMORY_GROWTH"
        );
        assert_eq!(Behavior::HighIoSyscallRate.as_str(), "HIGH_IO_SYSCALL_RATE");
        assert_eq!(Behavior::PolicyViolation.as_str(), "POLICY_VIOLATION");

        // serde must emit the same strings consumers depend on
        for behavior in [
            Behavior::SustainedHighCpu,
            Behavior::MonotonicMemoryGrowth,
            Behavior::HighIoSyscallRate,
            Behavior::PolicyViolation,
        ] {
            let json = serde_json::to_string(&behavior).unwrap();
            assert_eq!(json, format!("\"{}\"", behavior.as_str()));
        }
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::High.severity_level(), 2);
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_metrics_slotting() {
        let mut metrics = AnalysisMetrics::default();
        metrics.record(DetectionMetrics::Cpu(CpuMetrics {
            peak_cpu: 100,
            sustained_samples: 6,
            total_samples: 10,
            sustained_percentage: 60.0,
        }));

        assert!(metrics.cpu.is_some());
        assert!(metrics.memory.is_none());

        // Absent categories stay out of the JSON entirely
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("memory").is_none());
        assert_eq!(json["cpu"]["sustained_samples"], 6);
    }
}
