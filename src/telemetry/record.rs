//! Telemetry Record Types
//!
//! Immutable observations for one finished sandboxed execution.
//! These records are produced externally by the sandbox runner and are the
//! only input the analytics pipeline reads. They are never mutated here.

use serde::{Deserialize, Serialize};

/// Enforcement profile with maximum restrictions
pub const PROFILE_STRICT: &str = "STRICT";

/// Enforcement profile that observes without blocking
pub const PROFILE_LEARNING: &str = "LEARNING";

// ============================================================================
// TIMELINE
// ============================================================================

/// Sampled time-series for one execution.
///
/// The three sequences are parallel and aligned by index: sample `i` was
/// taken at `time_ms[i]`. A record with zero samples is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Elapsed milliseconds since launch, per sample
    pub time_ms: Vec<u64>,
    /// CPU usage percent, per sample
    pub cpu_percent: Vec<u32>,
    /// Resident memory in KB, per sample
    pub memory_kb: Vec<u64>,
}

impl Timeline {
    /// Number of samples recorded
    pub fn sample_count(&self) -> usize {
        self.cpu_percent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu_percent.is_empty() && self.memory_kb.is_empty() && self.time_ms.is_empty()
    }

    /// All three sequences have the same length
    pub fn is_aligned(&self) -> bool {
        self.time_ms.len() == self.cpu_percent.len()
            && self.cpu_percent.len() == self.memory_kb.len()
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Fixed per-execution counters reported by the runner at exit.
///
/// Syscall counts come from /proc/[pid]/io, fault counters from
/// /proc/[pid]/stat, peak memory from /proc/[pid]/status (VmPeak).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSummary {
    /// Total wall-clock runtime in milliseconds
    pub runtime_ms: u64,
    /// Highest sampled CPU percent
    pub peak_cpu: u32,
    /// VmPeak in KB
    pub peak_memory_kb: u64,
    pub page_faults_minor: u64,
    pub page_faults_major: u64,
    /// syscr counter
    pub read_syscalls: u64,
    /// syscw counter
    pub write_syscalls: u64,
    /// Syscalls denied by the seccomp policy
    pub blocked_syscalls: u64,
    /// Name of one representative blocked syscall, empty if none
    pub blocked_syscall: String,
    /// Free-text exit status; contains "VIOLATION" on policy kills
    pub exit_reason: String,
    /// Terminating signal description (e.g. SIG31 = SIGSYS)
    pub termination: String,
}

impl ExecutionSummary {
    /// Combined read + write syscall count
    pub fn total_io_syscalls(&self) -> u64 {
        self.read_syscalls + self.write_syscalls
    }
}

// ============================================================================
// TELEMETRY RECORD
// ============================================================================

/// Complete telemetry for one finished execution.
///
/// Field names and nesting match the JSON the runner writes, so a record
/// deserializes straight from a runner log. Every field defaults when
/// absent; a partially-filled record is analyzable, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryRecord {
    /// OS-assigned process id. Descriptive only; execution identity is
    /// the ExecutionId minted at ingestion.
    pub pid: u32,
    /// Path or name of the executed binary
    pub program: String,
    /// Sandbox enforcement mode (open set; STRICT and LEARNING are special)
    pub profile: String,
    pub timeline: Timeline,
    pub summary: ExecutionSummary,
}

impl TelemetryRecord {
    /// True when the execution ran under the STRICT profile
    pub fn is_strict_profile(&self) -> bool {
        self.profile == PROFILE_STRICT
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_alignment() {
        let aligned = Timeline {
            time_ms: vec![0, 100, 200],
            cpu_percent: vec![10, 20, 30],
            memory_kb: vec![1000, 1100, 1200],
        };
        assert!(aligned.is_aligned());
        assert_eq!(aligned.sample_count(), 3);

        let skewed = Timeline {
            time_ms: vec![0, 100],
            cpu_percent: vec![10, 20, 30],
            memory_kb: vec![1000, 1100, 1200],
        };
        assert!(!skewed.is_aligned());
    }

    #[test]
    fn test_missing_fields_default() {
        // A minimal runner log parses; everything else zeroes out.
        let record: TelemetryRecord =
            serde_json::from_str(r#"{"pid": 4242, "program": "./samples/quick_exit"}"#).unwrap();

        assert_eq!(record.pid, 4242);
        assert_eq!(record.profile, "");
        assert!(record.timeline.is_empty());
        assert_eq!(record.summary.runtime_ms, 0);
        assert_eq!(record.summary.blocked_syscall, "");
    }

    #[test]
    fn test_strict_profile_check() {
        let record = TelemetryRecord {
            profile: PROFILE_STRICT.to_string(),
            ..Default::default()
        };
        assert!(record.is_strict_profile());

        let learning = TelemetryRecord {
            profile: PROFILE_LEARNING.to_string(),
            ..Default::default()
        };
        assert!(!learning.is_strict_profile());
    }
}
