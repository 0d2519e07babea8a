//! Behavior Detectors
//!
//! Four independent, stateless rule evaluators. Each is a pure function
//! over one telemetry record: insufficient data means no detection, never
//! an error. Evaluation order (CPU, Memory, I/O, Policy) is fixed by the
//! analyzer.

use crate::telemetry::TelemetryRecord;

use super::rules::{DetectionThresholds, IO_BASELINE_PER_100MS};
use super::types::{
    Behavior, CpuMetrics, Detection, DetectionMetrics, IoMetrics, MemoryMetrics, PolicyMetrics,
};

// ============================================================================
// CPU DETECTOR
// ============================================================================

/// Detect sustained high CPU usage.
///
/// Counts samples at or above the threshold; fires once enough samples
/// qualify, regardless of whether they are consecutive.
pub fn detect_sustained_cpu(
    record: &TelemetryRecord,
    thresholds: &DetectionThresholds,
) -> Option<Detection> {
    let samples = &record.timeline.cpu_percent;
    if samples.is_empty() {
        return None;
    }

    let sustained_samples = samples
        .iter()
        .filter(|&&cpu| cpu >= thresholds.sustained_cpu_threshold)
        .count();

    if sustained_samples < thresholds.sustained_cpu_min_samples {
        return None;
    }

    let total_samples = samples.len();
    let sustained_percentage = (sustained_samples as f64 / total_samples as f64) * 100.0;
    let peak_cpu = record.summary.peak_cpu;

    let explanation = format!(
        "Process maintained CPU usage >={}% for {} of {} samples ({:.0}%). \
         Peak: {}%. This indicates compute-intensive activity (e.g., CPU stress test). \
         Source: /proc/[pid]/stat (delta-based calculation across 100ms samples).",
        thresholds.sustained_cpu_threshold,
        sustained_samples,
        total_samples,
        sustained_percentage,
        peak_cpu
    );

    Some(Detection {
        behavior: Behavior::SustainedHighCpu,
        explanation,
        metrics: DetectionMetrics::Cpu(CpuMetrics {
            peak_cpu,
            sustained_samples,
            total_samples,
            sustained_percentage,
        }),
    })
}

// ============================================================================
// MEMORY DETECTOR
// ============================================================================

/// Detect monotonic memory growth (leak indicator).
///
/// Requires both magnitude (total growth over the threshold) and a minimum
/// number of distinct growth events, so a noisy-but-flat series does not
/// qualify. Growth events are samples exceeding the running maximum.
pub fn detect_memory_growth(
    record: &TelemetryRecord,
    thresholds: &DetectionThresholds,
) -> Option<Detection> {
    let samples = &record.timeline.memory_kb;
    if samples.len() < thresholds.memory_min_samples {
        return None;
    }

    let first = samples[0];
    let last = samples[samples.len() - 1];
    let total_growth = last as i64 - first as i64;

    if total_growth <= thresholds.memory_growth_threshold_kb {
        return None;
    }

    let mut max_so_far = first;
    let mut growth_steps = 0usize;
    for &sample in &samples[1..] {
        if sample > max_so_far {
            growth_steps += 1;
            max_so_far = sample;
        }
    }

    if growth_steps < thresholds.memory_min_growth_steps {
        return None;
    }

    let peak_memory_kb = record.summary.peak_memory_kb;
    let page_faults_major = record.summary.page_faults_major;

    let explanation = format!(
        "Memory grew from {} KB to {} KB ({} KB peak). Total growth: {} KB. \
         Memory increased in {} steps across {} samples. Major page faults: {}. \
         This pattern is characteristic of progressive resource allocation or memory leak. \
         Source: /proc/[pid]/status (VmPeak field) and /proc/[pid]/stat (page fault counters).",
        first,
        last,
        peak_memory_kb,
        total_growth,
        growth_steps,
        samples.len(),
        page_faults_major
    );

    Some(Detection {
        behavior: Behavior::MonotonicMemoryGrowth,
        explanation,
        metrics: DetectionMetrics::Memory(MemoryMetrics {
            peak_memory_kb,
            starting_memory_kb: first,
            ending_memory_kb: last,
            total_growth_kb: total_growth,
            growth_steps,
            total_samples: samples.len(),
            page_faults_major,
        }),
    })
}

// ============================================================================
// I/O DETECTOR
// ============================================================================

/// Detect an abnormally high I/O syscall rate.
///
/// The rate is normalized to syscalls per 100ms. Zero runtime resolves to
/// rate 0 rather than dividing by zero.
pub fn detect_io_rate(
    record: &TelemetryRecord,
    thresholds: &DetectionThresholds,
) -> Option<Detection> {
    let read_syscalls = record.summary.read_syscalls;
    let write_syscalls = record.summary.write_syscalls;
    let runtime_ms = record.summary.runtime_ms;
    let total_io_syscalls = record.summary.total_io_syscalls();

    let syscalls_per_100ms = if runtime_ms > 0 {
        (total_io_syscalls as f64 / runtime_ms as f64) * 100.0
    } else {
        0.0
    };

    if syscalls_per_100ms <= thresholds.io_rate_threshold {
        return None;
    }

    let baseline_ratio = syscalls_per_100ms / IO_BASELINE_PER_100MS as f64;
    let explanation = format!(
        "Detected {} I/O syscalls ({} reads + {} writes) in {}ms ({:.1} syscalls/100ms). \
         This exceeds normal baseline (~{} syscalls/100ms) by {:.1}x. \
         Indicates intensive I/O operation or syscall flooding. \
         Source: /proc/[pid]/io (syscr/syscw fields).",
        total_io_syscalls,
        read_syscalls,
        write_syscalls,
        runtime_ms,
        syscalls_per_100ms,
        IO_BASELINE_PER_100MS,
        baseline_ratio
    );

    Some(Detection {
        behavior: Behavior::HighIoSyscallRate,
        explanation,
        metrics: DetectionMetrics::Io(IoMetrics {
            read_syscalls,
            write_syscalls,
            total_io_syscalls,
            runtime_ms,
            syscalls_per_100ms,
            baseline_syscalls_per_100ms: IO_BASELINE_PER_100MS,
        }),
    })
}

// ============================================================================
// POLICY DETECTOR
// ============================================================================

/// Detect sandbox policy enforcement.
///
/// Fires when the exit reason carries a violation marker or any syscall
/// was blocked. The only detector with security-enforcement meaning.
pub fn detect_policy_violation(
    record: &TelemetryRecord,
    _thresholds: &DetectionThresholds,
) -> Option<Detection> {
    let summary = &record.summary;
    if !summary.exit_reason.contains("VIOLATION") && summary.blocked_syscalls == 0 {
        return None;
    }

    let blocked_detail = if summary.blocked_syscall.is_empty() {
        String::new()
    } else {
        format!(" (blocked: {})", summary.blocked_syscall)
    };

    let explanation = format!(
        "Process terminated due to policy enforcement. Exit reason: {}{}. \
         Total blocked syscalls: {}. Profile: {}. Signal: {} (SIG31 = SIGSYS from seccomp-BPF). \
         Indicates sandbox rules prevented unauthorized system call. \
         Source: Signal delivery from seccomp-BPF policy.",
        summary.exit_reason,
        blocked_detail,
        summary.blocked_syscalls,
        record.profile,
        summary.termination
    );

    Some(Detection {
        behavior: Behavior::PolicyViolation,
        explanation,
        metrics: DetectionMetrics::Policy(PolicyMetrics {
            exit_reason: summary.exit_reason.clone(),
            blocked_syscalls: summary.blocked_syscalls,
            blocked_syscall_name: summary.blocked_syscall.clone(),
            termination_signal: summary.termination.clone(),
            profile: record.profile.clone(),
        }),
    })
}

// ============================================================================
// TESTS
// ============================================================================
