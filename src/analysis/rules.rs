//! Behavior Detection Rules & Thresholds
//!
//! Thresholds for the four behavior detectors. No detection logic here,
//! only constants and config. Defaults were calibrated against the
//! sandbox test corpus (cpu_stress held 100%+, memory_leak grew ~15 KB
//! per sample, syscall_flood pushed thousands of syscalls per 100ms).

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (Constants - fixed at runtime)
// ============================================================================

/// CPU percent at or above which a sample counts as "high"
pub const SUSTAINED_CPU_THRESHOLD: u32 = 80;

/// High samples required before SUSTAINED_HIGH_CPU fires
pub const SUSTAINED_CPU_MIN_SAMPLES: usize = 5;

/// Memory samples required before growth analysis runs at all
pub const MEMORY_MIN_SAMPLES: usize = 3;

/// Total growth (KB, last sample minus first) required for a detection
pub const MEMORY_GROWTH_THRESHOLD_KB: i64 = 10_000;

/// Distinct growth events required; rejects noisy-but-flat series
pub const MEMORY_MIN_GROWTH_STEPS: usize = 3;

/// I/O syscalls per 100ms above which HIGH_IO_SYSCALL_RATE fires
pub const IO_RATE_THRESHOLD: f64 = 100.0;

/// What a normal program does, kept for the explanatory ratio text
pub const IO_BASELINE_PER_100MS: u32 = 5;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Detection thresholds (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionThresholds {
    /// Sample counts as high CPU at or above this percent
    pub sustained_cpu_threshold: u32,
    /// High samples required to fire
    pub sustained_cpu_min_samples: usize,
    /// Minimum memory samples for growth analysis
    pub memory_min_samples: usize,
    /// Required total growth in KB
    pub memory_growth_threshold_kb: i64,
    /// Required distinct growth events
    pub memory_min_growth_steps: usize,
    /// I/O syscalls per 100ms above which to fire
    pub io_rate_threshold: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            sustained_cpu_threshold: SUSTAINED_CPU_THRESHOLD,
            sustained_cpu_min_samples: SUSTAINED_CPU_MIN_SAMPLES,
            memory_min_samples: MEMORY_MIN_SAMPLES,
            memory_growth_threshold_kb: MEMORY_GROWTH_THRESHOLD_KB,
            memory_min_growth_steps: MEMORY_MIN_GROWTH_STEPS,
            io_rate_threshold: IO_RATE_THRESHOLD,
        }
    }
}

impl DetectionThresholds {
    /// High sensitivity - lower thresholds, more detections
    pub fn high_sensitivity() -> Self {
        Self {
            sustained_cpu_threshold: 70,
            sustained_cpu_min_samples: 3,
            memory_growth_threshold_kb: 5_000,
            io_rate_threshold: 50.0,
            ..Default::default()
        }
    }

    /// Low sensitivity - higher thresholds, fewer detections
    pub fn low_sensitivity() -> Self {
        Self {
            sustained_cpu_threshold: 90,
            sustained_cpu_min_samples: 8,
            memory_growth_threshold_kb: 50_000,
            io_rate_threshold: 500.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let t = DetectionThresholds::default();
        assert_eq!(t.sustained_cpu_threshold, SUSTAINED_CPU_THRESHOLD);
        assert_eq!(t.sustained_cpu_min_samples, SUSTAINED_CPU_MIN_SAMPLES);
        assert_eq!(t.memory_growth_threshold_kb, MEMORY_GROWTH_THRESHOLD_KB);
        assert_eq!(t.io_rate_threshold, IO_RATE_THRESHOLD);
    }

    #[test]
    fn test_sensitivity_presets_bracket_default() {
        let default = DetectionThresholds::default();
        let high = DetectionThresholds::high_sensitivity();
        let low = DetectionThresholds::low_sensitivity();

        assert!(high.sustained_cpu_threshold < default.sustained_cpu_threshold);
        assert!(low.sustained_cpu_threshold > default.sustained_cpu_threshold);
        assert!(high.io_rate_threshold < low.io_rate_threshold);
    }
}
