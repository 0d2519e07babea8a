//! Risk Scoring Rules & Weights
//!
//! Transparent, documented scoring constants. No scoring logic here.

use crate::analysis::Behavior;

// ============================================================================
// BEHAVIOR WEIGHTS
// ============================================================================

/// Compute-intensive, but not inherently malicious
pub const WEIGHT_SUSTAINED_HIGH_CPU: u32 = 15;

/// Memory leak or resource exhaustion attempt
pub const WEIGHT_MONOTONIC_MEMORY_GROWTH: u32 = 25;

/// Excessive I/O or syscall flooding
pub const WEIGHT_HIGH_IO_SYSCALL_RATE: u32 = 20;

/// Attempted unauthorized syscall
pub const WEIGHT_POLICY_VIOLATION: u32 = 40;

/// Fixed base weight for a detected behavior.
///
/// Exhaustive over the taxonomy: adding a behavior without a weight is a
/// compile error, not a silent zero.
pub fn base_weight(behavior: Behavior) -> u32 {
    match behavior {
        Behavior::SustainedHighCpu => WEIGHT_SUSTAINED_HIGH_CPU,
        Behavior::MonotonicMemoryGrowth => WEIGHT_MONOTONIC_MEMORY_GROWTH,
        Behavior::HighIoSyscallRate => WEIGHT_HIGH_IO_SYSCALL_RATE,
        Behavior::PolicyViolation => WEIGHT_POLICY_VIOLATION,
    }
}

// ============================================================================
// MULTIPLIERS
// ============================================================================

/// Policy violation under the STRICT profile (maximum enforcement)
pub const STRICT_VIOLATION_MULTIPLIER: f64 = 1.5;

/// Exactly 2 behaviors detected
pub const COMBINED_BEHAVIORS_MULTIPLIER: f64 = 1.2;

/// 3+ behaviors detected; takes precedence over the 2-behavior multiplier,
/// never stacks with it
pub const MULTI_COMBINED_MULTIPLIER: f64 = 1.5;

// ============================================================================
// CLASSIFICATION THRESHOLDS
// ============================================================================

/// Scores at or below this are NORMAL
pub const THRESHOLD_NORMAL: u32 = 30;

/// Scores at or below this (and above normal) are SUSPICIOUS; above is
/// MALICIOUS
pub const THRESHOLD_SUSPICIOUS: u32 = 60;

/// Score ceiling after clamping
pub const MAX_SCORE: u32 = 100;

// ============================================================================
// METHODOLOGY
// ============================================================================

/// Static description of the scoring methodology, displayed verbatim by
/// report surfaces.
pub fn methodology() -> String {
    format!(
        "SCORING METHODOLOGY:\n\
         1. Base Score: Each detected behavior adds fixed weight\n\
         \x20  - SUSTAINED_HIGH_CPU: +{WEIGHT_SUSTAINED_HIGH_CPU} points\n\
         \x20  - MONOTONIC_MEMORY_GROWTH: +{WEIGHT_MONOTONIC_MEMORY_GROWTH} points\n\
         \x20  - HIGH_IO_SYSCALL_RATE: +{WEIGHT_HIGH_IO_SYSCALL_RATE} points\n\
         \x20  - POLICY_VIOLATION: +{WEIGHT_POLICY_VIOLATION} points\n\
         \n\
         2. Multipliers (amplify risk for compounding factors)\n\
         \x20  - Policy violation in STRICT: x{STRICT_VIOLATION_MULTIPLIER}\n\
         \x20  - 2+ behaviors: x{COMBINED_BEHAVIORS_MULTIPLIER}\n\
         \x20  - 3+ behaviors: x{MULTI_COMBINED_MULTIPLIER}\n\
         \n\
         3. Final Score: (Base Score x Multiplier) clamped to 0-{MAX_SCORE}\n\
         \n\
         4. Classification:\n\
         \x20  - 0-{THRESHOLD_NORMAL}: NORMAL\n\
         \x20  - {}-{THRESHOLD_SUSPICIOUS}: SUSPICIOUS\n\
         \x20  - {}-{MAX_SCORE}: MALICIOUS",
        THRESHOLD_NORMAL + 1,
        THRESHOLD_SUSPICIOUS + 1,
    )
}
