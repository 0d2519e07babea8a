//! Analysis Module
//!
//! Stage one of the pipeline: turn a raw telemetry record into a set of
//! named, evidence-backed behavior detections plus a coarse risk tier.
//!
//! ## Structure
//! - `types`: Behavior taxonomy, metrics, ExecutionAnalysis
//! - `rules`: Detection thresholds
//! - `detectors`: The four stateless rule evaluators
//! - `analyzer`: Orchestration + result cache

pub mod types;
pub mod rules;
pub mod detectors;
pub mod analyzer;

pub use types::{
    AnalysisMetrics, Behavior, CpuMetrics, Detection, DetectionMetrics, ExecutionAnalysis,
    IoMetrics, MemoryMetrics, PolicyMetrics, RiskLevel,
};

pub use rules::DetectionThresholds;

pub use detectors::{
    detect_io_rate, detect_memory_growth, detect_policy_violation, detect_sustained_cpu,
};

pub use analyzer::BehavioralAnalyzer;
