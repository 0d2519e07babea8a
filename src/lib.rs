//! Sandbox Execution Analytics Core
//!
//! Deterministic, explainable behavioral analysis of sandboxed process
//! executions. One completed telemetry record goes in; a set of named,
//! evidence-backed behavior detections and a bounded, fully-explained
//! risk score come out. No machine learning, no randomization: every
//! result is a pure function of the record, so a reviewer can see *why*
//! an execution was flagged.
//!
//! ## Pipeline
//! - `telemetry`: the immutable runner record + execution identity
//! - `analysis`: behavior detectors + the BehavioralAnalyzer
//! - `risk`: the RiskScorer (weights, multipliers, narrative)
//! - `aggregate`: multi-execution comparison and statistics views
//!
//! ## Usage
//! ```ignore
//! use sandbox_analytics_core::AggregationService;
//!
//! let service = AggregationService::new();
//! let id = service.ingest(record);
//! let score = service.score(id)?;
//! println!("{}", score.explanation);
//! ```

pub mod telemetry;
pub mod analysis;
pub mod risk;
pub mod aggregate;
pub mod error;

// Re-export main types for convenience
pub use telemetry::{ExecutionId, ExecutionRecord, TelemetryRecord};
pub use analysis::{Behavior, BehavioralAnalyzer, ExecutionAnalysis, RiskLevel};
pub use risk::{RiskClass, RiskScoreResult, RiskScorer};
pub use aggregate::AggregationService;
pub use error::{AnalyticsError, AnalyticsResult};
