//! Aggregation Module
//!
//! Multi-execution summary views: comparison, score distribution,
//! per-profile statistics, timeline comparison. Pure composition over
//! the analyzer and scorer; no detection logic of its own.

pub mod stats;
pub mod types;
pub mod service;

pub use types::{
    ComparisonReport, DistributionBuckets, ProfileRiskStats, RiskDistribution,
    TimelineComparison, TimelineMetric, TimelineSeries, INSUFFICIENT_COMPARISON,
};

pub use service::AggregationService;
