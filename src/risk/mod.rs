//! Risk Module
//!
//! Stage two of the pipeline: deterministic, explainable risk scoring
//! over a behavioral analysis.
//!
//! ## Structure
//! - `types`: RiskClass, contributions, RiskScoreResult
//! - `rules`: Weights, multipliers, thresholds, methodology text
//! - `scorer`: Scoring logic + result cache

pub mod types;
pub mod rules;
pub mod scorer;

pub use types::{
    Contribution, ContributionSource, ContributionWeight, RiskClass, RiskScoreResult,
};

pub use rules::{
    base_weight, methodology, COMBINED_BEHAVIORS_MULTIPLIER, MAX_SCORE,
    MULTI_COMBINED_MULTIPLIER, STRICT_VIOLATION_MULTIPLIER, THRESHOLD_NORMAL,
    THRESHOLD_SUSPICIOUS,
};

pub use scorer::{classify, RiskScorer};
