//! Telemetry Module
//!
//! Input side of the pipeline: the immutable record the sandbox runner
//! produces, and the execution identity assigned when a record enters the
//! analytics core. No analysis logic lives here.

pub mod record;
pub mod execution;

pub use record::{ExecutionSummary, TelemetryRecord, Timeline, PROFILE_LEARNING, PROFILE_STRICT};
pub use execution::{ExecutionId, ExecutionRecord};
