//! Error handling
//!
//! The analytical core is total over well-typed input; the only
//! recognized failure is asking the aggregation boundary about an
//! execution it never ingested.

use crate::telemetry::ExecutionId;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    /// The execution id was never registered with the service
    #[error("execution {0} not found")]
    ExecutionNotFound(ExecutionId),
}
