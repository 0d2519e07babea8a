//! Execution Identity
//!
//! OS pids recycle, so they cannot key anything that outlives a process.
//! Identity is minted here at ingestion as a UUID; the pid survives only
//! as a descriptive field on the telemetry record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::TelemetryRecord;

// ============================================================================
// EXECUTION ID
// ============================================================================

/// Globally unique identifier for one ingested execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(Uuid);

impl ExecutionId {
    /// Mint a fresh id. Called once per ingested record.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// EXECUTION RECORD
// ============================================================================

/// A telemetry record bound to its execution identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: ExecutionId,
    pub telemetry: TelemetryRecord,
}

impl ExecutionRecord {
    /// Take ownership of a runner record and assign it an identity.
    pub fn ingest(telemetry: TelemetryRecord) -> Self {
        let id = ExecutionId::generate();
        if !telemetry.timeline.is_aligned() {
            log::warn!(
                "execution {} (pid {}): timeline sequences are not aligned ({}/{}/{} samples)",
                id,
                telemetry.pid,
                telemetry.timeline.time_ms.len(),
                telemetry.timeline.cpu_percent.len(),
                telemetry.timeline.memory_kb.len()
            );
        }
        log::debug!(
            "ingested execution {} (pid {}, program {}, profile {})",
            id,
            telemetry.pid,
            telemetry.program,
            telemetry.profile
        );
        Self { id, telemetry }
    }
}

// ============================================================================
// TESTS
// ============================================================================
