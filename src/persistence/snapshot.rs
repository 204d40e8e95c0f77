//! Serializable snapshots of motion state.

use super::error::SnapshotError;
use super::EntityId;
use crate::core::{Phase, Pose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Runtime fields of a motion machine.
///
/// Phase bounds (origin and target poses) are deliberately absent: they are
/// recomputed from the restored pose on load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuntimeData {
    pub phase: Phase,
    pub position_index: u8,
    /// Seconds spent in the current phase
    pub elapsed: f32,
    pub phase_duration: f32,
    pub paused: bool,
    pub stopped: bool,
    pub remaining_ticks: i32,
    pub infinite_ticks: bool,
}

/// Serializable snapshot of a moving entity.
/// Does NOT include the curve evaluator or event handlers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Entity the snapshot belongs to
    pub id: EntityId,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    /// Pose at save time
    pub pose: Pose,

    pub active: bool,
    pub enabled: bool,

    pub runtime: RuntimeData,
}

impl MotionSnapshot {
    /// Check format version and internal consistency.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let runtime = &self.runtime;
        if runtime.position_index > 1 {
            return Err(SnapshotError::ValidationFailed(format!(
                "position index {} out of range",
                runtime.position_index
            )));
        }
        if !runtime.elapsed.is_finite() || runtime.elapsed < 0.0 {
            return Err(SnapshotError::ValidationFailed(format!(
                "elapsed time {} is not a non-negative finite number",
                runtime.elapsed
            )));
        }
        if runtime.phase.is_final() && (runtime.infinite_ticks || runtime.remaining_ticks > 0) {
            return Err(SnapshotError::ValidationFailed(
                "completed motion still has ticks remaining".to_string(),
            ));
        }
        if !runtime.phase.is_final() && !runtime.infinite_ticks && runtime.remaining_ticks < 1 {
            return Err(SnapshotError::ValidationFailed(format!(
                "running motion has no ticks left ({})",
                runtime.remaining_ticks
            )));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}
