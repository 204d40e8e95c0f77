//! Snapshot error types.

use super::EntityId;
use thiserror::Error;

/// Errors that can occur while saving, restoring or encoding snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The entity has no identity yet; register it before saving
    #[error("Entity has no identity. Register it before saving")]
    MissingIdentity,

    /// The registry does not know this entity
    #[error("Entity {0} is not registered")]
    UnknownEntity(EntityId),

    /// The entity is registered but nothing was captured for it
    #[error("No snapshot captured for entity {0}")]
    NoSnapshot(EntityId),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data failed validation
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}
