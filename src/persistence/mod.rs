//! Save and restore of runtime motion state.
//!
//! Entities that can be checkpointed implement [`Saveable`]. A
//! [`SaveRegistry`] is the explicit per-world service that tracks which
//! entities take part in saving, hands out identities, and keeps the latest
//! snapshot captured for each of them.
//!
//! Snapshots hold plain data only. Curve evaluators and event handlers are
//! never persisted; they belong to the live entity and survive a restore.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod error;
pub mod registry;
pub mod snapshot;

pub use error::SnapshotError;
pub use registry::SaveRegistry;
pub use snapshot::{MotionSnapshot, RuntimeData, SNAPSHOT_VERSION};

/// Unique identity of a saveable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An entity whose runtime state can be captured and restored.
pub trait Saveable {
    /// Flat, serializable copy of the entity's runtime state.
    type Snapshot: Clone;

    /// Identity used to match snapshots to entities.
    fn id(&self) -> Option<EntityId>;

    /// Assign the identity. Called by the registry on registration.
    fn assign_id(&mut self, id: EntityId);

    /// Capture the current state.
    fn save(&self) -> Result<Self::Snapshot, SnapshotError>;

    /// Replace the current state with a captured one.
    fn load(&mut self, snapshot: &Self::Snapshot) -> Result<(), SnapshotError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn entity_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = EntityId::from_uuid(uuid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
        assert_eq!(deserialized.as_uuid(), &uuid);
    }
}
