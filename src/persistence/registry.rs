//! Per-world registry of saveable entities.

use super::error::SnapshotError;
use super::{EntityId, Saveable};
use std::collections::HashMap;

/// Explicit save/load service for one simulation world.
///
/// Entities register on activation and unregister on deactivation. The
/// registry stores at most one snapshot per registered entity: the latest
/// one captured (or inserted from storage).
///
/// # Example
///
/// ```rust
/// use shuttle::config::MotionConfig;
/// use shuttle::machine::MotionState;
/// use shuttle::persistence::{MotionSnapshot, SaveRegistry};
///
/// let mut registry: SaveRegistry<MotionSnapshot> = SaveRegistry::new();
/// let mut platform = MotionState::new(MotionConfig::default()).unwrap();
///
/// let id = platform.activate(&mut registry);
/// registry.capture(&platform).unwrap();
/// assert!(registry.query(id).is_some());
///
/// platform.advance_clock(0.5);
/// registry.restore(&mut platform).unwrap();
/// assert_eq!(platform.elapsed(), 0.0);
/// ```
#[derive(Debug)]
pub struct SaveRegistry<S> {
    slots: HashMap<EntityId, Option<S>>,
    order: Vec<EntityId>,
}

impl<S> Default for SaveRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SaveRegistry<S> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an entity, assigning a fresh identity if it has none.
    ///
    /// Registering an already registered entity is a no-op.
    pub fn register<T>(&mut self, entity: &mut T) -> EntityId
    where
        T: Saveable<Snapshot = S>,
    {
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = EntityId::new();
                entity.assign_id(id);
                id
            }
        };

        if !self.slots.contains_key(&id) {
            self.slots.insert(id, None);
            self.order.push(id);
            tracing::debug!(entity = %id, "Registered saveable entity");
        }
        id
    }

    /// Forget an entity and any snapshot held for it.
    /// Returns whether it was registered.
    pub fn unregister(&mut self, id: EntityId) -> bool {
        if self.slots.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|other| *other != id);
        tracing::debug!(entity = %id, "Unregistered saveable entity");
        true
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Registered identities in registration order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Latest snapshot held for an entity.
    pub fn query(&self, id: EntityId) -> Option<&S> {
        self.slots.get(&id).and_then(Option::as_ref)
    }

    /// Captured snapshots in registration order.
    pub fn snapshots(&self) -> impl Iterator<Item = (EntityId, &S)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.query(*id).map(|snapshot| (*id, snapshot)))
    }

    /// Store a snapshot obtained elsewhere, e.g. decoded from storage.
    pub fn insert(&mut self, id: EntityId, snapshot: S) -> Result<(), SnapshotError> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(SnapshotError::UnknownEntity(id))?;
        *slot = Some(snapshot);
        Ok(())
    }

    /// Drop every held snapshot, keeping registrations.
    pub fn clear_snapshots(&mut self) {
        for slot in self.slots.values_mut() {
            *slot = None;
        }
    }

    /// Save an entity's current state into its slot.
    pub fn capture<T>(&mut self, entity: &T) -> Result<(), SnapshotError>
    where
        T: Saveable<Snapshot = S>,
    {
        let id = entity.id().ok_or(SnapshotError::MissingIdentity)?;
        if !self.slots.contains_key(&id) {
            return Err(SnapshotError::UnknownEntity(id));
        }
        let snapshot = entity.save()?;
        self.insert(id, snapshot)
    }

    /// Load the snapshot held for an entity back into it.
    pub fn restore<T>(&self, entity: &mut T) -> Result<(), SnapshotError>
    where
        T: Saveable<Snapshot = S>,
    {
        let id = entity.id().ok_or(SnapshotError::MissingIdentity)?;
        let slot = self.slots.get(&id).ok_or(SnapshotError::UnknownEntity(id))?;
        let snapshot = slot.as_ref().ok_or(SnapshotError::NoSnapshot(id))?;
        entity.load(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        id: Option<EntityId>,
        value: u32,
    }

    impl Saveable for Counter {
        type Snapshot = u32;

        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn assign_id(&mut self, id: EntityId) {
            self.id = Some(id);
        }

        fn save(&self) -> Result<u32, SnapshotError> {
            Ok(self.value)
        }

        fn load(&mut self, snapshot: &u32) -> Result<(), SnapshotError> {
            self.value = *snapshot;
            Ok(())
        }
    }

    #[test]
    fn register_assigns_identity() {
        let mut registry = SaveRegistry::new();
        let mut counter = Counter::default();

        let id = registry.register(&mut counter);

        assert_eq!(counter.id, Some(id));
        assert!(registry.is_registered(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_keeps_existing_identity() {
        let mut registry = SaveRegistry::new();
        let existing = EntityId::new();
        let mut counter = Counter {
            id: Some(existing),
            value: 0,
        };

        assert_eq!(registry.register(&mut counter), existing);
        assert_eq!(registry.register(&mut counter), existing);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn capture_and_restore_round_trip_through_entity() {
        let mut registry = SaveRegistry::new();
        let mut counter = Counter::default();
        registry.register(&mut counter);

        counter.value = 7;
        registry.capture(&counter).unwrap();
        counter.value = 99;
        registry.restore(&mut counter).unwrap();

        assert_eq!(counter.value, 7);
    }

    #[test]
    fn capture_requires_registration() {
        let mut registry = SaveRegistry::new();
        let unregistered = Counter {
            id: Some(EntityId::new()),
            value: 1,
        };

        assert!(matches!(
            registry.capture(&unregistered),
            Err(SnapshotError::UnknownEntity(_))
        ));
        assert!(matches!(
            registry.capture(&Counter::default()),
            Err(SnapshotError::MissingIdentity)
        ));
    }

    #[test]
    fn restore_without_capture_reports_missing_snapshot() {
        let mut registry = SaveRegistry::new();
        let mut counter = Counter::default();
        let id = registry.register(&mut counter);

        match registry.restore(&mut counter) {
            Err(SnapshotError::NoSnapshot(missing)) => assert_eq!(missing, id),
            other => panic!("Expected NoSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn unregister_drops_snapshot() {
        let mut registry = SaveRegistry::new();
        let mut counter = Counter::default();
        let id = registry.register(&mut counter);
        registry.capture(&counter).unwrap();

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert!(registry.query(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshots_follow_registration_order() {
        let mut registry = SaveRegistry::new();
        let mut first = Counter {
            value: 1,
            ..Counter::default()
        };
        let mut second = Counter {
            value: 2,
            ..Counter::default()
        };
        let mut third = Counter {
            value: 3,
            ..Counter::default()
        };

        let a = registry.register(&mut first);
        let b = registry.register(&mut second);
        registry.register(&mut third);

        registry.capture(&second).unwrap();
        registry.capture(&first).unwrap();

        let captured: Vec<_> = registry.snapshots().map(|(id, v)| (id, *v)).collect();
        assert_eq!(captured, vec![(a, 1), (b, 2)]);

        registry.clear_snapshots();
        assert_eq!(registry.snapshots().count(), 0);
        assert_eq!(registry.len(), 3);
    }
}
