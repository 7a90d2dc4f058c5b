use std::vec::IntoIter;

use facet_shared::{ComponentKind, Object, ObjectId, SyncError};

/// Everything one `Client::tick` applied, in arrival order per kind
pub struct ClientEvents {
    spawns: Vec<ObjectId>,
    despawns: Vec<(ObjectId, Object)>,
    updates: Vec<(ObjectId, ComponentKind)>,
    snapshots: Vec<ObjectId>,
    rejected: Vec<SyncError>,
    empty: bool,
}

impl Default for ClientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            despawns: Vec::new(),
            updates: Vec::new(),
            snapshots: Vec::new(),
            rejected: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ClientEventType>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ClientEventType>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_spawn(&mut self, object: ObjectId) {
        self.spawns.push(object);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, object: ObjectId, removed: Object) {
        self.despawns.push((object, removed));
        self.empty = false;
    }

    pub(crate) fn push_update(&mut self, object: ObjectId, kind: ComponentKind) {
        self.updates.push((object, kind));
        self.empty = false;
    }

    pub(crate) fn push_snapshot(&mut self, object: ObjectId) {
        self.snapshots.push(object);
        self.empty = false;
    }

    pub(crate) fn push_rejected(&mut self, error: SyncError) {
        self.rejected.push(error);
        self.empty = false;
    }
}

pub trait ClientEventType {
    type Iter;

    fn iter(events: &mut ClientEvents) -> Self::Iter;

    fn has(events: &ClientEvents) -> bool;
}

pub struct SpawnEvent;
impl ClientEventType for SpawnEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.spawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.spawns.is_empty()
    }
}

/// Yields the removed Object along with its id
pub struct DespawnEvent;
impl ClientEventType for DespawnEvent {
    type Iter = IntoIter<(ObjectId, Object)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.despawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.despawns.is_empty()
    }
}

pub struct UpdateEvent;
impl ClientEventType for UpdateEvent {
    type Iter = IntoIter<(ObjectId, ComponentKind)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.updates);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.updates.is_empty()
    }
}

pub struct SnapshotEvent;
impl ClientEventType for SnapshotEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.snapshots);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.snapshots.is_empty()
    }
}

/// Messages or packets that were refused, with the reason
pub struct RejectedEvent;
impl ClientEventType for RejectedEvent {
    type Iter = IntoIter<SyncError>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.rejected);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.rejected.is_empty()
    }
}
