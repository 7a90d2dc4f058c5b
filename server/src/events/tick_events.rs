use std::vec::IntoIter;

use facet_shared::{ObjectId, SyncError};

/// What happened to the world during one `Server::tick`, plus any client
/// messages rejected since the previous tick
pub struct TickEvents {
    depleted: Vec<ObjectId>,
    expired: Vec<ObjectId>,
    rejected: Vec<SyncError>,
    empty: bool,
}

impl TickEvents {
    pub(crate) fn new() -> Self {
        Self {
            depleted: Vec::new(),
            expired: Vec::new(),
            rejected: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: TickEventType>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: TickEventType>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_depleted(&mut self, object: ObjectId) {
        self.depleted.push(object);
        self.empty = false;
    }

    pub(crate) fn push_expired(&mut self, object: ObjectId) {
        self.expired.push(object);
        self.empty = false;
    }

    pub(crate) fn push_rejected(&mut self, error: SyncError) {
        self.rejected.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait TickEventType {
    type Iter;

    fn iter(events: &mut TickEvents) -> Self::Iter;

    fn has(events: &TickEvents) -> bool;
}

// Depleted Event
/// Objects whose Health reached zero this tick
pub struct DepletedEvent;
impl TickEventType for DepletedEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.depleted);
        IntoIterator::into_iter(list)
    }

    fn has(events: &TickEvents) -> bool {
        !events.depleted.is_empty()
    }
}

// Expired Event
/// Objects whose Lifespan ran out this tick
pub struct ExpiredEvent;
impl TickEventType for ExpiredEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.expired);
        IntoIterator::into_iter(list)
    }

    fn has(events: &TickEvents) -> bool {
        !events.expired.is_empty()
    }
}

// Rejected Event
pub struct RejectedEvent;
impl TickEventType for RejectedEvent {
    type Iter = IntoIter<SyncError>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.rejected);
        IntoIterator::into_iter(list)
    }

    fn has(events: &TickEvents) -> bool {
        !events.rejected.is_empty()
    }
}
