use std::collections::{BTreeSet, HashSet};

use log::trace;

use facet_shared::{ObjectId, ObjectTable, PacketWriter, SyncConfig, SyncError, SyncMessage, Tick};

/// Lifecycle traffic waiting for the next `Server::collect_outgoing`.
///
/// Component changes are not queued here; they live as dirty flags on the
/// Objects themselves and are picked up when the queue is drained.
#[derive(Debug, Default)]
pub struct OutgoingQueue {
    spawns: Vec<ObjectId>,
    despawns: Vec<ObjectId>,
    snapshots: BTreeSet<ObjectId>,
    snapshot_everything: bool,
}

impl OutgoingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_spawn(&mut self, object: ObjectId) {
        self.spawns.push(object);
    }

    /// An Object despawned before its spawn went out is never announced
    pub fn queue_despawn(&mut self, object: ObjectId) {
        self.snapshots.remove(&object);
        if let Some(index) = self.spawns.iter().position(|spawn| *spawn == object) {
            self.spawns.remove(index);
            return;
        }
        self.despawns.push(object);
    }

    pub fn queue_snapshot(&mut self, object: ObjectId) {
        self.snapshots.insert(object);
    }

    pub fn queue_snapshot_all(&mut self) {
        self.snapshot_everything = true;
    }

    pub fn is_spawn_pending(&self, object: ObjectId) -> bool {
        self.spawns.contains(&object)
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
            && self.despawns.is_empty()
            && self.snapshots.is_empty()
            && !self.snapshot_everything
    }

    /// Drains the queue and every dirty flag in `objects` into packets.
    ///
    /// Order: despawns as queued, spawns as queued, then per Object in id
    /// order either one Snapshot (requested, or components were added or
    /// removed) or one Update per dirty slot.
    pub fn drain(
        &mut self,
        objects: &mut ObjectTable,
        config: &SyncConfig,
        tick: Tick,
    ) -> Result<Vec<Vec<u8>>, SyncError> {
        let mut messages: Vec<SyncMessage> = self
            .despawns
            .drain(..)
            .map(|object| SyncMessage::Despawn { object })
            .collect();

        let mut spawned = HashSet::new();
        for id in self.spawns.drain(..) {
            if let Some(object) = objects.get_mut(id) {
                messages.push(SyncMessage::spawn(object));
                object.clear_dirty();
                spawned.insert(id);
            }
        }

        for object in objects.iter_mut() {
            let id = object.id();
            if spawned.contains(&id) {
                continue;
            }

            if self.snapshot_everything || self.snapshots.contains(&id) || object.structure_changed() {
                messages.push(SyncMessage::snapshot(object));
                object.clear_dirty();
                continue;
            }

            for kind in object.take_dirty() {
                messages.push(SyncMessage::update(object, kind)?);
            }
        }
        self.snapshots.clear();
        self.snapshot_everything = false;

        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = PacketWriter::new(config, tick);
        for message in &messages {
            writer.push(message)?;
        }
        let packets = writer.finish();
        trace!(
            "Tick {}: {} messages in {} packets",
            tick,
            messages.len(),
            packets.len()
        );
        Ok(packets)
    }
}
