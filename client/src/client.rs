use std::collections::{BTreeMap, BTreeSet};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use log::{debug, trace, warn};

use facet_shared::{
    tick_diff, tick_is_older, ByteBuffer, ComponentKind, HostType, Object, ObjectId, ObjectRecord,
    ObjectTable, PacketReader, PacketWriter, SyncError, SyncMessage, SyncMessageType,
    TemplateRegistry, Tick,
};

use crate::{events::ClientEvents, ClientConfig, FacetClientError};

/// How many ticks late a packet may arrive and still have its spawns,
/// snapshots and despawns applied. Older packets are dropped whole.
pub const STALE_PACKET_HORIZON: i16 = 1024;

/// Where a message came from
#[derive(Clone, Copy)]
struct IncomingPacket {
    tick: Tick,
    stale: bool,
}

/// Hands received packets to a Client from any thread
#[derive(Clone)]
pub struct IncomingSender {
    sender: Sender<Vec<u8>>,
}

impl IncomingSender {
    /// Queues one complete packet. Blocks while a bounded queue is full, so
    /// call it from a transport thread, never from the one running `tick`.
    pub fn send(&self, bytes: Vec<u8>) -> Result<(), FacetClientError> {
        self.sender
            .send(bytes)
            .map_err(|_| FacetClientError::QueueDisconnected)
    }
}

/// Holds the local copy of the server's Objects. Packets may be queued from
/// any thread; they are only applied inside `tick`.
pub struct Client {
    config: ClientConfig,
    registry: TemplateRegistry,
    objects: ObjectTable,
    incoming_sender: Sender<Vec<u8>>,
    incoming_receiver: Receiver<Vec<u8>>,
    newest_tick: Option<Tick>,
    missing_objects: BTreeSet<ObjectId>,
    lifecycle_ticks: BTreeMap<ObjectId, Tick>,
}

impl Client {
    /// Create a new Client
    pub fn new(config: ClientConfig, registry: TemplateRegistry) -> Self {
        let (incoming_sender, incoming_receiver) = match config.incoming_capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };

        Self {
            config,
            registry,
            objects: ObjectTable::new(),
            incoming_sender,
            incoming_receiver,
            newest_tick: None,
            missing_objects: BTreeSet::new(),
            lifecycle_ticks: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A handle a transport thread can push received packets through
    pub fn incoming(&self) -> IncomingSender {
        IncomingSender {
            sender: self.incoming_sender.clone(),
        }
    }

    /// Queues a packet from the simulation thread. Never blocks: a full
    /// bounded queue is reported as `QueueFull`, since only this thread
    /// drains it.
    pub fn receive(&self, bytes: Vec<u8>) -> Result<(), FacetClientError> {
        self.incoming_sender.try_send(bytes).map_err(|error| match error {
            TrySendError::Full(_) => FacetClientError::QueueFull {
                capacity: self.incoming_sender.capacity().unwrap_or_default(),
            },
            TrySendError::Disconnected(_) => FacetClientError::QueueDisconnected,
        })
    }

    /// Applies every queued packet in arrival order, then runs one update
    /// pass over the local Objects.
    ///
    /// A message that fails to apply is skipped, logged, and reported as a
    /// `RejectedEvent`. It never affects other messages or Objects.
    ///
    /// Packets may arrive out of order. Updates from a packet older than the
    /// newest one seen are dropped; its spawns and despawns still apply, in
    /// tick order per Object, so a late despawn is never lost.
    pub fn tick(&mut self, frame_time: f32) -> ClientEvents {
        let mut events = ClientEvents::new();

        while let Ok(bytes) = self.incoming_receiver.try_recv() {
            self.read_packet(bytes, &mut events);
        }

        self.objects.update(frame_time);
        // local updates only predict what the server will send
        for object in self.objects.iter_mut() {
            object.clear_dirty();
        }

        events
    }

    fn read_packet(&mut self, bytes: Vec<u8>, events: &mut ClientEvents) {
        let reader = match PacketReader::new(bytes, self.config.sync.protocol_version) {
            Ok(reader) => reader,
            Err(error) => {
                warn!("Rejected packet: {}", error);
                events.push_rejected(error);
                return;
            }
        };

        let tick = reader.tick();
        let stale = match self.newest_tick {
            Some(newest) if tick_is_older(tick, newest) => {
                if self.config.discard_stale_packets && tick_diff(tick, newest) > STALE_PACKET_HORIZON {
                    debug!("Discarding packet for tick {}, already at {}", tick, newest);
                    return;
                }
                true
            }
            _ => {
                self.newest_tick = Some(tick);
                false
            }
        };
        self.forget_old_lifecycles();

        let packet = IncomingPacket { tick, stale };
        for message in reader {
            let is_update = matches!(message, Ok(SyncMessage::Update { .. }));
            if is_update && packet.stale && self.config.discard_stale_packets {
                trace!("Dropping update from stale packet for tick {}", tick);
                continue;
            }

            if let Err(error) =
                message.and_then(|message| self.handle_message(message, packet, events))
            {
                warn!("Rejected message in packet for tick {}: {}", tick, error);
                if let SyncError::UnknownObject { object } = error {
                    // an update for an Object we never saw means its spawn was lost
                    if is_update && self.config.request_missing_snapshots {
                        self.missing_objects.insert(object);
                    }
                }
                events.push_rejected(error);
            }
        }
    }

    fn handle_message(
        &mut self,
        message: SyncMessage,
        packet: IncomingPacket,
        events: &mut ClientEvents,
    ) -> Result<(), SyncError> {
        if let Some(object) = message.lifecycle_object() {
            if self.is_superseded(object, packet.tick) {
                debug!(
                    "Ignoring {} for object {} from tick {}, a newer one was applied",
                    message.message_type(),
                    object,
                    packet.tick
                );
                return Ok(());
            }
        }

        match message {
            SyncMessage::Spawn(record) => {
                if self.objects.contains(record.object) {
                    return Err(SyncError::ObjectAlreadyExists {
                        object: record.object,
                    });
                }
                self.objects.insert(record.build(&self.registry)?)?;
                self.lifecycle_ticks.insert(record.object, packet.tick);
                self.missing_objects.remove(&record.object);
                trace!("Spawned object {}", record.object);
                events.push_spawn(record.object);
            }
            SyncMessage::Update {
                object,
                kind,
                mut payload,
            } => {
                self.apply_update(object, kind, &mut payload)?;
                events.push_update(object, kind);
            }
            SyncMessage::Snapshot(record) => {
                if packet.stale && self.objects.contains(record.object) {
                    trace!("Keeping newer state of object {} over stale snapshot", record.object);
                    return Ok(());
                }
                self.apply_snapshot(&record, events)?;
                self.lifecycle_ticks.insert(record.object, packet.tick);
            }
            SyncMessage::Despawn { object } => {
                // remembered even when unknown, so an older spawn cannot revive it
                self.lifecycle_ticks.insert(object, packet.tick);
                let removed = self
                    .objects
                    .remove(object)
                    .ok_or(SyncError::UnknownObject { object })?;
                self.missing_objects.remove(&object);
                events.push_despawn(object, removed);
            }
            SyncMessage::RequestSnapshot { .. } => {
                return Err(SyncError::UnexpectedMessage {
                    message_type: SyncMessageType::RequestSnapshot,
                    receiver: HostType::Client,
                });
            }
        }
        Ok(())
    }

    /// Whether a spawn, snapshot or despawn from `tick` is older than the
    /// last one applied to `object`
    fn is_superseded(&self, object: ObjectId, tick: Tick) -> bool {
        self.config.discard_stale_packets
            && self
                .lifecycle_ticks
                .get(&object)
                .is_some_and(|&applied| tick_is_older(tick, applied))
    }

    fn forget_old_lifecycles(&mut self) {
        let Some(newest) = self.newest_tick else {
            return;
        };
        self.lifecycle_ticks
            .retain(|_, applied| tick_diff(*applied, newest) <= STALE_PACKET_HORIZON);
    }

    fn apply_update(
        &mut self,
        id: ObjectId,
        kind: ComponentKind,
        payload: &mut ByteBuffer,
    ) -> Result<(), SyncError> {
        let object = self
            .objects
            .get_mut(id)
            .ok_or(SyncError::UnknownObject { object: id })?;

        // refuse oversized payloads before anything is written
        if let Some(component) = object.get_component(kind) {
            let expected = component.byte_length();
            if payload.remaining() > expected {
                return Err(SyncError::TrailingBytes {
                    message_type: SyncMessageType::Update,
                    remaining: payload.remaining() - expected,
                });
            }
        }

        object.network_unserialize_component(kind, payload)?;
        Ok(())
    }

    fn apply_snapshot(
        &mut self,
        record: &ObjectRecord,
        events: &mut ClientEvents,
    ) -> Result<(), SyncError> {
        match self.objects.get_mut(record.object) {
            Some(object) => {
                record.apply_to(object, &self.registry)?;
                events.push_snapshot(record.object);
            }
            None => {
                debug!("Snapshot recreated missing object {}", record.object);
                self.objects.insert(record.build(&self.registry)?)?;
                events.push_spawn(record.object);
            }
        }
        self.missing_objects.remove(&record.object);
        Ok(())
    }

    // Outgoing

    /// A packet asking the server to resend one Object, or every Object
    /// when `object` is `None`
    pub fn request_snapshot(&self, object: Option<ObjectId>) -> Result<Vec<u8>, FacetClientError> {
        let mut writer = PacketWriter::new(&self.config.sync, self.newest_tick.unwrap_or(0));
        writer.push(&SyncMessage::RequestSnapshot { object })?;
        Ok(writer.finish().into_iter().next().unwrap_or_default())
    }

    /// Snapshot requests for Objects that updates referred to but this
    /// client never saw spawn
    pub fn collect_outgoing(&mut self) -> Result<Vec<Vec<u8>>, FacetClientError> {
        if self.missing_objects.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = PacketWriter::new(&self.config.sync, self.newest_tick.unwrap_or(0));
        for object in std::mem::take(&mut self.missing_objects) {
            debug!("Requesting snapshot of missing object {}", object);
            writer.push(&SyncMessage::RequestSnapshot {
                object: Some(object),
            })?;
        }
        Ok(writer.finish())
    }

    // Objects

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    /// Newest server tick applied so far
    pub fn server_tick(&self) -> Option<Tick> {
        self.newest_tick
    }
}
