use std::collections::HashSet;

use log::{debug, info, warn};

use facet_shared::{
    load_objects, save_objects, HostType, Health, Lifespan, Object, ObjectId, ObjectIdGenerator,
    ObjectTable, PacketReader, PacketWriter, SyncError, SyncMessage, TemplateId, TemplateRegistry, Tick,
};

use crate::{
    events::TickEvents,
    server::{OutgoingQueue, ServerConfig},
    FacetServerError,
};

/// The authoritative host. Owns every Object, steps their components once
/// per tick, and turns what changed into packets for clients.
pub struct Server {
    config: ServerConfig,
    registry: TemplateRegistry,
    objects: ObjectTable,
    id_generator: ObjectIdGenerator,
    outgoing: OutgoingQueue,
    tick: Tick,
    // Objects already reported, so each event fires once per transition
    reported_depleted: HashSet<ObjectId>,
    reported_expired: HashSet<ObjectId>,
    incoming_events: TickEvents,
}

impl Server {
    /// Create a new Server
    pub fn new(config: ServerConfig, registry: TemplateRegistry) -> Self {
        Self {
            config,
            registry,
            objects: ObjectTable::new(),
            id_generator: ObjectIdGenerator::new(),
            outgoing: OutgoingQueue::new(),
            tick: 0,
            reported_depleted: HashSet::new(),
            reported_expired: HashSet::new(),
            incoming_events: TickEvents::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The tick the next outgoing packets are stamped with
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    // Objects

    /// Builds a new Object from a registered template and queues its Spawn
    pub fn spawn(&mut self, template: TemplateId) -> Result<ObjectId, FacetServerError> {
        let template = self
            .registry
            .get(template)
            .ok_or(SyncError::UnknownTemplate { template })?;

        let id = self.id_generator.generate();
        let object = Object::from_template(id, template).map_err(SyncError::from)?;
        self.objects
            .insert(object)
            .map_err(|_| SyncError::ObjectAlreadyExists { object: id })?;
        self.outgoing.queue_spawn(id);

        debug!("Spawned object {} from {}", id, template.name());
        Ok(id)
    }

    /// Removes an Object and queues its Despawn
    pub fn despawn(&mut self, id: ObjectId) -> Result<Object, FacetServerError> {
        let object = self
            .objects
            .remove(id)
            .ok_or(SyncError::UnknownObject { object: id })?;
        self.forget(id);
        Ok(object)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Mutable access. Component changes made through it are sent on the
    /// next `collect_outgoing`.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    fn forget(&mut self, id: ObjectId) {
        self.outgoing.queue_despawn(id);
        self.reported_depleted.remove(&id);
        self.reported_expired.remove(&id);
    }

    // Simulation

    /// Runs one update pass over every Object, in id order, and reports
    /// what changed state
    pub fn tick(&mut self, frame_time: f32) -> TickEvents {
        self.objects.update(frame_time);

        let mut events = std::mem::replace(&mut self.incoming_events, TickEvents::new());
        let mut to_despawn = Vec::new();

        for object in self.objects.iter() {
            let id = object.id();

            let depleted = object.get::<Health>().is_some_and(Health::is_depleted);
            if depleted && self.reported_depleted.insert(id) {
                events.push_depleted(id);
                if self.config.despawn_depleted {
                    to_despawn.push(id);
                }
            } else if !depleted {
                self.reported_depleted.remove(&id);
            }

            let expired = object.get::<Lifespan>().is_some_and(Lifespan::is_expired);
            if expired && self.reported_expired.insert(id) {
                events.push_expired(id);
                if self.config.despawn_expired {
                    to_despawn.push(id);
                }
            } else if !expired {
                self.reported_expired.remove(&id);
            }
        }

        for id in to_despawn {
            if self.objects.remove(id).is_some() {
                debug!("Despawning object {} at end of life", id);
                self.forget(id);
            }
        }

        events
    }

    // Outgoing

    /// Packs queued spawns, despawns, requested snapshots and every dirty
    /// component into packets, then advances the tick
    pub fn collect_outgoing(&mut self) -> Result<Vec<Vec<u8>>, FacetServerError> {
        let packets = self
            .outgoing
            .drain(&mut self.objects, &self.config.sync, self.tick)?;
        self.tick = self.tick.wrapping_add(1);
        Ok(packets)
    }

    /// Spawn messages for every Object, for a client that has none of them
    /// yet. Does not touch dirty state.
    ///
    /// Objects whose spawn is still queued are left out; the next
    /// `collect_outgoing` announces them to every client. Call this right
    /// after `collect_outgoing`, so the new client is not sent despawns
    /// queued before it joined.
    pub fn snapshot_all(&self) -> Result<Vec<Vec<u8>>, FacetServerError> {
        let mut writer = PacketWriter::new(&self.config.sync, self.tick);
        for object in self.objects.iter() {
            if self.outgoing.is_spawn_pending(object.id()) {
                continue;
            }
            writer.push(&SyncMessage::spawn(object))?;
        }
        Ok(writer.finish())
    }

    // Incoming

    /// Reads a packet from a client. A packet from another protocol version
    /// is refused whole; bad messages inside a packet are skipped and
    /// reported as `RejectedEvent`s on the next tick.
    pub fn receive(&mut self, bytes: Vec<u8>) -> Result<(), FacetServerError> {
        let reader = PacketReader::new(bytes, self.config.sync.protocol_version)?;
        for message in reader {
            let result = message.and_then(|message| self.handle_message(message));
            if let Err(error) = result {
                warn!("Rejected client message: {}", error);
                self.incoming_events.push_rejected(error);
            }
        }
        Ok(())
    }

    fn handle_message(&mut self, message: SyncMessage) -> Result<(), SyncError> {
        match message {
            SyncMessage::RequestSnapshot { object: Some(object) } => {
                if !self.objects.contains(object) {
                    return Err(SyncError::UnknownObject { object });
                }
                self.outgoing.queue_snapshot(object);
            }
            SyncMessage::RequestSnapshot { object: None } => {
                self.outgoing.queue_snapshot_all();
            }
            other => {
                return Err(SyncError::UnexpectedMessage {
                    message_type: other.message_type(),
                    receiver: HostType::Server,
                });
            }
        }
        Ok(())
    }

    // Persistence

    pub fn save_world(&self) -> Result<Vec<u8>, FacetServerError> {
        Ok(save_objects(&self.objects)?)
    }

    /// Replaces every Object with those in `bytes`. Clients are sent
    /// despawns for the old Objects and spawns for the loaded ones.
    pub fn load_world(&mut self, bytes: &[u8]) -> Result<(), FacetServerError> {
        let loaded = load_objects(bytes, &self.registry)?;

        let old_ids: Vec<ObjectId> = self.objects.ids().collect();
        for id in old_ids {
            self.forget(id);
        }

        for id in loaded.ids() {
            self.id_generator.observe(id);
            self.outgoing.queue_spawn(id);
        }

        info!("Loaded world with {} objects", loaded.len());
        self.objects = loaded;
        Ok(())
    }
}
