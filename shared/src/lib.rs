//! # Facet Shared
//! Objects, components and the sync wire format shared between
//! facet-server & facet-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use facet_serde::{
    read_chunk, write_chunk, BufferBoundsError, ByteBuffer, Chunk, ChunkTag, ConstByteLength,
    Serde, SerdeErr,
};

mod constants;
mod persist;
mod sync;
mod tick;
mod types;
mod world;

pub use constants::{DEFAULT_MAX_PACKET_BYTES, PERSIST_FORMAT_VERSION, PROTOCOL_VERSION};
pub use persist::{
    error::PersistError,
    object_store::{load_objects, save_objects, HEADER_TAG, OBJECT_TAG},
};
pub use sync::{
    config::SyncConfig,
    error::SyncError,
    message::{SyncMessage, MESSAGE_FRAME_BYTES},
    message_type::SyncMessageType,
    packet::{PacketHeader, PacketReader},
    packet_writer::PacketWriter,
};
pub use tick::{tick_diff, tick_is_newer, tick_is_older};
pub use types::{HostType, ObjectId, TemplateId, Tick};
pub use world::{
    component::{
        component::Component,
        component_kind::ComponentKind,
        error::{ComponentError, ConstructError},
        health::Health,
        lifespan::Lifespan,
        position::Position,
        replicate::Replicate,
    },
    object::{
        error::ObjectError, id_generator::ObjectIdGenerator, object::Object,
        object_record::ObjectRecord, object_table::ObjectTable,
    },
    stat::{
        error::TemplateError,
        object_template::ObjectTemplate,
        stat_definition::{HealthStat, LifespanStat, PositionStat, StatDefinition},
        template_registry::TemplateRegistry,
    },
};
