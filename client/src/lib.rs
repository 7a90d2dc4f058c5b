//! # Facet Client
//! Keeps a local copy of the server's Objects, applying the packets it is
//! handed from any thread once per tick.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use facet_shared::{
        ByteBuffer, ComponentKind, Health, Lifespan, Object, ObjectId, ObjectTable, Position,
        Replicate, SyncConfig, SyncError, TemplateRegistry,
    };
}

mod client;
mod client_config;
mod error;
mod events;

pub use client::{Client, IncomingSender, STALE_PACKET_HORIZON};
pub use client_config::ClientConfig;
pub use error::FacetClientError;
pub use events::{
    ClientEventType, ClientEvents, DespawnEvent, RejectedEvent, SnapshotEvent, SpawnEvent,
    UpdateEvent,
};
