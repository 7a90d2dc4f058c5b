//! # Facet Server
//! Owns the authoritative set of Objects, runs their per-tick updates, and
//! syncs spawns, component changes and despawns to clients as packets.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use facet_shared::{
        ByteBuffer, ComponentKind, Health, HealthStat, Lifespan, LifespanStat, Object,
        ObjectTemplate, Position, PositionStat, Replicate, Serde, SerdeErr, SyncConfig,
        TemplateId, TemplateRegistry,
    };
}

mod error;
mod events;
mod server;

pub use error::FacetServerError;
pub use events::{DepletedEvent, ExpiredEvent, RejectedEvent, TickEventType, TickEvents};
pub use server::{OutgoingQueue, Server, ServerConfig};
