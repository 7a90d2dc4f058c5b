use std::default::Default;

use facet_shared::SyncConfig;

/// Contains Config properties which will be used by a Client
#[derive(Clone)]
pub struct ClientConfig {
    /// Packet size and protocol version used when talking to the server
    pub sync: SyncConfig,
    /// Drop updates from packets stamped with a tick older than the newest
    /// one applied. Their spawns, snapshots and despawns still apply unless a
    /// newer one for the same Object already has.
    pub discard_stale_packets: bool,
    /// Ask the server for a snapshot of any Object an update referred to
    /// but this client does not have
    pub request_missing_snapshots: bool,
    /// Maximum number of packets waiting in the incoming queue. `None`
    /// leaves it unbounded.
    pub incoming_capacity: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            discard_stale_packets: true,
            request_missing_snapshots: true,
            incoming_capacity: None,
        }
    }
}
