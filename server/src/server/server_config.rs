use std::default::Default;

use facet_shared::SyncConfig;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Packet size and protocol version used when talking to clients
    pub sync: SyncConfig,
    /// Despawn Objects as soon as their Lifespan expires
    pub despawn_expired: bool,
    /// Despawn Objects as soon as their Health is depleted
    pub despawn_depleted: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            despawn_expired: true,
            despawn_depleted: false,
        }
    }
}
