/// Bumped whenever any component's field order or width changes. Peers
/// with different versions refuse each other's packets instead of
/// misreading payloads.
pub const PROTOCOL_VERSION: u16 = 1;

/// Conservative payload size that fits in a single UDP datagram on most
/// links.
pub const DEFAULT_MAX_PACKET_BYTES: usize = 1200;

/// Format version written at the head of persisted object files
pub const PERSIST_FORMAT_VERSION: u16 = 1;
