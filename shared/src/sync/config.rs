use crate::constants::{DEFAULT_MAX_PACKET_BYTES, PROTOCOL_VERSION};

/// Contains settings shared by both ends of the sync link
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Upper bound on the size of one encoded packet, header included.
    /// Messages are spread over as many packets as needed to stay under it.
    pub max_packet_bytes: usize,
    /// Version written into every packet header. Packets carrying any
    /// other version are refused whole.
    pub protocol_version: u16,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_packet_bytes: DEFAULT_MAX_PACKET_BYTES,
            protocol_version: PROTOCOL_VERSION,
        }
    }
}
