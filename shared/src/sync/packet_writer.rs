use facet_serde::{ByteBuffer, ConstByteLength, Serde};
use log::trace;

use crate::{
    sync::{config::SyncConfig, error::SyncError, message::SyncMessage, packet::PacketHeader},
    types::Tick,
};

/// Packs messages into as few packets as possible without letting any
/// packet grow past `SyncConfig::max_packet_bytes`.
///
/// Messages keep their push order across packets.
pub struct PacketWriter {
    protocol_version: u16,
    max_packet_bytes: usize,
    tick: Tick,
    current: ByteBuffer,
    current_count: u16,
    packets: Vec<Vec<u8>>,
}

impl PacketWriter {
    pub fn new(config: &SyncConfig, tick: Tick) -> Self {
        Self {
            protocol_version: config.protocol_version,
            max_packet_bytes: config.max_packet_bytes,
            tick,
            current: ByteBuffer::new(),
            current_count: 0,
            packets: Vec::new(),
        }
    }

    pub fn push(&mut self, message: &SyncMessage) -> Result<(), SyncError> {
        let mut encoded = ByteBuffer::with_capacity(message.byte_length());
        message.write(&mut encoded)?;

        let header_bytes = PacketHeader::const_byte_length();
        if header_bytes + encoded.len() > self.max_packet_bytes {
            return Err(SyncError::MessageTooLarge {
                message_type: message.message_type(),
                size: encoded.len(),
                max: self.max_packet_bytes,
            });
        }

        if header_bytes + self.current.len() + encoded.len() > self.max_packet_bytes
            || self.current_count == u16::MAX
        {
            self.flush();
        }

        self.current.write_bytes(encoded.as_bytes());
        self.current_count += 1;
        Ok(())
    }

    /// Whether nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty() && self.current_count == 0
    }

    fn flush(&mut self) {
        if self.current_count == 0 {
            return;
        }

        let header = PacketHeader {
            protocol_version: self.protocol_version,
            tick: self.tick,
            message_count: self.current_count,
        };
        let mut packet = ByteBuffer::with_capacity(header.byte_length() + self.current.len());
        header.ser(&mut packet);
        packet.write_bytes(self.current.as_bytes());

        trace!(
            "Closed packet for tick {} with {} messages ({} bytes)",
            self.tick,
            self.current_count,
            packet.len()
        );

        self.packets.push(packet.into_bytes());
        self.current.clear();
        self.current_count = 0;
    }

    /// Closes the open packet and returns every packet written
    pub fn finish(mut self) -> Vec<Vec<u8>> {
        self.flush();
        self.packets
    }
}
