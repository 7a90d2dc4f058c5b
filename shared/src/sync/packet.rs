use facet_serde::{ByteBuffer, ConstByteLength, Serde, SerdeErr};
use log::trace;

use crate::{
    sync::{error::SyncError, message::SyncMessage},
    types::Tick,
};

/// Leads every packet: `protocol_version: u16 | tick: u16 | message_count: u16`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacketHeader {
    pub protocol_version: u16,
    pub tick: Tick,
    pub message_count: u16,
}

impl Serde for PacketHeader {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.protocol_version);
        buffer.write(self.tick);
        buffer.write(self.message_count);
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        Ok(Self {
            protocol_version: buffer.read()?,
            tick: buffer.read()?,
            message_count: buffer.read()?,
        })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for PacketHeader {
    fn const_byte_length() -> usize {
        6
    }
}

/// Walks the messages of one received packet.
///
/// A message whose body fails to decode is yielded as an error and the walk
/// continues with the next one. A broken frame ends the walk, since the
/// position of the following message is unknown.
pub struct PacketReader {
    header: PacketHeader,
    buffer: ByteBuffer,
    read_count: u16,
    finished: bool,
}

impl PacketReader {
    /// Reads and checks the header. Packets from another protocol version
    /// are refused without looking at their messages.
    pub fn new(bytes: Vec<u8>, protocol_version: u16) -> Result<Self, SyncError> {
        let mut buffer = ByteBuffer::from_bytes(bytes);
        let header = PacketHeader::de(&mut buffer)?;
        if header.protocol_version != protocol_version {
            return Err(SyncError::VersionMismatch {
                expected: protocol_version,
                received: header.protocol_version,
            });
        }

        trace!(
            "Reading packet for tick {} with {} messages",
            header.tick,
            header.message_count
        );

        Ok(Self {
            header,
            buffer,
            read_count: 0,
            finished: false,
        })
    }

    pub fn header(&self) -> &PacketHeader {
        &self.header
    }

    pub fn tick(&self) -> Tick {
        self.header.tick
    }
}

impl Iterator for PacketReader {
    type Item = Result<SyncMessage, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.read_count == self.header.message_count {
            self.finished = true;
            if !self.buffer.is_exhausted() {
                return Some(Err(SyncError::TrailingPacketBytes {
                    remaining: self.buffer.remaining(),
                }));
            }
            return None;
        }

        self.read_count += 1;
        match SyncMessage::read_frame(&mut self.buffer) {
            Ok((tag, mut body)) => Some(SyncMessage::decode(tag, &mut body)),
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
