use std::fmt;

use crate::{byte_buffer::ByteBuffer, error::SerdeErr, serde::Serde};

/// Four-character code identifying the contents of a [`Chunk`]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(u32);

impl ChunkTag {
    pub const fn new(code: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(code))
    }

    pub const fn code(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({})", self)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.code() {
            if byte.is_ascii_graphic() {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl Serde for ChunkTag {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.0);
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        Ok(Self(buffer.read::<u32>()?))
    }

    fn byte_length(&self) -> usize {
        4
    }
}

/// A tagged, length-prefixed block of bytes, used to frame persisted data.
///
/// Layout: `tag: u32 LE | length: u32 LE | payload`. Readers that do not
/// understand a tag can skip the chunk using its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: ChunkTag,
    pub payload: ByteBuffer,
}

impl Chunk {
    pub fn new(tag: ChunkTag, payload: ByteBuffer) -> Self {
        Self { tag, payload }
    }
}

impl Serde for Chunk {
    fn ser(&self, buffer: &mut ByteBuffer) {
        self.tag.ser(buffer);
        // payloads larger than u32::MAX are refused by write_chunk
        buffer.write(self.payload.len() as u32);
        buffer.write_bytes(self.payload.as_bytes());
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        let tag = ChunkTag::de(buffer)?;
        let length = buffer.read::<u32>()? as usize;
        let payload = buffer.read_buffer(length)?;
        Ok(Self { tag, payload })
    }

    fn byte_length(&self) -> usize {
        8 + self.payload.len()
    }
}

/// Writes `payload` into `buffer` as a chunk with the given tag
pub fn write_chunk(buffer: &mut ByteBuffer, tag: ChunkTag, payload: &[u8]) -> Result<(), SerdeErr> {
    let length = u32::try_from(payload.len()).map_err(|_| SerdeErr::LengthOverflow {
        type_name: "u32",
        length: payload.len(),
        max: u32::MAX as usize,
    })?;
    buffer.write(tag);
    buffer.write(length);
    buffer.write_bytes(payload);
    Ok(())
}

/// Reads the next chunk. On failure the buffer's cursor is left untouched.
pub fn read_chunk(buffer: &mut ByteBuffer) -> Result<Chunk, SerdeErr> {
    buffer.read::<Chunk>()
}
