use crate::{
    error::{BufferBoundsError, SerdeErr},
    serde::Serde,
};

/// A growable byte sequence with an independent read cursor.
///
/// Writes always append at the end; reads start at the cursor and move it
/// forward. The cursor never passes the end of the written data: a read that
/// would do so returns a [`BufferBoundsError`] and leaves the cursor where it
/// was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            cursor: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Wraps bytes received from elsewhere, ready to be read from the start
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }

    // Writing

    /// Appends the fixed-width little-endian encoding of `value`
    pub fn write<T: Serde>(&mut self, value: T) {
        value.ser(self);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    // Reading

    /// Decodes a `T` at the cursor and advances past it
    pub fn read<T: Serde>(&mut self) -> Result<T, SerdeErr> {
        let start = self.cursor;
        let result = T::de(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Returns the next `count` bytes and advances past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&[u8], SerdeErr> {
        self.check_remaining(count)?;
        let start = self.cursor;
        self.cursor += count;
        Ok(&self.bytes[start..self.cursor])
    }

    /// Reads exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let mut output = [0u8; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }

    /// Splits the next `count` bytes off into their own buffer, so a
    /// length-prefixed payload can be decoded without reaching into whatever
    /// follows it.
    pub fn read_buffer(&mut self, count: usize) -> Result<ByteBuffer, SerdeErr> {
        Ok(ByteBuffer::from_slice(self.read_bytes(count)?))
    }

    fn check_remaining(&self, requested: usize) -> Result<(), BufferBoundsError> {
        let remaining = self.remaining();
        if requested > remaining {
            return Err(BufferBoundsError {
                requested,
                remaining,
                cursor: self.cursor,
            });
        }
        Ok(())
    }

    // Cursor & length

    /// Total number of bytes written
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes between the cursor and the end of the written data
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the cursor back to the start without touching the data
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to an earlier position, clamped to the written data
    pub fn rewind_to(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.bytes.len());
    }

    /// Drops all written data and resets the cursor
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
