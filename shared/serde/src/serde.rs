use crate::{byte_buffer::ByteBuffer, error::SerdeErr};

/// A type that can be written to and read back from a [`ByteBuffer`].
///
/// Encodings carry no type tags: a reader must ask for exactly the sequence
/// of types the writer produced.
pub trait Serde: Sized {
    /// Appends this value to the buffer
    fn ser(&self, buffer: &mut ByteBuffer);

    /// Decodes a value at the buffer's cursor
    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` will write for this value
    fn byte_length(&self) -> usize;
}

/// Implemented by types whose encoding always has the same width
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}
