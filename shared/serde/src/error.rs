use thiserror::Error;

/// A read asked for more bytes than remain between the cursor and the end
/// of the written data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Buffer under-read: requested {requested} bytes at cursor {cursor}, but only {remaining} remain")]
pub struct BufferBoundsError {
    pub requested: usize,
    pub remaining: usize,
    pub cursor: usize,
}

/// Errors that can occur while decoding values from a ByteBuffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Not enough bytes left to decode the requested value
    #[error(transparent)]
    Bounds(#[from] BufferBoundsError),

    /// The bytes were present but do not encode a valid value of the type
    #[error("Invalid encoding for {type_name}: {value}")]
    InvalidValue {
        type_name: &'static str,
        value: u64,
    },

    /// A length does not fit in the width used to encode it on the wire
    #[error("Length {length} exceeds the maximum of {max} for a {type_name} length prefix")]
    LengthOverflow {
        type_name: &'static str,
        length: usize,
        max: usize,
    },
}

impl SerdeErr {
    /// Whether this error was caused by reading past the end of a buffer
    pub fn is_bounds(&self) -> bool {
        matches!(self, SerdeErr::Bounds(_))
    }
}
