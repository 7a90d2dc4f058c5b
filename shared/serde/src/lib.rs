//! # Facet Serde
//! A checked, little-endian byte buffer codec.
//!
//! Every value is written with a fixed width (`u8`/`i8`/`bool`: 1 byte,
//! `u16`/`i16`: 2, `u32`/`i32`/`f32`: 4, `u64`/`i64`/`f64`: 8) and no type
//! tag, so the writer and the reader must agree on the sequence of types.
//! Reading past the written data is always a reported [`SerdeErr`].

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_buffer;
mod chunk;
mod error;
mod impls;
mod serde;

pub use byte_buffer::ByteBuffer;
pub use chunk::{read_chunk, write_chunk, Chunk, ChunkTag};
pub use error::{BufferBoundsError, SerdeErr};
pub use serde::{ConstByteLength, Serde};
