use facet_serde::SerdeErr;
use thiserror::Error;

use crate::world::object::error::ObjectError;

/// Errors that can occur while saving or loading persisted objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// The data could not be decoded
    #[error("Failed to decode persisted data: {0}")]
    Serde(#[from] SerdeErr),

    /// The data does not start with a header chunk
    #[error("Persisted data does not start with a header chunk")]
    MissingHeader,

    /// The data was written by a newer or unknown format
    #[error("Persisted format version {version} is not supported (expected {supported})")]
    UnsupportedVersion { version: u16, supported: u16 },

    /// Fewer or more objects were found than the header announced
    #[error("Header announced {expected} objects but {found} were found")]
    ObjectCountMismatch { expected: u32, found: u32 },

    /// A chunk had bytes left over after its contents were read
    #[error("Chunk {tag} has {remaining} unread bytes")]
    TrailingBytes { tag: String, remaining: usize },

    /// A persisted object could not be rebuilt
    #[error(transparent)]
    Object(#[from] ObjectError),
}
