use facet_serde::SerdeErr;
use thiserror::Error;

use crate::{
    sync::message_type::SyncMessageType,
    types::{HostType, ObjectId, TemplateId},
    world::{component::error::ConstructError, object::error::ObjectError},
};

/// Errors that can occur while framing, reading or applying sync messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Low-level decode failure
    #[error("Failed to decode sync data: {0}")]
    Serde(#[from] SerdeErr),

    /// The packet was written by a peer speaking another protocol version
    #[error("Packet protocol version {received} does not match local version {expected}")]
    VersionMismatch { expected: u16, received: u16 },

    /// The message tag byte is not a known message type
    #[error("Unknown sync message type {value}")]
    UnknownMessageType { value: u8 },

    /// A peer sent a message only the other side may send
    #[error("{message_type} messages are not accepted by the {receiver}")]
    UnexpectedMessage {
        message_type: SyncMessageType,
        receiver: HostType,
    },

    /// The message refers to an Object this peer does not have
    #[error("Object {object} does not exist")]
    UnknownObject { object: ObjectId },

    /// No template is registered under this id
    #[error("Unknown {template}")]
    UnknownTemplate { template: TemplateId },

    /// A Spawn named an Object that already exists
    #[error("Object {object} already exists")]
    ObjectAlreadyExists { object: ObjectId },

    /// Applying the message to an Object failed
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// An Object could not be built from its template
    #[error("Failed to construct object: {0}")]
    Construct(#[from] ConstructError),

    /// A message body was longer than its fields
    #[error("{message_type} message has {remaining} unread bytes")]
    TrailingBytes {
        message_type: SyncMessageType,
        remaining: usize,
    },

    /// Bytes followed the last message the packet header announced
    #[error("Packet has {remaining} bytes after its last message")]
    TrailingPacketBytes { remaining: usize },

    /// A message body does not fit its u16 length prefix
    #[error("{message_type} message body of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge {
        message_type: SyncMessageType,
        size: usize,
        max: usize,
    },

    /// A single message does not fit in a packet of the configured size
    #[error("{message_type} message of {size} bytes cannot fit in a {max} byte packet")]
    MessageTooLarge {
        message_type: SyncMessageType,
        size: usize,
        max: usize,
    },
}

impl SyncError {
    /// The Object the failed message was about, when known
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            SyncError::UnknownObject { object } | SyncError::ObjectAlreadyExists { object } => {
                Some(*object)
            }
            SyncError::Object(error) => Some(error.object()),
            _ => None,
        }
    }

    /// Whether the error came from data shorter than expected
    pub fn is_bounds(&self) -> bool {
        match self {
            SyncError::Serde(error) => error.is_bounds(),
            SyncError::Object(error) => error.is_bounds(),
            _ => false,
        }
    }
}
