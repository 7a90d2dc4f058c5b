use facet_serde::{ByteBuffer, Serde};

use crate::{
    sync::{error::SyncError, message_type::SyncMessageType},
    types::ObjectId,
    world::{
        component::component_kind::ComponentKind,
        object::{error::ObjectError, object::Object, object_record::ObjectRecord},
    },
};

/// Size of the frame in front of every message body: type tag plus body
/// length
pub const MESSAGE_FRAME_BYTES: usize = 3;

/// One unit of replication traffic.
///
/// Framed on the wire as `type: u8 | body length: u16 | body`. Bodies start
/// with the Object id where there is one:
/// - Spawn, Snapshot: an [`ObjectRecord`]
/// - Update: `object: u32 | kind: u8 | component payload`
/// - Despawn: `object: u32`
/// - RequestSnapshot: `object: Option<u32>`, none meaning every Object
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncMessage {
    Spawn(ObjectRecord),
    Update {
        object: ObjectId,
        kind: ComponentKind,
        payload: ByteBuffer,
    },
    Snapshot(ObjectRecord),
    Despawn {
        object: ObjectId,
    },
    RequestSnapshot {
        object: Option<ObjectId>,
    },
}

impl SyncMessage {
    pub fn spawn(object: &Object) -> Self {
        SyncMessage::Spawn(ObjectRecord::capture(object))
    }

    pub fn snapshot(object: &Object) -> Self {
        SyncMessage::Snapshot(ObjectRecord::capture(object))
    }

    /// Captures the current payload of one component
    pub fn update(object: &Object, kind: ComponentKind) -> Result<Self, ObjectError> {
        let mut payload = ByteBuffer::new();
        object.network_serialize_component(kind, &mut payload)?;
        Ok(SyncMessage::Update {
            object: object.id(),
            kind,
            payload,
        })
    }

    pub fn message_type(&self) -> SyncMessageType {
        match self {
            SyncMessage::Spawn(_) => SyncMessageType::Spawn,
            SyncMessage::Update { .. } => SyncMessageType::Update,
            SyncMessage::Snapshot(_) => SyncMessageType::Snapshot,
            SyncMessage::Despawn { .. } => SyncMessageType::Despawn,
            SyncMessage::RequestSnapshot { .. } => SyncMessageType::RequestSnapshot,
        }
    }

    pub fn object(&self) -> Option<ObjectId> {
        match self {
            SyncMessage::Spawn(record) | SyncMessage::Snapshot(record) => Some(record.object),
            SyncMessage::Update { object, .. } | SyncMessage::Despawn { object } => Some(*object),
            SyncMessage::RequestSnapshot { object } => *object,
        }
    }

    /// The Object a spawn, snapshot or despawn creates or destroys
    pub fn lifecycle_object(&self) -> Option<ObjectId> {
        match self {
            SyncMessage::Spawn(record) | SyncMessage::Snapshot(record) => Some(record.object),
            SyncMessage::Despawn { object } => Some(*object),
            SyncMessage::Update { .. } | SyncMessage::RequestSnapshot { .. } => None,
        }
    }

    /// Writes the framed message
    pub fn write(&self, buffer: &mut ByteBuffer) -> Result<(), SyncError> {
        let message_type = self.message_type();
        let mut body = ByteBuffer::new();
        self.write_body(&mut body)?;

        let body_length = u16::try_from(body.len()).map_err(|_| SyncError::PayloadTooLarge {
            message_type,
            size: body.len(),
            max: usize::from(u16::MAX),
        })?;

        message_type.ser(buffer);
        buffer.write(body_length);
        buffer.write_bytes(body.as_bytes());
        Ok(())
    }

    fn write_body(&self, body: &mut ByteBuffer) -> Result<(), SyncError> {
        match self {
            SyncMessage::Spawn(record) | SyncMessage::Snapshot(record) => record.write(body)?,
            SyncMessage::Update {
                object,
                kind,
                payload,
            } => {
                object.ser(body);
                kind.ser(body);
                body.write_bytes(payload.as_bytes());
            }
            SyncMessage::Despawn { object } => object.ser(body),
            SyncMessage::RequestSnapshot { object } => object.ser(body),
        }
        Ok(())
    }

    /// Reads a framed message. A framing failure leaves the cursor where it
    /// was; a body failure consumes the whole frame so the next message can
    /// still be read.
    pub fn read(buffer: &mut ByteBuffer) -> Result<Self, SyncError> {
        let (tag, mut body) = Self::read_frame(buffer)?;
        Self::decode(tag, &mut body)
    }

    /// Splits off the next frame without interpreting its body
    pub fn read_frame(buffer: &mut ByteBuffer) -> Result<(u8, ByteBuffer), SyncError> {
        let start = buffer.cursor();
        let frame = buffer.read::<u8>().and_then(|tag| {
            let length = buffer.read::<u16>()?;
            let body = buffer.read_buffer(usize::from(length))?;
            Ok((tag, body))
        });
        if frame.is_err() {
            buffer.rewind_to(start);
        }
        Ok(frame?)
    }

    /// Interprets one frame's body
    pub fn decode(tag: u8, body: &mut ByteBuffer) -> Result<Self, SyncError> {
        let message_type = SyncMessageType::try_from(tag)?;
        let message = match message_type {
            SyncMessageType::Spawn => SyncMessage::Spawn(ObjectRecord::read(body)?),
            SyncMessageType::Snapshot => SyncMessage::Snapshot(ObjectRecord::read(body)?),
            SyncMessageType::Update => {
                let object = ObjectId::de(body)?;
                let kind = ComponentKind::de(body)?;
                let payload = body.read_buffer(body.remaining())?;
                SyncMessage::Update {
                    object,
                    kind,
                    payload,
                }
            }
            SyncMessageType::Despawn => SyncMessage::Despawn {
                object: ObjectId::de(body)?,
            },
            SyncMessageType::RequestSnapshot => SyncMessage::RequestSnapshot {
                object: Option::<ObjectId>::de(body)?,
            },
        };

        if !body.is_exhausted() {
            return Err(SyncError::TrailingBytes {
                message_type,
                remaining: body.remaining(),
            });
        }
        Ok(message)
    }

    /// Size of the framed message
    pub fn byte_length(&self) -> usize {
        let body = match self {
            SyncMessage::Spawn(record) | SyncMessage::Snapshot(record) => record.byte_length(),
            SyncMessage::Update { object, kind, payload } => {
                object.byte_length() + kind.byte_length() + payload.len()
            }
            SyncMessage::Despawn { object } => object.byte_length(),
            SyncMessage::RequestSnapshot { object } => object.byte_length(),
        };
        MESSAGE_FRAME_BYTES + body
    }
}
