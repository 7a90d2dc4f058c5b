use std::fmt;

use facet_serde::{ByteBuffer, ConstByteLength, Serde, SerdeErr};

use crate::{sync::error::SyncError, types::HostType};

/// Tag byte at the front of every framed message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SyncMessageType {
    Spawn = 0,
    Update = 1,
    Snapshot = 2,
    Despawn = 3,
    RequestSnapshot = 4,
}

impl SyncMessageType {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// The only peer allowed to send this message
    pub fn sender(self) -> HostType {
        match self {
            SyncMessageType::Spawn
            | SyncMessageType::Update
            | SyncMessageType::Snapshot
            | SyncMessageType::Despawn => HostType::Server,
            SyncMessageType::RequestSnapshot => HostType::Client,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SyncMessageType::Spawn => "Spawn",
            SyncMessageType::Update => "Update",
            SyncMessageType::Snapshot => "Snapshot",
            SyncMessageType::Despawn => "Despawn",
            SyncMessageType::RequestSnapshot => "RequestSnapshot",
        }
    }
}

impl TryFrom<u8> for SyncMessageType {
    type Error = SyncError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SyncMessageType::Spawn),
            1 => Ok(SyncMessageType::Update),
            2 => Ok(SyncMessageType::Snapshot),
            3 => Ok(SyncMessageType::Despawn),
            4 => Ok(SyncMessageType::RequestSnapshot),
            value => Err(SyncError::UnknownMessageType { value }),
        }
    }
}

impl fmt::Display for SyncMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serde for SyncMessageType {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.to_u8());
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        let value = buffer.read::<u8>()?;
        Self::try_from(value).map_err(|_| SerdeErr::InvalidValue {
            type_name: "SyncMessageType",
            value: u64::from(value),
        })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for SyncMessageType {
    fn const_byte_length() -> usize {
        1
    }
}
