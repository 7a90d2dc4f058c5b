use std::fmt;

use facet_serde::{ByteBuffer, ConstByteLength, Serde, SerdeErr};

pub type Tick = u16;

/// Identifies an Object across peers. Components refer back to their owner
/// through this id rather than holding the Object itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Serde for ObjectId {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.0);
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        Ok(Self(buffer.read::<u32>()?))
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for ObjectId {
    fn const_byte_length() -> usize {
        u32::const_byte_length()
    }
}

/// Identifies an ObjectTemplate within a TemplateRegistry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(u16);

impl TemplateId {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template {}", self.0)
    }
}

impl Serde for TemplateId {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.0);
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        Ok(Self(buffer.read::<u16>()?))
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for TemplateId {
    fn const_byte_length() -> usize {
        u16::const_byte_length()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    pub fn invert(self) -> Self {
        match self {
            HostType::Server => HostType::Client,
            HostType::Client => HostType::Server,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Server => write!(f, "Server"),
            HostType::Client => write!(f, "Client"),
        }
    }
}
