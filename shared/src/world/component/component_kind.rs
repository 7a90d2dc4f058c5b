use std::fmt;

use facet_serde::{ByteBuffer, ConstByteLength, Serde, SerdeErr};

use crate::world::component::error::ComponentError;

/// The slot a component occupies on an Object. Each Object holds at most one
/// component of each kind. The discriminant is the kind's wire byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentKind {
    Health = 0,
    Position = 1,
    Lifespan = 2,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Health,
        ComponentKind::Position,
        ComponentKind::Lifespan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Health => "Health",
            ComponentKind::Position => "Position",
            ComponentKind::Lifespan => "Lifespan",
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ComponentKind {
    type Error = ComponentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ComponentKind::Health),
            1 => Ok(ComponentKind::Position),
            2 => Ok(ComponentKind::Lifespan),
            _ => Err(ComponentError::UnknownKind { value }),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serde for ComponentKind {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.to_u8());
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        let value = buffer.read::<u8>()?;
        ComponentKind::try_from(value).map_err(|_| SerdeErr::InvalidValue {
            type_name: "ComponentKind",
            value: u64::from(value),
        })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for ComponentKind {
    fn const_byte_length() -> usize {
        1
    }
}
