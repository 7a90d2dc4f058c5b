use facet_serde::{ByteBuffer, ConstByteLength};

use crate::{
    types::ObjectId,
    world::{
        component::{
            component::Component,
            component_kind::ComponentKind,
            error::{ComponentError, ConstructError},
            replicate::{read_field, Replicate},
        },
        stat::stat_definition::PositionStat,
    },
};

/// Where an Object is in the world.
///
/// Wire layout (12 bytes): `x`, `y`, `z` as `f32 LE`.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    owner: ObjectId,
    x: f32,
    y: f32,
    z: f32,
}

impl Position {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn coords(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }

    /// Moves to the given coordinates. Non-finite coordinates are ignored
    /// and false is returned.
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> bool {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return false;
        }
        self.x = x;
        self.y = y;
        self.z = z;
        true
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> bool {
        self.set(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl Replicate for Position {
    type Stat = PositionStat;

    const KIND: ComponentKind = ComponentKind::Position;

    fn construct(owner: ObjectId, stat: &PositionStat) -> Result<Self, ConstructError> {
        stat.validate()?;
        Ok(Self {
            owner,
            x: stat.x,
            y: stat.y,
            z: stat.z,
        })
    }

    fn owner(&self) -> ObjectId {
        self.owner
    }

    fn attach(&mut self, owner: ObjectId) {
        self.owner = owner;
    }

    fn network_serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.x);
        buffer.write(self.y);
        buffer.write(self.z);
    }

    fn network_unserialize(&mut self, buffer: &mut ByteBuffer) -> Result<(), ComponentError> {
        let x = read_field::<f32>(Self::KIND, buffer)?;
        let y = read_field::<f32>(Self::KIND, buffer)?;
        let z = read_field::<f32>(Self::KIND, buffer)?;

        for (field, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() {
                return Err(ComponentError::OutOfRange {
                    kind: Self::KIND,
                    field,
                    value: value.to_string(),
                });
            }
        }

        self.x = x;
        self.y = y;
        self.z = z;
        Ok(())
    }

    fn byte_length(&self) -> usize {
        3 * f32::const_byte_length()
    }

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::Position(position) => Some(position),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::Position(position) => Some(position),
            _ => None,
        }
    }

    fn into_component(self) -> Component {
        Component::Position(self)
    }
}
