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
        stat::stat_definition::LifespanStat,
    },
};

/// Seconds left before an Object expires.
///
/// Wire layout (4 bytes): `remaining: f32 LE`.
///
/// Both peers count down locally every tick; only the moment of expiry is
/// reported as a change, so a ticking Lifespan does not produce an update
/// every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Lifespan {
    owner: ObjectId,
    remaining: f32,
}

impl Lifespan {
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Adds time. Non-finite or negative amounts are ignored, and the total
    /// saturates at `f32::MAX` so it always stays a valid payload.
    pub fn extend(&mut self, seconds: f32) {
        if seconds.is_finite() && seconds > 0.0 {
            let extended = self.remaining + seconds;
            self.remaining = if extended.is_finite() { extended } else { f32::MAX };
        }
    }

    pub fn expire(&mut self) {
        self.remaining = 0.0;
    }
}

impl Replicate for Lifespan {
    type Stat = LifespanStat;

    const KIND: ComponentKind = ComponentKind::Lifespan;

    fn construct(owner: ObjectId, stat: &LifespanStat) -> Result<Self, ConstructError> {
        stat.validate()?;
        Ok(Self {
            owner,
            remaining: stat.seconds,
        })
    }

    fn owner(&self) -> ObjectId {
        self.owner
    }

    fn attach(&mut self, owner: ObjectId) {
        self.owner = owner;
    }

    fn network_serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.remaining);
    }

    fn network_unserialize(&mut self, buffer: &mut ByteBuffer) -> Result<(), ComponentError> {
        let remaining = read_field::<f32>(Self::KIND, buffer)?;
        if !remaining.is_finite() || remaining < 0.0 {
            return Err(ComponentError::OutOfRange {
                kind: Self::KIND,
                field: "remaining",
                value: remaining.to_string(),
            });
        }

        self.remaining = remaining;
        Ok(())
    }

    fn update(&mut self, frame_time: f32) -> bool {
        if self.is_expired() || frame_time.is_nan() || frame_time <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - frame_time).max(0.0);
        self.is_expired()
    }

    fn byte_length(&self) -> usize {
        f32::const_byte_length()
    }

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::Lifespan(lifespan) => Some(lifespan),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::Lifespan(lifespan) => Some(lifespan),
            _ => None,
        }
    }

    fn into_component(self) -> Component {
        Component::Lifespan(self)
    }
}
