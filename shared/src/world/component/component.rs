use facet_serde::ByteBuffer;

use crate::{
    types::ObjectId,
    world::{
        component::{
            component_kind::ComponentKind,
            error::{ComponentError, ConstructError},
            health::Health,
            lifespan::Lifespan,
            position::Position,
            replicate::Replicate,
        },
        stat::stat_definition::StatDefinition,
    },
};

/// Any component an Object can hold.
///
/// The set of component kinds is closed: adding one means adding a variant
/// here, a [`ComponentKind`], and a [`StatDefinition`], which keeps every
/// peer's wire layout in step at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    Health(Health),
    Position(Position),
    Lifespan(Lifespan),
}

impl Component {
    /// Builds the component the stat definition describes, owned by `owner`
    pub fn construct(owner: ObjectId, stat: &StatDefinition) -> Result<Self, ConstructError> {
        Ok(match stat {
            StatDefinition::Health(stat) => Component::Health(Health::construct(owner, stat)?),
            StatDefinition::Position(stat) => {
                Component::Position(Position::construct(owner, stat)?)
            }
            StatDefinition::Lifespan(stat) => {
                Component::Lifespan(Lifespan::construct(owner, stat)?)
            }
        })
    }

    /// Builds a component of `kind` from default stats, to be overwritten
    /// by an incoming payload
    pub fn blank(kind: ComponentKind, owner: ObjectId) -> Result<Self, ConstructError> {
        Self::construct(owner, &StatDefinition::default_for(kind))
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Health(_) => ComponentKind::Health,
            Component::Position(_) => ComponentKind::Position,
            Component::Lifespan(_) => ComponentKind::Lifespan,
        }
    }

    pub fn owner(&self) -> ObjectId {
        match self {
            Component::Health(inner) => inner.owner(),
            Component::Position(inner) => inner.owner(),
            Component::Lifespan(inner) => inner.owner(),
        }
    }

    pub fn attach(&mut self, owner: ObjectId) {
        match self {
            Component::Health(inner) => inner.attach(owner),
            Component::Position(inner) => inner.attach(owner),
            Component::Lifespan(inner) => inner.attach(owner),
        }
    }

    pub fn network_serialize(&self, buffer: &mut ByteBuffer) {
        match self {
            Component::Health(inner) => inner.network_serialize(buffer),
            Component::Position(inner) => inner.network_serialize(buffer),
            Component::Lifespan(inner) => inner.network_serialize(buffer),
        }
    }

    pub fn network_unserialize(&mut self, buffer: &mut ByteBuffer) -> Result<(), ComponentError> {
        match self {
            Component::Health(inner) => inner.network_unserialize(buffer),
            Component::Position(inner) => inner.network_unserialize(buffer),
            Component::Lifespan(inner) => inner.network_unserialize(buffer),
        }
    }

    pub fn update(&mut self, frame_time: f32) -> bool {
        match self {
            Component::Health(inner) => inner.update(frame_time),
            Component::Position(inner) => inner.update(frame_time),
            Component::Lifespan(inner) => inner.update(frame_time),
        }
    }

    pub fn byte_length(&self) -> usize {
        match self {
            Component::Health(inner) => inner.byte_length(),
            Component::Position(inner) => inner.byte_length(),
            Component::Lifespan(inner) => inner.byte_length(),
        }
    }

    pub fn as_component<T: Replicate>(&self) -> Option<&T> {
        T::from_component(self)
    }

    pub fn as_component_mut<T: Replicate>(&mut self) -> Option<&mut T> {
        T::from_component_mut(self)
    }
}

impl From<Health> for Component {
    fn from(inner: Health) -> Self {
        inner.into_component()
    }
}

impl From<Position> for Component {
    fn from(inner: Position) -> Self {
        inner.into_component()
    }
}

impl From<Lifespan> for Component {
    fn from(inner: Lifespan) -> Self {
        inner.into_component()
    }
}
