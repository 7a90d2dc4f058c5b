use facet_serde::{ByteBuffer, Serde};

use crate::{
    types::ObjectId,
    world::component::{
        component::Component,
        component_kind::ComponentKind,
        error::{ComponentError, ConstructError},
    },
};

/// The contract every synchronized component implements.
///
/// A component owns a narrow slice of an Object's state and decides the
/// exact order and width of the fields it puts on the wire. Readers and
/// writers never exchange a schema: `network_unserialize` must read the
/// same sequence of types `network_serialize` wrote.
pub trait Replicate: Sized + Clone {
    /// Immutable template data the component starts from
    type Stat;

    /// The slot this component occupies on an Object
    const KIND: ComponentKind;

    /// Builds the component for `owner` from a stat definition. The stat is
    /// only read. Invalid stats are refused before anything is built.
    fn construct(owner: ObjectId, stat: &Self::Stat) -> Result<Self, ConstructError>;

    /// The Object this component belongs to
    fn owner(&self) -> ObjectId;

    /// Points the component at a new owning Object
    fn attach(&mut self, owner: ObjectId);

    /// Appends the synchronized fields to `buffer`. Never changes the
    /// component.
    fn network_serialize(&self, buffer: &mut ByteBuffer);

    /// Reads the synchronized fields back, in serialize order, and
    /// overwrites the component with them. Every field is decoded and
    /// validated before any is assigned, so on error the component is
    /// unchanged.
    fn network_unserialize(&mut self, buffer: &mut ByteBuffer) -> Result<(), ComponentError>;

    /// Advances time-dependent state by `frame_time` seconds. Returns
    /// whether any synchronized field changed.
    fn update(&mut self, _frame_time: f32) -> bool {
        false
    }

    /// Number of bytes `network_serialize` writes
    fn byte_length(&self) -> usize;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    fn into_component(self) -> Component;
}

/// Reads one field for a component of `kind`, tagging decode errors with it
pub(crate) fn read_field<T: Serde>(
    kind: ComponentKind,
    buffer: &mut ByteBuffer,
) -> Result<T, ComponentError> {
    buffer
        .read::<T>()
        .map_err(|source| ComponentError::Serde { kind, source })
}
