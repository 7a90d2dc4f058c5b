use facet_serde::{ByteBuffer, Serde, SerdeErr};

use crate::{
    types::{ObjectId, TemplateId},
    world::{
        component::component_kind::ComponentKind,
        object::{error::ObjectError, object::Object},
        stat::{object_template::ObjectTemplate, template_registry::TemplateRegistry},
    },
};

/// The full state of one Object, detached from it: its id, the template it
/// came from, its component layout and the combined payload of every
/// component.
///
/// Wire layout:
/// `object: u32 | template: Option<u16> | count: u8 | kinds: u8 * count |
/// state length: u16 | state`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRecord {
    pub object: ObjectId,
    pub template: Option<TemplateId>,
    pub kinds: Vec<ComponentKind>,
    pub state: ByteBuffer,
}

impl ObjectRecord {
    pub fn capture(object: &Object) -> Self {
        let mut state = ByteBuffer::with_capacity(object.byte_length());
        object.network_serialize_all(&mut state);
        Self {
            object: object.id(),
            template: object.template(),
            kinds: object.kinds(),
            state,
        }
    }

    pub fn write(&self, buffer: &mut ByteBuffer) -> Result<(), SerdeErr> {
        let state_length = u16::try_from(self.state.len()).map_err(|_| SerdeErr::LengthOverflow {
            type_name: "u16",
            length: self.state.len(),
            max: u16::MAX as usize,
        })?;

        self.object.ser(buffer);
        self.template.ser(buffer);
        // at most one entry per kind, checked on read
        buffer.write(self.kinds.len() as u8);
        for kind in &self.kinds {
            kind.ser(buffer);
        }
        buffer.write(state_length);
        buffer.write_bytes(self.state.as_bytes());
        Ok(())
    }

    pub fn read(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        let object = ObjectId::de(buffer)?;
        let template = Option::<TemplateId>::de(buffer)?;

        let count = buffer.read::<u8>()?;
        if usize::from(count) > ComponentKind::ALL.len() {
            return Err(SerdeErr::InvalidValue {
                type_name: "component count",
                value: u64::from(count),
            });
        }
        let mut kinds = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            kinds.push(ComponentKind::de(buffer)?);
        }

        let state_length = buffer.read::<u16>()?;
        let state = buffer.read_buffer(usize::from(state_length))?;

        Ok(Self {
            object,
            template,
            kinds,
            state,
        })
    }

    /// Bytes `write` produces
    pub fn byte_length(&self) -> usize {
        self.object.byte_length()
            + self.template.byte_length()
            + 1
            + self.kinds.len()
            + 2
            + self.state.len()
    }

    /// Looks up the record's template, if it names one
    pub fn resolve_template<'r>(
        &self,
        registry: &'r TemplateRegistry,
    ) -> Result<Option<&'r ObjectTemplate>, ObjectError> {
        match self.template {
            None => Ok(None),
            Some(template) => registry
                .get(template)
                .map(|template| Some(template.as_ref()))
                .ok_or(ObjectError::UnknownTemplate {
                    object: self.object,
                    template,
                }),
        }
    }

    /// Builds a new Object from the record
    pub fn build(&self, registry: &TemplateRegistry) -> Result<Object, ObjectError> {
        let template = self.resolve_template(registry)?;
        let mut object = Object::from_layout(self.object, template, &self.kinds)?;
        let mut state = self.state.clone();
        state.rewind();
        object.network_unserialize_all(&mut state)?;
        Self::check_consumed(self.object, &state)?;
        Ok(object)
    }

    /// Overwrites an existing Object with the record's layout and state
    pub fn apply_to(&self, object: &mut Object, registry: &TemplateRegistry) -> Result<(), ObjectError> {
        let template = self.resolve_template(registry)?;
        let mut state = self.state.clone();
        state.rewind();

        // read into a copy first so trailing bytes can still reject it
        let mut staged = object.clone();
        staged.apply_state(template, &self.kinds, &mut state)?;
        Self::check_consumed(self.object, &state)?;
        *object = staged;
        Ok(())
    }

    fn check_consumed(object: ObjectId, state: &ByteBuffer) -> Result<(), ObjectError> {
        if !state.is_exhausted() {
            return Err(ObjectError::TrailingBytes {
                object,
                remaining: state.remaining(),
            });
        }
        Ok(())
    }
}
