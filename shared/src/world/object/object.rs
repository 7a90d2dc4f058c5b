use std::{collections::HashSet, mem};

use log::{debug, trace};

use facet_serde::ByteBuffer;

use crate::{
    types::{ObjectId, TemplateId},
    world::{
        component::{
            component::Component, component_kind::ComponentKind, error::ConstructError,
            replicate::Replicate,
        },
        object::error::ObjectError,
        stat::object_template::ObjectTemplate,
    },
};

/// An entity in the simulation: an id plus the components it exclusively
/// owns.
///
/// Components are kept in registration order. Every pass over them
/// (serialize, unserialize, update) walks that order, so two Objects with
/// the same registration order agree on the layout of their combined
/// payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    id: ObjectId,
    template: Option<TemplateId>,
    components: Vec<Component>,
    dirty: HashSet<ComponentKind>,
    structure_changed: bool,
}

impl Object {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            template: None,
            components: Vec::new(),
            dirty: HashSet::new(),
            structure_changed: false,
        }
    }

    /// Builds every component the template lists, in template order
    pub fn from_template(id: ObjectId, template: &ObjectTemplate) -> Result<Self, ConstructError> {
        template.validate()?;

        let mut components = Vec::with_capacity(template.stats().len());
        for stat in template.stats() {
            components.push(Component::construct(id, stat)?);
        }

        Ok(Self {
            id,
            template: Some(template.id()),
            components,
            dirty: HashSet::new(),
            structure_changed: false,
        })
    }

    /// Builds an Object with exactly the listed components, in list order.
    /// Components the template has stats for start from those stats, the
    /// rest from defaults.
    pub fn from_layout(
        id: ObjectId,
        template: Option<&ObjectTemplate>,
        kinds: &[ComponentKind],
    ) -> Result<Self, ObjectError> {
        let mut object = Self::new(id);
        object.template = template.map(ObjectTemplate::id);
        object.components = object.stage_layout(template, kinds)?;
        Ok(object)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn template(&self) -> Option<TemplateId> {
        self.template
    }

    // Components

    /// Puts `component` in its slot and returns whatever occupied the slot
    /// before. A replacement keeps the slot's registration position. The
    /// component is re-attached to this Object.
    pub fn add_component(&mut self, mut component: Component) -> Option<Component> {
        component.attach(self.id);
        let kind = component.kind();
        self.dirty.insert(kind);

        match self.position(kind) {
            Some(index) => {
                debug!("Object {}: replacing {} component", self.id, kind);
                Some(mem::replace(&mut self.components[index], component))
            }
            None => {
                self.components.push(component);
                self.structure_changed = true;
                None
            }
        }
    }

    /// Typed form of [`Object::add_component`]
    pub fn insert<T: Replicate>(&mut self, component: T) -> Option<Component> {
        self.add_component(component.into_component())
    }

    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.position(kind)?;
        self.dirty.remove(&kind);
        self.structure_changed = true;
        Some(self.components.remove(index))
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.position(kind).is_some()
    }

    pub fn get_component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|component| component.kind() == kind)
    }

    /// Mutable access to a slot. Marks the slot dirty.
    pub fn get_component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        let index = self.position(kind)?;
        self.dirty.insert(kind);
        Some(&mut self.components[index])
    }

    pub fn get<T: Replicate>(&self) -> Option<&T> {
        self.get_component(T::KIND).and_then(T::from_component)
    }

    /// Mutable typed access. Marks the slot dirty.
    pub fn get_mut<T: Replicate>(&mut self) -> Option<&mut T> {
        self.get_component_mut(T::KIND).and_then(T::from_component_mut)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component kinds in registration order
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.components.iter().map(Component::kind).collect()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn for_each_component<F: FnMut(&Component)>(&self, f: F) {
        self.components.iter().for_each(f);
    }

    /// Visits every component mutably. Does not mark anything dirty.
    pub fn for_each_component_mut<F: FnMut(&mut Component)>(&mut self, f: F) {
        self.components.iter_mut().for_each(f);
    }

    fn position(&self, kind: ComponentKind) -> Option<usize> {
        self.components.iter().position(|component| component.kind() == kind)
    }

    // Serialization

    /// Writes every component's payload, in registration order
    pub fn network_serialize_all(&self, buffer: &mut ByteBuffer) {
        for component in &self.components {
            component.network_serialize(buffer);
        }
    }

    /// Reads every component's payload in registration order. The Object is
    /// only changed if all components read successfully.
    pub fn network_unserialize_all(&mut self, buffer: &mut ByteBuffer) -> Result<(), ObjectError> {
        let mut staged = self.components.clone();
        self.unserialize_staged(&mut staged, buffer)?;
        self.components = staged;
        Ok(())
    }

    pub fn network_serialize_component(
        &self,
        kind: ComponentKind,
        buffer: &mut ByteBuffer,
    ) -> Result<(), ObjectError> {
        let component = self
            .get_component(kind)
            .ok_or(ObjectError::ComponentNotFound {
                object: self.id,
                kind,
            })?;
        component.network_serialize(buffer);
        Ok(())
    }

    pub fn network_unserialize_component(
        &mut self,
        kind: ComponentKind,
        buffer: &mut ByteBuffer,
    ) -> Result<(), ObjectError> {
        let id = self.id;
        let index = self
            .position(kind)
            .ok_or(ObjectError::ComponentNotFound { object: id, kind })?;
        self.components[index]
            .network_unserialize(buffer)
            .map_err(|source| ObjectError::Component { object: id, source })
    }

    /// Replaces the component layout with `kinds` and reads their payloads.
    ///
    /// Components already present keep their local state until overwritten;
    /// new ones start from the template's stats or defaults. Nothing changes
    /// unless the whole payload reads successfully.
    pub fn apply_state(
        &mut self,
        template: Option<&ObjectTemplate>,
        kinds: &[ComponentKind],
        buffer: &mut ByteBuffer,
    ) -> Result<(), ObjectError> {
        let mut staged = self.stage_layout(template, kinds)?;
        self.unserialize_staged(&mut staged, buffer)?;

        trace!("Object {}: applied state for {:?}", self.id, kinds);
        self.components = staged;
        let present: HashSet<ComponentKind> = kinds.iter().copied().collect();
        self.dirty.retain(|kind| present.contains(kind));
        Ok(())
    }

    /// Total bytes `network_serialize_all` writes
    pub fn byte_length(&self) -> usize {
        self.components.iter().map(Component::byte_length).sum()
    }

    fn stage_layout(
        &self,
        template: Option<&ObjectTemplate>,
        kinds: &[ComponentKind],
    ) -> Result<Vec<Component>, ObjectError> {
        let mut staged: Vec<Component> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if staged.iter().any(|component| component.kind() == kind) {
                return Err(ObjectError::DuplicateComponent {
                    object: self.id,
                    kind,
                });
            }

            let component = match self.get_component(kind) {
                Some(existing) => existing.clone(),
                None => {
                    let built = match template.and_then(|template| template.stat(kind)) {
                        Some(stat) => Component::construct(self.id, stat),
                        None => Component::blank(kind, self.id),
                    };
                    built.map_err(|source| ObjectError::Construct {
                        object: self.id,
                        source,
                    })?
                }
            };
            staged.push(component);
        }
        Ok(staged)
    }

    fn unserialize_staged(
        &self,
        staged: &mut [Component],
        buffer: &mut ByteBuffer,
    ) -> Result<(), ObjectError> {
        for component in staged.iter_mut() {
            component
                .network_unserialize(buffer)
                .map_err(|source| ObjectError::Component {
                    object: self.id,
                    source,
                })?;
        }
        Ok(())
    }

    // Simulation

    /// Runs one update pass over every component. Slots whose synchronized
    /// state changed are marked dirty. Returns whether any did.
    pub fn update(&mut self, frame_time: f32) -> bool {
        let mut changed = false;
        for component in &mut self.components {
            if component.update(frame_time) {
                self.dirty.insert(component.kind());
                changed = true;
            }
        }
        changed
    }

    // Change tracking

    /// Marks a slot for resending. Ignored if the slot is empty.
    pub fn mark_dirty(&mut self, kind: ComponentKind) {
        if self.has_component(kind) {
            self.dirty.insert(kind);
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty() || self.structure_changed
    }

    pub fn is_component_dirty(&self, kind: ComponentKind) -> bool {
        self.dirty.contains(&kind)
    }

    /// Whether components were added to or removed from the Object since
    /// the last [`Object::clear_dirty`]
    pub fn structure_changed(&self) -> bool {
        self.structure_changed
    }

    /// Returns the dirty slots in registration order and clears them
    pub fn take_dirty(&mut self) -> Vec<ComponentKind> {
        let dirty: Vec<ComponentKind> = self
            .components
            .iter()
            .map(Component::kind)
            .filter(|kind| self.dirty.contains(kind))
            .collect();
        self.dirty.clear();
        dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
        self.structure_changed = false;
    }
}
