use std::collections::{btree_map, BTreeMap};

use log::debug;

use crate::{
    types::ObjectId,
    world::{
        component::{component::Component, replicate::Replicate},
        object::{error::ObjectError, object::Object},
    },
};

/// Every Object a peer currently knows about, keyed by id.
///
/// Iteration is always in ascending id order so passes over the table are
/// deterministic. Components resolve their owner through this table.
#[derive(Clone, Debug, Default)]
pub struct ObjectTable {
    objects: BTreeMap<ObjectId, Object>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: Object) -> Result<(), ObjectError> {
        let id = object.id();
        match self.objects.entry(id) {
            btree_map::Entry::Occupied(_) => Err(ObjectError::AlreadyExists { object: id }),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(object);
                Ok(())
            }
        }
    }

    /// Takes the Object out of the table; dropping it destroys its
    /// components
    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            debug!("Removed object {}", id);
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// The Object a component belongs to, if it is still alive
    pub fn owner_of(&self, component: &Component) -> Option<&Object> {
        self.get(component.owner())
    }

    /// Typed component lookup on an Object
    pub fn component<T: Replicate>(&self, id: ObjectId) -> Option<&T> {
        self.get(id).and_then(Object::get::<T>)
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.values_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Runs one update pass over every Object in id order
    pub fn update(&mut self, frame_time: f32) {
        for object in self.objects.values_mut() {
            object.update(frame_time);
        }
    }
}
