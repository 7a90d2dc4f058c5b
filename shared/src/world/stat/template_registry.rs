use std::{collections::HashMap, sync::Arc};

use log::debug;

use crate::{
    types::TemplateId,
    world::stat::{error::TemplateError, object_template::ObjectTemplate},
};

/// All object templates known to a peer.
///
/// Loaded once at startup and shared by the server and every client, so an
/// Object spawned from a template id has the same component layout on
/// both sides.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<TemplateId, Arc<ObjectTemplate>>,
    names: HashMap<String, TemplateId>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds a template
    pub fn register(&mut self, template: ObjectTemplate) -> Result<Arc<ObjectTemplate>, TemplateError> {
        template.validate()?;

        let id = template.id();
        if self.templates.contains_key(&id) {
            return Err(TemplateError::DuplicateId { id });
        }
        if self.names.contains_key(template.name()) {
            return Err(TemplateError::DuplicateName {
                name: template.name().to_string(),
            });
        }

        debug!(
            "Registered template '{}' ({}) with {} components",
            template.name(),
            id,
            template.stats().len()
        );

        let template = Arc::new(template);
        self.names.insert(template.name().to_string(), id);
        self.templates.insert(id, template.clone());
        Ok(template)
    }

    pub fn get(&self, id: TemplateId) -> Option<&Arc<ObjectTemplate>> {
        self.templates.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Arc<ObjectTemplate>> {
        self.names.get(name).and_then(|id| self.templates.get(id))
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates sorted by id
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ObjectTemplate>> {
        let mut templates: Vec<_> = self.templates.values().collect();
        templates.sort_by_key(|template| template.id());
        templates.into_iter()
    }
}
