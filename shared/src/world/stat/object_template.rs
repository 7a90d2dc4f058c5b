use std::collections::HashSet;

use crate::{
    types::TemplateId,
    world::{
        component::{component_kind::ComponentKind, error::ConstructError},
        stat::stat_definition::StatDefinition,
    },
};

/// Describes a class of Object: which components it has, in which order,
/// and what they start from. Templates are immutable once registered and
/// shared by every Object built from them.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTemplate {
    id: TemplateId,
    name: String,
    stats: Vec<StatDefinition>,
}

impl ObjectTemplate {
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stats: Vec::new(),
        }
    }

    /// Appends a stat definition. Component registration order on built
    /// Objects follows the order stats are added here.
    pub fn with_stat(mut self, stat: impl Into<StatDefinition>) -> Self {
        self.stats.push(stat.into());
        self
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &[StatDefinition] {
        &self.stats
    }

    pub fn stat(&self, kind: ComponentKind) -> Option<&StatDefinition> {
        self.stats.iter().find(|stat| stat.kind() == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.stats.iter().map(StatDefinition::kind)
    }

    /// Checks that the template is non-empty, names each slot once and that
    /// every stat is valid
    pub fn validate(&self) -> Result<(), ConstructError> {
        if self.stats.is_empty() {
            return Err(ConstructError::EmptyTemplate {
                template: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for stat in &self.stats {
            let kind = stat.kind();
            if !seen.insert(kind) {
                return Err(ConstructError::DuplicateSlot {
                    template: self.name.clone(),
                    kind,
                });
            }
            stat.validate()?;
        }
        Ok(())
    }
}
