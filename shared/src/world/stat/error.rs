use thiserror::Error;

use crate::{types::TemplateId, world::component::error::ConstructError};

/// Errors that can occur while registering object templates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Another template was already registered under this id
    #[error("{id} is already registered")]
    DuplicateId { id: TemplateId },

    /// Another template was already registered under this name
    #[error("Template name '{name}' is already registered")]
    DuplicateName { name: String },

    /// The template's stat definitions cannot build an object
    #[error("Template rejected: {0}")]
    Construct(#[from] ConstructError),
}
