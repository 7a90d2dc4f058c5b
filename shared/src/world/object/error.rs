use thiserror::Error;

use crate::{
    types::{ObjectId, TemplateId},
    world::component::{
        component_kind::ComponentKind,
        error::{ComponentError, ConstructError},
    },
};

/// Errors that can occur while operating on an Object or the ObjectTable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// The Object holds no component in the requested slot
    #[error("Object {object} has no {kind} component")]
    ComponentNotFound {
        object: ObjectId,
        kind: ComponentKind,
    },

    /// A component of the Object failed to unserialize
    #[error("Object {object}: {source}")]
    Component {
        object: ObjectId,
        #[source]
        source: ComponentError,
    },

    /// A component list names the same slot twice
    #[error("Object {object} lists the {kind} slot more than once")]
    DuplicateComponent {
        object: ObjectId,
        kind: ComponentKind,
    },

    /// A component could not be built for the Object
    #[error("Object {object} could not be constructed: {source}")]
    Construct {
        object: ObjectId,
        #[source]
        source: ConstructError,
    },

    /// An Object with this id is already in the table
    #[error("Object {object} already exists")]
    AlreadyExists { object: ObjectId },

    /// A record refers to a template this peer does not know
    #[error("Object {object} refers to unknown {template}")]
    UnknownTemplate {
        object: ObjectId,
        template: TemplateId,
    },

    /// The state payload had bytes left over after every component was read,
    /// which means the peers disagree on the component layout
    #[error("Object {object} state has {remaining} unread bytes")]
    TrailingBytes { object: ObjectId, remaining: usize },
}

impl ObjectError {
    pub fn object(&self) -> ObjectId {
        match self {
            ObjectError::ComponentNotFound { object, .. }
            | ObjectError::Component { object, .. }
            | ObjectError::DuplicateComponent { object, .. }
            | ObjectError::Construct { object, .. }
            | ObjectError::AlreadyExists { object }
            | ObjectError::UnknownTemplate { object, .. }
            | ObjectError::TrailingBytes { object, .. } => *object,
        }
    }

    /// Whether the error came from a payload shorter than expected
    pub fn is_bounds(&self) -> bool {
        matches!(self, ObjectError::Component { source, .. } if source.is_bounds())
    }
}
