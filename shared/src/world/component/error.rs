use thiserror::Error;

use facet_serde::SerdeErr;

use crate::world::component::component_kind::ComponentKind;

/// Errors that can occur while unserializing a component from the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The payload ended early or held an invalid encoding
    #[error("Failed to decode {kind} component: {source}")]
    Serde {
        kind: ComponentKind,
        #[source]
        source: SerdeErr,
    },

    /// A decoded field is outside the range the component accepts.
    /// The component is left unchanged.
    #[error("{kind} component received out-of-range {field} = {value}")]
    OutOfRange {
        kind: ComponentKind,
        field: &'static str,
        value: String,
    },

    /// A component kind byte that does not name any known component
    #[error("Unknown component kind {value}")]
    UnknownKind { value: u8 },
}

impl ComponentError {
    /// Whether the payload was shorter than the component's wire layout
    pub fn is_bounds(&self) -> bool {
        matches!(self, ComponentError::Serde { source, .. } if source.is_bounds())
    }
}

/// Errors that can occur while building a component from a stat definition.
///
/// An object cannot exist with half-initialized state, so these are raised
/// before anything is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// A stat definition holds values the component cannot start from
    #[error("Invalid {kind} stat definition: {reason}")]
    InvalidStat {
        kind: ComponentKind,
        reason: &'static str,
    },

    /// A template lists two stat definitions for the same component slot
    #[error("Template '{template}' defines the {kind} slot more than once")]
    DuplicateSlot {
        template: String,
        kind: ComponentKind,
    },

    /// A template with no stat definitions at all
    #[error("Template '{template}' has no stat definitions")]
    EmptyTemplate { template: String },
}
