use thiserror::Error;

use facet_shared::{PersistError, SyncError};

/// Errors surfaced by the Server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacetServerError {
    /// A packet or message could not be read or built
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Saving or loading the world failed
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}
