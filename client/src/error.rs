use thiserror::Error;

use facet_shared::SyncError;

/// Errors surfaced by the Client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacetClientError {
    /// A packet could not be read or built
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Every receiving end of the incoming queue is gone
    #[error("Incoming packet queue is disconnected")]
    QueueDisconnected,

    /// A bounded incoming queue has no room; `tick` must drain it first
    #[error("Incoming packet queue is full ({capacity} packets)")]
    QueueFull { capacity: usize },
}
