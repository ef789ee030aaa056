//! Host error types

use thiserror::Error;

use crate::scene::VisualKind;

/// Errors raised by a host while creating or mutating visuals
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host cannot create visuals right now
    #[error("Host is not ready to create visuals")]
    NotReady,

    /// A specific visual could not be created
    #[error("Failed to create {kind:?} visual: {reason}")]
    VisualCreation { kind: VisualKind, reason: String },

    /// The node handle does not refer to a live node
    #[error("Unknown or destroyed scene node")]
    UnknownNode,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
