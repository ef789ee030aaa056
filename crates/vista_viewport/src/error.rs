//! Viewport error types

use thiserror::Error;
use vista_core::{HostError, NodeId};

/// Errors surfaced by the viewport widget
///
/// None of these escape as panics: mutation calls on a disabled viewport are
/// silent no-ops, and item operations return `Err` as their failure value.
#[derive(Error, Debug)]
pub enum ViewportError {
    /// The viewport was never live or has been destroyed
    #[error("Viewport is not live")]
    NotLive,

    /// The pointer input source is closed
    #[error("Pointer input source is unavailable")]
    InputUnavailable,

    /// The item cannot be tracked by the content track
    #[error("Item {node:?} rejected: {reason}")]
    InvalidItem { node: NodeId, reason: &'static str },

    /// The host failed to create or move a visual
    #[error(transparent)]
    Host(#[from] HostError),

    /// The configuration could not be parsed
    #[error("Invalid viewport config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for viewport operations
pub type Result<T> = std::result::Result<T, ViewportError>;
