//! Error types for world operations

use crate::foundation::collections::Handle;
use thiserror::Error;

/// World registry and query errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Malformed input such as a negative radius or an inverted box
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The handle does not address a live entity
    #[error("Unknown handle: {0:?}")]
    UnknownHandle(Handle),

    /// No entity matched the lookup
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result alias for world operations
pub type WorldResult<T> = Result<T, WorldError>;
