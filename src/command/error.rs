//! Wire-format errors.

use thiserror::Error;

/// Errors that can occur when moving commands or snapshots across the
/// JSON wire boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    /// Input had no string `type` tag
    #[error("Command has no \"type\" tag")]
    MissingType,

    /// The `type` tag names no known command
    #[error("Unknown command type '{0}'")]
    UnknownType(String),

    /// Input was not valid JSON or its payload had the wrong shape
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Serialization to JSON failed
    #[error("Encoding failed: {0}")]
    Encode(String),
}
