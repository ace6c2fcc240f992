//! Errors raised while framing host/engine messages.

/// Errors from the JSON-lines codec.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// An inbound line is not a valid host command
    #[error("Malformed host command: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outbound event could not be written as JSON
    #[error("Failed to encode engine event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}
