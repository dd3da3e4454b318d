//! Errors raised while encoding or decoding editor messages

/// Failure to move a message across the UI boundary
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Not valid JSON, or an unknown message type or payload shape
    #[error("Malformed editor message: {0}")]
    Json(#[from] serde_json::Error),

    /// The host delivered a blank frame
    #[error("Empty editor message")]
    EmptyMessage,
}
