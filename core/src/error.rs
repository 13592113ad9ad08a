use thiserror::Error;

/// Failures of the transfer invocation, as surfaced to the screen.
///
/// There is no further layer to propagate to: every variant ends up
/// rendered, never silently dropped.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Transfer failed: {0}")]
    Rejected(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Backend returned no status message")]
    EmptyResponse,
}
