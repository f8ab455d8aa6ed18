/// Errors that can occur in the transport layer.
///
/// Each variant wraps an `io::Error` so the underlying cause (reset,
/// refused, broken pipe) survives into logs.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listener or completing the WebSocket upgrade failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// Writing a frame to the peer failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading a frame from the peer failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),
}
