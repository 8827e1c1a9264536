use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors raised while configuring or running a [`crate::FrameStream`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid origin header value {0:?}")]
    InvalidOrigin(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error("stream cancelled")]
    Cancelled,
}

impl TransportError {
    /// True for errors that come from bad configuration rather than the wire.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidEndpoint { .. } | Self::InvalidOrigin(_))
    }
}
