//! The seam between the stream loop and whatever carries the frames.
//!
//! Production code dials a WebSocket ([`crate::WsConnector`]); tests plug in
//! scripted connectors that yield canned frames and failures.

use crate::error::TransportError;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::Sink;
use std::pin::Pin;

/// One discrete unit of data received from the connection.
pub type Frame = Vec<u8>;

/// Incoming frames of one live connection. A `None` means the peer went away.
pub type FrameSource = BoxStream<'static, Result<Frame, TransportError>>;

/// Accepts `()` and sends one empty ping per item.
pub type PingSink = Pin<Box<dyn Sink<(), Error = TransportError> + Send>>;

/// A freshly established connection.
pub struct Link {
    pub frames: FrameSource,
    pub keepalive: Option<PingSink>,
}

impl Link {
    pub fn new(frames: FrameSource) -> Self {
        Self { frames, keepalive: None }
    }

    pub fn with_keepalive(mut self, sink: PingSink) -> Self {
        self.keepalive = Some(sink);
        self
    }
}

/// Dials a new [`Link`]. Called again after every disconnect.
pub trait Connector: Send + Sync + 'static {
    fn connect(&self) -> BoxFuture<'static, Result<Link, TransportError>>;
}
