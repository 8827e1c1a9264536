//! otail-feeds — the resilient frame stream behind otail.
//!
//! A [`FrameStream`] owns one background task that dials a [`Connector`],
//! forwards every received frame into a bounded channel and redials with
//! [`Backoff`] when the connection drops. The UI loop only ever touches the
//! two receivers it exposes.

pub mod backoff;
pub mod connector;
pub mod error;
pub mod stream;
pub mod websocket;

pub use backoff::Backoff;
pub use connector::{Connector, Frame, FrameSource, Link, PingSink};
pub use error::TransportError;
pub use stream::{FrameStream, StreamConfig};
pub use websocket::WsConnector;
