//! otail — tail live OpenTelemetry telemetry in the terminal.
//!
//! This crate re-exports the workspace layers so integration tests and
//! benches can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! FrameStream ──► classify ──► Session (MessageStore + Viewport) ──► UI
//!  (tokio)                      (UI thread)
//! ```
//!
//! The stream runs on background tasks and talks to the UI thread only
//! through its bounded frame channel and its fault channel.

pub use otail_core;
pub use otail_feeds;
pub use otail_tui;

pub use otail_core::{classify, Command, Effect, Entry, Kind, Message, MessageStore, Session, SessionOptions};
pub use otail_feeds::{Backoff, FrameStream, StreamConfig, TransportError};
