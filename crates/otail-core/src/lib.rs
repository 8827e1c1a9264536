//! otail-core — classification, storage and navigation for otail.
//!
//! Everything in this crate is synchronous and single-owner: the UI loop
//! feeds classified frames into a [`Session`] and renders what it returns.
//!
//! # Architecture
//!
//! ```text
//! frame ──► classifier ──► Session ─┬─► MessageStore
//!                                   └─► Viewport / Cursor ──► Rendered
//! ```

pub mod classifier;
pub mod config;
pub mod otlp;
pub mod session;
pub mod store;
pub mod types;
pub mod viewport;

pub use classifier::classify;
pub use session::{Command, Effect, Session, SessionOptions};
pub use store::{Entry, MessageStore};
pub use types::{Kind, Message};
pub use viewport::Viewport;
