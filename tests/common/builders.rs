//! Test builders — ergonomic constructors for messages, stores and sessions.
//!
//! They panic on invalid input rather than returning `Result`.

use otail_core::session::PausedPolicy;
use otail_core::{Kind, Message, MessageStore, Session, SessionOptions};
use std::num::NonZeroUsize;

/// A message of `kind` with `n` lines `"{tag}-0" .. "{tag}-{n-1}"`.
pub fn message(kind: Kind, n: usize, tag: &str) -> Message {
    Message::new(kind, (0..n).map(|i| format!("{tag}-{i}")).collect())
}

/// A store filled with one message per entry of `sizes`, all of `kind`.
pub fn store_with(kind: Kind, sizes: &[usize]) -> MessageStore {
    let mut store = MessageStore::new();
    for (i, &n) in sizes.iter().enumerate() {
        store.add(message(kind, n, &format!("m{i}")));
    }
    store
}

/// Fluent builder for [`Session`] fixtures.
///
/// ```rust
/// let session = SessionBuilder::new().height(5).logs(&[2, 3]).build();
/// ```
#[derive(Default)]
pub struct SessionBuilder {
    options: SessionOptions,
    messages: Vec<Message>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, height: usize) -> Self {
        self.options.height = height;
        self
    }

    pub fn initial(mut self, kind: Kind) -> Self {
        self.options.initial = kind;
        self
    }

    pub fn retention(mut self, max_messages: usize) -> Self {
        self.options.retention = Some(NonZeroUsize::new(max_messages).expect("retention > 0"));
        self
    }

    pub fn queue_while_paused(mut self, limit: usize) -> Self {
        self.options.paused_policy = PausedPolicy::Queue;
        self.options.paused_queue_limit = limit;
        self
    }

    /// Add one message per entry of `sizes` to `kind`.
    pub fn messages(mut self, kind: Kind, sizes: &[usize]) -> Self {
        let base = self.messages.len();
        for (i, &n) in sizes.iter().enumerate() {
            self.messages.push(message(kind, n, &format!("{kind}{}", base + i)));
        }
        self
    }

    pub fn logs(self, sizes: &[usize]) -> Self {
        self.messages(Kind::Logs, sizes)
    }

    pub fn build(self) -> Session {
        let mut session = Session::new(self.options);
        for message in self.messages {
            session.ingest(message);
        }
        session
    }
}
