//! Scripted [`Connector`] for transport harnesses.
//!
//! Each dial consumes the next [`Dial`] step. Once the script runs out, dials
//! never complete, so the stream loop parks instead of spinning.

use futures::future::{self, BoxFuture};
use futures::{stream, FutureExt, StreamExt};
use otail_feeds::{Connector, Frame, Link, TransportError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// How a scripted connection ends after its frames are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// Stay open with no further frames.
    Hang,
    /// Peer closes the connection.
    Close,
}

/// One scripted dial outcome.
#[derive(Debug, Clone)]
pub enum Dial {
    Refused,
    Connect { frames: Vec<Frame>, end: End, keepalive: bool },
}

impl Dial {
    pub fn frames<I, F>(frames: I, end: End) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Vec<u8>>,
    {
        Dial::Connect { frames: frames.into_iter().map(Into::into).collect(), end, keepalive: false }
    }

    /// An open connection that answers pings and never sends a frame.
    pub fn idle_with_keepalive() -> Self {
        Dial::Connect { frames: Vec::new(), end: End::Hang, keepalive: true }
    }
}

/// Shared observations of what the stream loop did.
#[derive(Debug, Default)]
pub struct Tally {
    dials: Mutex<Vec<Instant>>,
    pings: AtomicUsize,
}

impl Tally {
    pub fn dial_times(&self) -> Vec<Instant> {
        self.dials.lock().unwrap().clone()
    }

    pub fn dial_count(&self) -> usize {
        self.dials.lock().unwrap().len()
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

pub struct ScriptedConnector {
    script: Mutex<VecDeque<Dial>>,
    tally: Arc<Tally>,
}

impl ScriptedConnector {
    pub fn new(script: impl IntoIterator<Item = Dial>) -> (Self, Arc<Tally>) {
        let tally = Arc::new(Tally::default());
        let connector = Self { script: Mutex::new(script.into_iter().collect()), tally: tally.clone() };
        (connector, tally)
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self) -> BoxFuture<'static, Result<Link, TransportError>> {
        self.tally.dials.lock().unwrap().push(Instant::now());
        let step = self.script.lock().unwrap().pop_front();
        let tally = self.tally.clone();

        match step {
            None => future::pending().boxed(),
            Some(Dial::Refused) => future::ready(Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "scripted refusal",
            ))))
            .boxed(),
            Some(Dial::Connect { frames, end, keepalive }) => {
                let body = stream::iter(frames.into_iter().map(Ok));
                let frames = match end {
                    End::Hang => body.chain(stream::pending()).boxed(),
                    End::Close => body.boxed(),
                };
                let mut link = Link::new(frames);
                if keepalive {
                    let sink = futures::sink::unfold(tally, |tally, ()| async move {
                        tally.pings.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, TransportError>(tally)
                    });
                    link = link.with_keepalive(Box::pin(sink));
                }
                future::ready(Ok(link)).boxed()
            }
        }
    }
}
