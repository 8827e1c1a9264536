//! FrameStream — one long-lived connection behind a bounded frame channel.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────┐ ok  ┌─────────┐ error / peer close ┌──────────┐
//! │ dial │────►│ reading │───────────────────►│ redial   │
//! └──────┘     └─────────┘                    └──────────┘
//!    ▲  │ fail                                     │
//!    │  └──► sleep(backoff.delay(attempt)) ────────┘
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! Every wait is raced against the stream's [`CancellationToken`]; once it
//! fires the task exits, which closes both channels. Only a read that ends
//! under cancellation leaves a fault behind; transient dial errors are
//! retried and logged, never reported. Frames are forwarded with `try_send`: a
//! full channel drops the frame, so a slow UI never stalls the socket.

use crate::backoff::Backoff;
use crate::connector::{Connector, Frame, FrameSource, PingSink};
use crate::error::TransportError;
use crate::websocket::WsConnector;
use futures::{SinkExt, StreamExt};
use otail_core::config::StreamSettings;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default frame channel capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Keep-alive period; `None` disables pings.
    pub ping_interval: Option<Duration>,
    pub backoff: Backoff,
    /// Frame channel capacity.
    pub capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { ping_interval: None, backoff: Backoff::default(), capacity: DEFAULT_CAPACITY }
    }
}

impl From<&StreamSettings> for StreamConfig {
    fn from(settings: &StreamSettings) -> Self {
        Self {
            ping_interval: (settings.ping_interval_secs > 0)
                .then(|| Duration::from_secs(settings.ping_interval_secs)),
            backoff: Backoff::new(
                Duration::from_millis(settings.base_backoff_ms),
                Duration::from_millis(settings.max_backoff_ms),
            ),
            capacity: settings.buffer.max(1),
        }
    }
}

/// Handle to the background connection task.
///
/// Dropping the handle cancels the task.
pub struct FrameStream {
    frames: mpsc::Receiver<Frame>,
    faults: mpsc::Receiver<TransportError>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FrameStream {
    /// Validate `endpoint`/`origin` and start streaming from a WebSocket.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(endpoint: &str, origin: &str, config: StreamConfig) -> Result<Self, TransportError> {
        let connector = WsConnector::new(endpoint, origin)?;
        Ok(Self::spawn(connector, config))
    }

    /// Start streaming from an arbitrary connector.
    pub fn spawn<C: Connector>(connector: C, config: StreamConfig) -> Self {
        let (frame_tx, frames) = mpsc::channel(config.capacity.max(1));
        let (fault_tx, faults) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(connector, config, frame_tx, fault_tx, cancel.clone()));
        Self { frames, faults, cancel, task }
    }

    /// Received frames in wire order. Yields `None` once the task has ended.
    pub fn frames(&mut self) -> &mut mpsc::Receiver<Frame> {
        &mut self.frames
    }

    /// Terminal faults: the error a read ended with after cancellation. At
    /// most one is ever sent; closing before or between connections sends
    /// none.
    pub fn faults(&mut self) -> &mut mpsc::Receiver<TransportError> {
        &mut self.faults
    }

    /// Both receivers at once, for loops that drain frames and then faults.
    pub fn receivers(
        &mut self,
    ) -> (&mut mpsc::Receiver<Frame>, &mut mpsc::Receiver<TransportError>) {
        (&mut self.frames, &mut self.faults)
    }

    /// Stop all background activity. Calling it again is a no-op.
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("stream: close requested");
            self.cancel.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once the background task has returned.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

async fn run<C: Connector>(
    connector: C,
    config: StreamConfig,
    frames: mpsc::Sender<Frame>,
    faults: mpsc::Sender<TransportError>,
    cancel: CancellationToken,
) {
    let mut attempt: u32 = 0;
    let fault = loop {
        if cancel.is_cancelled() {
            break None;
        }

        let dialled = tokio::select! {
            biased;
            _ = cancel.cancelled() => break None,
            dialled = connector.connect() => dialled,
        };
        let link = match dialled {
            Ok(link) => link,
            Err(err) => {
                let wait = config.backoff.delay(attempt);
                tracing::warn!(attempt, ?wait, error = %err, "stream: dial failed");
                attempt = attempt.saturating_add(1);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break None,
                    _ = tokio::time::sleep(wait) => continue,
                }
            }
        };
        attempt = 0;

        let connection = cancel.child_token();
        if let (Some(period), Some(sink)) = (config.ping_interval, link.keepalive) {
            tokio::spawn(keepalive(sink, period, connection.clone()));
        }
        let err = read_loop(link.frames, &frames, &cancel).await;
        connection.cancel();

        if cancel.is_cancelled() {
            break Some(err);
        }
        tracing::warn!(error = %err, "stream: connection lost, redialling");
    };

    match fault {
        Some(err) => {
            tracing::debug!(error = %err, "stream: stopped");
            let _ = faults.try_send(err);
        }
        None => tracing::debug!("stream: stopped"),
    }
}

/// Forward frames until the connection fails or the stream is cancelled.
/// Returns the reason the connection ended.
async fn read_loop(
    mut source: FrameSource,
    frames: &mpsc::Sender<Frame>,
    cancel: &CancellationToken,
) -> TransportError {
    let mut dropped: u64 = 0;
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return TransportError::Cancelled,
            next = source.next() => next,
        };
        match next {
            Some(Ok(frame)) => match frames.try_send(frame) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    dropped += 1;
                    tracing::trace!(dropped, "stream: channel full, frame dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    // Nobody is reading any more.
                    cancel.cancel();
                    return TransportError::Cancelled;
                }
            },
            Some(Err(err)) => return err,
            None => return TransportError::Closed,
        }
    }
}

/// Send an empty ping every `period` until `connection` is cancelled or a
/// send fails.
async fn keepalive(mut sink: PingSink, period: Duration, connection: CancellationToken) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = connection.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(err) = sink.send(()).await {
                    tracing::warn!(error = %err, "stream: keep-alive ping failed");
                    break;
                }
                tracing::trace!("stream: ping sent");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::Link;
    use futures::future::BoxFuture;
    use futures::{stream, FutureExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Yields the same frames on every dial, then hangs until cancelled.
    struct Repeat {
        frames: Vec<&'static str>,
        dials: Arc<AtomicUsize>,
    }

    impl Connector for Repeat {
        fn connect(&self) -> BoxFuture<'static, Result<Link, TransportError>> {
            self.dials.fetch_add(1, Ordering::SeqCst);
            let frames: Vec<_> = self.frames.iter().map(|f| Ok(f.as_bytes().to_vec())).collect();
            async move { Ok(Link::new(stream::iter(frames).chain(stream::pending()).boxed())) }
                .boxed()
        }
    }

    #[test]
    fn config_from_settings() {
        let settings = StreamSettings { ping_interval_secs: 0, buffer: 0, ..StreamSettings::default() };
        let cfg = StreamConfig::from(&settings);
        assert_eq!(cfg.ping_interval, None);
        assert_eq!(cfg.capacity, 1);
        assert_eq!(cfg.backoff, Backoff::default());

        let cfg = StreamConfig::from(&StreamSettings::default());
        assert_eq!(cfg.ping_interval, Some(Duration::from_secs(30)));
        assert_eq!(cfg.capacity, 1024);
    }

    #[tokio::test]
    async fn forwards_frames_in_order() {
        let dials = Arc::new(AtomicUsize::new(0));
        let mut fs = FrameStream::spawn(
            Repeat { frames: vec!["a", "b", "c"], dials: dials.clone() },
            StreamConfig::default(),
        );
        for want in ["a", "b", "c"] {
            assert_eq!(fs.frames().recv().await.unwrap(), want.as_bytes());
        }
        assert_eq!(dials.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn close_is_idempotent_and_ends_the_feed() {
        let mut fs = FrameStream::spawn(
            Repeat { frames: vec![], dials: Arc::default() },
            StreamConfig::default(),
        );
        tokio::task::yield_now().await;
        fs.close();
        fs.close();
        assert!(fs.is_closed());
        assert!(fs.frames().recv().await.is_none());
        assert!(matches!(fs.faults().recv().await, Some(TransportError::Cancelled)));
    }

    #[tokio::test]
    async fn close_before_the_first_dial_leaves_no_fault() {
        let dials = Arc::new(AtomicUsize::new(0));
        let mut fs = FrameStream::spawn(
            Repeat { frames: vec!["a"], dials: dials.clone() },
            StreamConfig::default(),
        );
        fs.close();

        let (frames, faults) = fs.receivers();
        assert!(frames.recv().await.is_none());
        assert!(faults.recv().await.is_none());
        assert_eq!(dials.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_endpoint_is_rejected_before_spawning() {
        let err = FrameStream::open("::nope::", "http://localhost/", StreamConfig::default())
            .err()
            .unwrap();
        assert!(err.is_config());
    }
}
