//! otail TUI — ratatui application shell.

pub mod app;
pub mod clipboard;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};

use otail_core::config::Config;
use otail_core::{Session, SessionOptions};
use otail_feeds::{FrameStream, StreamConfig};
use std::time::Duration;

/// Open the stream described by `config` and run the TUI until the user quits
/// or the stream fails.
///
/// The network side runs on a small tokio runtime owned by this function; the
/// UI loop stays on the calling thread. Endpoint and origin are validated
/// before the terminal is touched.
pub fn run(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("otail-net")
        .enable_all()
        .build()?;

    let stream = {
        let _guard = runtime.enter();
        FrameStream::open(
            &config.stream.endpoint,
            &config.stream.origin,
            StreamConfig::from(&config.stream),
        )?
    };
    tracing::info!(endpoint = %config.stream.endpoint, "starting otail");

    let session = Session::new(SessionOptions::from(&config.ui));
    let theme = theme::Theme::by_name(&config.ui.theme);
    let result = App::new(AppState::new(session, theme), stream, SystemClipboard::new()).run();

    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}
