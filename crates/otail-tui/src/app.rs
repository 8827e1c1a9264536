//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each tick drains a bounded
//! number of frames from the stream into the [`Session`], redraws if anything
//! visible changed, then waits up to 16 ms for input.

use crate::{
    clipboard::Clipboard,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        help::{HelpPopup, KeyHints},
        message_view::MessageView,
        status_bar::{Status, StatusBar},
        tab_bar::TabBar,
    },
};
use crossterm::{
    event as ct_event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use otail_core::{classify, Effect, Session};
use otail_feeds::{Frame, FrameStream, TransportError};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame as TermFrame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Upper bound on frames ingested per tick so input stays responsive.
pub const MAX_FRAMES_PER_TICK: usize = 256;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Ticks a notice stays on the status line (about two seconds).
const NOTICE_TICKS: usize = 120;

/// Ticks per spinner frame.
const SPINNER_TICKS: usize = 6;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: Session,
    pub theme: Theme,
    pub show_help: bool,
    pub tick: usize,
    pub notice: Option<(String, usize)>,
    /// Terminal stream failure; ends the loop.
    pub fault: Option<String>,
    pub quit: bool,
    /// Something visible changed since the last draw.
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            session,
            theme,
            show_help: false,
            tick: 0,
            notice: None,
            fault: None,
            quit: false,
            needs_redraw: true,
        }
    }

    /// Move up to [`MAX_FRAMES_PER_TICK`] frames into the session, then check
    /// for a terminal fault. Returns the number of frames ingested.
    pub fn pump(
        &mut self,
        frames: &mut mpsc::Receiver<Frame>,
        faults: &mut mpsc::Receiver<TransportError>,
    ) -> usize {
        let mut ingested = 0;
        while ingested < MAX_FRAMES_PER_TICK {
            match frames.try_recv() {
                Ok(frame) => {
                    self.session.ingest(classify(&frame));
                    ingested += 1;
                    self.needs_redraw = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    let reason = match faults.try_recv() {
                        Ok(err) => format!("stream ended: {err}"),
                        Err(_) => "stream ended".to_string(),
                    };
                    self.fail(reason);
                    return ingested;
                }
            }
        }
        if let Ok(err) = faults.try_recv() {
            self.fail(format!("stream fault: {err}"));
        }
        ingested
    }

    fn fail(&mut self, reason: String) {
        tracing::warn!(%reason, "app: stopping");
        self.fault = Some(reason);
        self.quit = true;
        self.needs_redraw = true;
    }

    /// Route one input event.
    pub fn handle(&mut self, event: AppEvent, clipboard: &mut dyn Clipboard) {
        self.needs_redraw = true;
        if self.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match event {
            AppEvent::Help => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            // Terminal resize is picked up by the next draw.
            AppEvent::Resize(..) | AppEvent::Escape => {}
            other => {
                if let Some(command) = other.command() {
                    tracing::debug!(?command, "key event");
                    let effects = self.session.update(command);
                    self.apply(effects, clipboard);
                }
            }
        }
    }

    /// Carry out the effects the session asked for.
    pub fn apply(&mut self, effects: Vec<Effect>, clipboard: &mut dyn Clipboard) {
        for effect in effects {
            match effect {
                Effect::Quit => {
                    tracing::debug!("quit");
                    self.quit = true;
                }
                Effect::Copy(text) => match clipboard.set(&text) {
                    Ok(()) => {
                        let lines = text.lines().count().max(1);
                        self.notify(format!("copied {lines} lines"));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard write failed");
                        self.notify(format!("copy failed: {err}"));
                    }
                },
            }
        }
    }

    pub fn notify(&mut self, text: String) {
        self.notice = Some((text, self.tick + NOTICE_TICKS));
        self.needs_redraw = true;
    }

    /// Advance the animation clock and expire the notice. Only a spinner step
    /// or an expired notice asks for a redraw.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if !self.session.is_paused() && self.tick % SPINNER_TICKS == 0 {
            self.needs_redraw = true;
        }
        if self.notice.as_ref().is_some_and(|(_, until)| self.tick >= *until) {
            self.notice = None;
            self.needs_redraw = true;
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<C: Clipboard> {
    state: AppState,
    stream: FrameStream,
    clipboard: C,
}

impl<C: Clipboard> App<C> {
    pub fn new(state: AppState, stream: FrameStream, clipboard: C) -> Self {
        Self { state, stream, clipboard }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit. Returns an error if the stream failed.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        self.stream.close();
        result?;
        match self.state.fault.take() {
            Some(reason) => Err(anyhow::anyhow!(reason)),
            None => Ok(()),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let (frames, faults) = self.stream.receivers();
                self.state.pump(frames, faults);
            }

            if self.state.needs_redraw {
                terminal.draw(|frame| draw(frame, &mut self.state))?;
                self.state.needs_redraw = false;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(POLL_INTERVAL)? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    self.state.handle(ev, &mut self.clipboard);
                }
            }
            self.state.on_tick();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Split the screen: tab strip, message pane, status line, key hints.
pub fn layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

pub fn draw(frame: &mut TermFrame, state: &mut AppState) {
    let area = frame.area();
    let [tabs, pane, status, hints] = layout(area);

    state.session.resize(MessageView::content_height(pane));

    let session = &state.session;
    let theme = &state.theme;
    let paused = session.is_paused();

    frame.render_widget(TabBar::new(session.store(), session.active(), theme), tabs);

    let rendered = session.sync();
    frame.render_widget(MessageView::new(&rendered, session.active(), paused, theme), pane);

    let line = Status {
        paused,
        active: session.active(),
        tick: state.tick / SPINNER_TICKS,
        dropped: session.dropped_while_paused(),
        queued: session.queued(),
        notice: state.notice(),
        error: state.fault.as_deref(),
    };
    frame.render_widget(StatusBar::new(line, theme), status);
    frame.render_widget(KeyHints::new(paused, theme), hints);

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
