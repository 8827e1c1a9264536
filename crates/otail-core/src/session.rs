//! Session — the cursor/viewport engine driven by the UI loop.
//!
//! A session owns the [`MessageStore`], the active [`Kind`], the [`Viewport`]
//! and the pause [`Cursor`]. Every user command goes through
//! [`Session::update`], which mutates the session in place and returns the
//! side effects (clipboard copy, quit) for the shell to carry out.
//!
//! # Modes
//!
//! - **Live**: incoming messages are stored and the viewport follows the tail.
//! - **Paused**: the active content is frozen. Incoming messages are dropped
//!   (or queued, see [`PausedPolicy`]), and a line cursor selects a message.
//!
//! # Cursor semantics
//!
//! `cursor.line` is a global line index into the active partition. It is
//! always `< max(1, total_lines)`. While paused the cursor is kept inside the
//! viewport, and moving it within [`CURSOR_BUFFER`] lines of an edge scrolls
//! the window one line ahead of it.

use crate::config::UiSettings;
use crate::store::{Added, Entry, MessageStore};
use crate::types::{Kind, Message};
use crate::viewport::Viewport;
use serde::Deserialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Lines kept between the cursor and the window edge while navigating.
pub const CURSOR_BUFFER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Paused,
}

/// What happens to messages that arrive while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PausedPolicy {
    /// Discard them; the pause is a frozen snapshot.
    #[default]
    Drop,
    /// Hold them in a bounded FIFO and store them on resume.
    Queue,
}

/// Selected line while paused, with the index of its owning entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    line: usize,
    owner: Option<usize>,
}

impl Cursor {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Index into the active partition's entries.
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }
}

/// The command surface exposed to the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(Kind),
    TogglePause,
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    Yank,
    Quit,
}

/// Side effects requested by [`Session::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Put this text on the system clipboard.
    Copy(String),
    /// Cancel the stream and leave the event loop.
    Quit,
}

/// Outcome of [`Session::ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Stored(Added),
    Queued,
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    /// Line belongs to the message under the cursor.
    Message,
    /// The cursor line itself.
    Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedLine<'a> {
    pub text: &'a str,
    pub highlight: Highlight,
    /// The owning message could not be decoded as telemetry.
    pub unparsed: bool,
}

/// Everything the renderer needs for one frame of the message pane.
///
/// Only the lines inside the viewport window are materialised; `lines[0]` is
/// global line `y_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<'a> {
    pub lines: Vec<RenderedLine<'a>>,
    pub y_offset: usize,
    pub height: usize,
    /// Lines in the whole active partition, for the scrollbar.
    pub total: usize,
    pub cursor: Option<usize>,
}

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub initial: Kind,
    pub retention: Option<NonZeroUsize>,
    pub paused_policy: PausedPolicy,
    pub paused_queue_limit: usize,
    pub height: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial: Kind::Logs,
            retention: None,
            paused_policy: PausedPolicy::Drop,
            paused_queue_limit: 1024,
            height: 0,
        }
    }
}

impl From<&UiSettings> for SessionOptions {
    fn from(ui: &UiSettings) -> Self {
        Self {
            initial: ui.initial_kind,
            retention: NonZeroUsize::new(ui.max_messages_per_kind),
            paused_policy: ui.paused_policy,
            paused_queue_limit: ui.paused_queue_limit,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    store: MessageStore,
    active: Kind,
    mode: Mode,
    cursor: Cursor,
    viewport: Viewport,
    policy: PausedPolicy,
    pending: VecDeque<Message>,
    pending_limit: usize,
    /// Messages discarded since the last pause began.
    dropped: usize,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        let store = match options.retention {
            Some(keep) => MessageStore::with_retention(keep),
            None => MessageStore::new(),
        };
        Self {
            store,
            active: options.initial.partition(),
            mode: Mode::Live,
            cursor: Cursor::default(),
            viewport: Viewport::new(options.height),
            policy: options.paused_policy,
            pending: VecDeque::new(),
            pending_limit: options.paused_queue_limit,
            dropped: 0,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn active(&self) -> Kind {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode == Mode::Paused
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn dropped_while_paused(&self) -> usize {
        self.dropped
    }

    pub fn queued(&self) -> usize {
        self.pending.len()
    }

    fn total_lines(&self) -> usize {
        self.store.total_lines(self.active)
    }

    // -- ingestion ----------------------------------------------------------

    /// Offer a classified message to the session.
    pub fn ingest(&mut self, message: Message) -> Ingest {
        match (self.mode, self.policy) {
            (Mode::Live, _) => Ingest::Stored(self.store_message(message)),
            (Mode::Paused, PausedPolicy::Drop) => {
                self.dropped += 1;
                Ingest::Dropped
            }
            (Mode::Paused, PausedPolicy::Queue) => {
                if self.pending_limit == 0 {
                    self.dropped += 1;
                    return Ingest::Dropped;
                }
                if self.pending.len() >= self.pending_limit {
                    self.pending.pop_front();
                    self.dropped += 1;
                }
                self.pending.push_back(message);
                Ingest::Queued
            }
        }
    }

    fn store_message(&mut self, message: Message) -> Added {
        let added = self.store.add(message);
        self.viewport.set_content_len(self.total_lines());
        self.viewport.goto_bottom();
        self.clamp_cursor();
        added
    }

    // -- commands -----------------------------------------------------------

    /// Apply one command and return the effects it requests.
    pub fn update(&mut self, command: Command) -> Vec<Effect> {
        let half = (self.viewport.height() / 2).max(1) as isize;
        let page = self.viewport.height().max(1) as isize;
        match command {
            Command::Select(kind) => self.select(kind),
            Command::TogglePause => self.toggle_pause(),
            Command::CursorUp if self.is_paused() => self.cursor_up(),
            Command::CursorDown if self.is_paused() => self.cursor_down(),
            // Outside a pause the arrows scroll the window a line at a time.
            Command::CursorUp => self.scroll_by(-1),
            Command::CursorDown => self.scroll_by(1),
            Command::PageUp => self.scroll_by(-page),
            Command::PageDown => self.scroll_by(page),
            Command::HalfPageUp => self.scroll_by(-half),
            Command::HalfPageDown => self.scroll_by(half),
            Command::Top => self.scroll_by(-(self.viewport.y_offset() as isize)),
            Command::Bottom => {
                let delta = self.viewport.max_y_offset() - self.viewport.y_offset();
                self.scroll_by(delta as isize)
            }
            Command::Yank => return self.yank().map(Effect::Copy).into_iter().collect(),
            Command::Quit => return vec![Effect::Quit],
        }
        Vec::new()
    }

    /// Make `kind` the displayed partition.
    pub fn select(&mut self, kind: Kind) {
        self.active = kind.partition();
        self.viewport.set_content_len(self.total_lines());
        self.clamp_cursor();
        match self.mode {
            Mode::Live => self.viewport.goto_bottom(),
            Mode::Paused => {
                self.ensure_cursor_visible();
                self.resolve();
            }
        }
        tracing::debug!(active = %self.active, cursor = self.cursor.line, "session: select kind");
    }

    pub fn toggle_pause(&mut self) {
        match self.mode {
            Mode::Live => {
                self.mode = Mode::Paused;
                self.dropped = 0;
                self.cursor = Cursor::default();
                let last_visible =
                    (self.viewport.y_offset() + self.viewport.visible_line_count()).saturating_sub(1);
                self.cursor.line = last_visible;
                self.clamp_cursor();
                self.ensure_cursor_visible();
                self.resolve();
            }
            Mode::Paused => {
                self.mode = Mode::Live;
                self.cursor.owner = None;
                let replay = std::mem::take(&mut self.pending);
                let replayed = replay.len();
                for message in replay {
                    self.store.add(message);
                }
                self.viewport.set_content_len(self.total_lines());
                self.viewport.goto_bottom();
                self.clamp_cursor();
                tracing::debug!(replayed, "session: resumed");
            }
        }
        tracing::debug!(mode = ?self.mode, cursor = self.cursor.line, "session: toggle pause");
    }

    pub fn cursor_up(&mut self) {
        if self.cursor.line == 0 {
            return;
        }
        self.cursor.line -= 1;
        if self.cursor.line < self.viewport.y_offset() + CURSOR_BUFFER && !self.viewport.at_top() {
            self.viewport.set_y_offset(self.viewport.y_offset() - 1);
        }
        self.ensure_cursor_visible();
        self.resolve();
        tracing::debug!(
            cursor = self.cursor.line,
            y_offset = self.viewport.y_offset(),
            "session: cursor up"
        );
    }

    pub fn cursor_down(&mut self) {
        if self.cursor.line + 1 >= self.total_lines() {
            return;
        }
        self.cursor.line += 1;
        let bottom = (self.viewport.y_offset() + self.viewport.visible_line_count())
            .saturating_sub(CURSOR_BUFFER);
        if self.cursor.line >= bottom && !self.viewport.at_bottom() {
            self.viewport.set_y_offset(self.viewport.y_offset() + 1);
        }
        self.ensure_cursor_visible();
        self.resolve();
        tracing::debug!(
            cursor = self.cursor.line,
            y_offset = self.viewport.y_offset(),
            "session: cursor down"
        );
    }

    /// Raw scroll input. While paused the cursor moves by the same delta so it
    /// keeps its place on screen.
    pub fn scroll_by(&mut self, delta: isize) {
        let before = self.viewport.y_offset();
        self.viewport.scroll_by(delta);
        if self.is_paused() {
            let moved = self.viewport.y_offset() as isize - before as isize;
            self.cursor.line = self.cursor.line.saturating_add_signed(moved);
            self.clamp_cursor();
            self.ensure_cursor_visible();
            self.resolve();
        }
        tracing::debug!(
            delta,
            y_offset = self.viewport.y_offset(),
            cursor = self.cursor.line,
            "session: scroll"
        );
    }

    /// Set the number of content rows the renderer can show.
    pub fn resize(&mut self, height: usize) {
        if height == self.viewport.height() {
            return;
        }
        self.viewport.set_height(height);
        match self.mode {
            Mode::Live => self.viewport.goto_bottom(),
            Mode::Paused => {
                self.ensure_cursor_visible();
                self.resolve();
            }
        }
    }

    /// Text of the message under the cursor; only available while paused.
    pub fn yank(&self) -> Option<String> {
        self.selection().map(Message::text)
    }

    /// The message owning the cursor line, looked up fresh from the store.
    pub fn selection(&self) -> Option<&Message> {
        if !self.is_paused() {
            return None;
        }
        self.store.entry_at(self.active, self.cursor.line).map(Entry::message)
    }

    // -- rendering ----------------------------------------------------------

    /// Assemble the viewport window of the active partition with cursor and
    /// message highlights. Cost follows the window height, not the history.
    pub fn sync(&self) -> Rendered<'_> {
        let paused = self.is_paused();
        let cursor = paused.then_some(self.cursor.line);
        let window = self.viewport.visible_range();

        let lines = self
            .store
            .window(self.active, window)
            .map(|(idx, entry, text)| {
                let highlight = match cursor {
                    Some(line) if line == idx => Highlight::Cursor,
                    Some(line) if entry.contains(line) => Highlight::Message,
                    _ => Highlight::None,
                };
                let unparsed = entry.message().kind() == Kind::Unknown;
                RenderedLine { text, highlight, unparsed }
            })
            .collect();

        Rendered {
            lines,
            y_offset: self.viewport.y_offset(),
            height: self.viewport.height(),
            total: self.total_lines(),
            cursor,
        }
    }

    // -- invariants ---------------------------------------------------------

    fn clamp_cursor(&mut self) {
        let last = self.total_lines().saturating_sub(1);
        self.cursor.line = self.cursor.line.min(last);
    }

    fn ensure_cursor_visible(&mut self) {
        if !self.is_paused() {
            return;
        }
        let line = self.cursor.line;
        let top = self.viewport.y_offset();
        let height = self.viewport.height().max(1);
        if line < top {
            self.viewport.set_y_offset(line);
        } else if line >= top + height {
            self.viewport.set_y_offset(line + 1 - height);
        }
    }

    fn resolve(&mut self) {
        self.cursor.owner = if self.is_paused() {
            self.store.entry_index_at(self.active, self.cursor.line)
        } else {
            None
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
