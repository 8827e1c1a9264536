//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so the app shell never matches on crossterm
//! types directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                |
//! |-------------------------|----------------------|
//! | `q`, `Ctrl+c`           | `Quit`               |
//! | `l` / `m` / `t`         | `ShowKind(..)`       |
//! | `p`, `Space`            | `TogglePause`        |
//! | `↑` / `k`               | `Up`                 |
//! | `↓` / `j`               | `Down`               |
//! | `PageUp` / `PageDown`   | `PageUp` / `PageDown`|
//! | `Ctrl+u` / `Ctrl+d`     | half page up / down  |
//! | `g` / `G`               | `Top` / `Bottom`     |
//! | `y`                     | `Yank`               |
//! | `?`                     | `Help`               |
//! | `Esc`                   | `Escape`             |
//! | terminal resize         | `Resize(w, h)`       |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use otail_core::{Command, Kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ShowKind(Kind),
    TogglePause,
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    Yank,
    /// Toggle the keybinding popup.
    Help,
    Escape,
    Resize(u16, u16),
}

impl AppEvent {
    /// The session command this event stands for, if any.
    pub fn command(self) -> Option<Command> {
        let command = match self {
            AppEvent::Quit => Command::Quit,
            AppEvent::ShowKind(kind) => Command::Select(kind),
            AppEvent::TogglePause => Command::TogglePause,
            AppEvent::Up => Command::CursorUp,
            AppEvent::Down => Command::CursorDown,
            AppEvent::PageUp => Command::PageUp,
            AppEvent::PageDown => Command::PageDown,
            AppEvent::HalfPageUp => Command::HalfPageUp,
            AppEvent::HalfPageDown => Command::HalfPageDown,
            AppEvent::Top => Command::Top,
            AppEvent::Bottom => Command::Bottom,
            AppEvent::Yank => Command::Yank,
            AppEvent::Help | AppEvent::Escape | AppEvent::Resize(..) => return None,
        };
        Some(command)
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for mouse events, key releases and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE;
    match key.code {
        Char('q') if plain => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Char('l') if plain => Some(AppEvent::ShowKind(Kind::Logs)),
        Char('m') if plain => Some(AppEvent::ShowKind(Kind::Metrics)),
        Char('t') if plain => Some(AppEvent::ShowKind(Kind::Traces)),

        Char('p') | Char(' ') if plain => Some(AppEvent::TogglePause),

        Up | Char('k') if plain => Some(AppEvent::Up),
        Down | Char('j') if plain => Some(AppEvent::Down),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::HalfPageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::HalfPageDown),

        Char('g') if plain => Some(AppEvent::Top),
        // Terminals differ on whether SHIFT accompanies an uppercase letter.
        Char('G') => Some(AppEvent::Bottom),

        Char('y') if plain => Some(AppEvent::Yank),
        Char('?') => Some(AppEvent::Help),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
