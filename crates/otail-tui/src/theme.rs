//! Colour theme for the otail TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`], so the
//! application works without any files on disk. [`Theme::by_name`] resolves
//! the `ui.theme` config value.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_THEME_SRC: &str = include_str!("themes/gruvbox.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML files
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        for (on, modifier) in [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ] {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawJson {
    key: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSelection {
    message: RawStyle,
    cursor: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTabs {
    active: RawStyle,
    inactive: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    pane: RawStyle,
    paused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    line: RawStyle,
    live: RawStyle,
    paused: RawStyle,
    notice: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    unparsed: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    json: RawJson,
    selection: RawSelection,
    tabs: RawTabs,
    borders: RawBorders,
    status: RawStatus,
    payload: RawPayload,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved ratatui styles; no allocation at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Object keys in pretty-printed JSON.
    pub json_key: Style,

    /// Lines of the message under the cursor.
    pub message_highlight: Style,
    /// The cursor line itself.
    pub cursor: Style,

    pub tab_active: Style,
    pub tab_inactive: Style,

    pub border: Style,
    /// Pane border while paused.
    pub border_paused: Style,

    pub status: Style,
    pub status_live: Style,
    /// The `[PAUSED]` badge.
    pub paused_badge: Style,
    pub notice: Style,
    pub error: Style,

    /// Payloads that could not be decoded as telemetry.
    pub unparsed: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

impl Theme {
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox() -> Self {
        Self::from_toml_str(GRUVBOX_THEME_SRC).expect("embedded gruvbox theme must be valid TOML")
    }

    /// Resolve a theme by name; unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox(),
            "default" | "" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            json_key: raw.json.key.into_style(),
            message_highlight: raw.selection.message.into_style(),
            cursor: raw.selection.cursor.into_style(),
            tab_active: raw.tabs.active.into_style(),
            tab_inactive: raw.tabs.inactive.into_style(),
            border: raw.borders.pane.into_style(),
            border_paused: raw.borders.paused.into_style(),
            status: raw.status.line.into_style(),
            status_live: raw.status.live.into_style(),
            paused_badge: raw.status.paused.into_style(),
            notice: raw.status.notice.into_style(),
            error: raw.status.error.into_style(),
            unparsed: raw.payload.unparsed.into_style(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Colour value from a theme file: anything ratatui's `Color` parser takes
/// (`dark_gray`, `light-blue`, `#rrggbb`, a bare index), plus `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.trim().strip_prefix("indexed:") {
        Some(index) => index.parse().ok().map(Color::Indexed),
        None => s.trim().parse().ok(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
