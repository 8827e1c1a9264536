//! Help popup and the one-line key hint row.
//!
//! Toggle the popup with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("l  /  m  /  t", "Show logs / metrics / traces"),
    ("p  /  Space", "Pause or resume the stream"),
    ("↑ k  /  ↓ j", "Move cursor (scroll while live)"),
    ("PageUp / PageDown", "Scroll one page"),
    ("Ctrl+u / Ctrl+d", "Scroll half a page"),
    ("g  /  G", "Jump to top / bottom"),
    ("y", "Copy the message under the cursor"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(64, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" otail keybindings (? to close) ")
            .border_style(self.theme.border.add_modifier(Modifier::BOLD));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<20}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Bottom row listing the keys that matter in the current mode.
pub struct KeyHints<'a> {
    paused: bool,
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(paused: bool, theme: &'a Theme) -> Self {
        Self { paused, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = if self.paused {
            " ↑/↓ select  y copy  PgUp/PgDn scroll  p resume  l/m/t kind  q quit"
        } else {
            " p pause  l/m/t kind  PgUp/PgDn scroll  g/G top/bottom  ? help  q quit"
        };
        Paragraph::new(hints)
            .style(self.theme.status.add_modifier(Modifier::DIM))
            .render(area, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
