//! Tab bar widget — one tab per partition, with message counts.

use crate::theme::Theme;
use otail_core::{Kind, MessageStore};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Hotkey shown in front of each tab label.
fn hotkey(kind: Kind) -> char {
    match kind {
        Kind::Metrics => 'm',
        Kind::Traces => 't',
        _ => 'l',
    }
}

pub struct TabBar<'a> {
    store: &'a MessageStore,
    active: Kind,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(store: &'a MessageStore, active: Kind, theme: &'a Theme) -> Self {
        Self { store, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = Kind::TABS
            .iter()
            .map(|&kind| {
                Line::from(format!(
                    " {}:{} ({}) ",
                    hotkey(kind),
                    kind.label(),
                    self.store.message_count(kind)
                ))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active.slot())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
