//! Message pane — the scrollable view over the active partition.
//!
//! Renders the window described by [`Rendered`]: JSON object keys are
//! coloured, the cursor line and the rest of its owning message get the
//! selection styles, and undecodable payloads use the unparsed style. A
//! one-column scrollbar sits inside the right border.

use crate::theme::Theme;
use otail_core::session::{Highlight, Rendered, RenderedLine};
use otail_core::Kind;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use regex::Regex;
use std::sync::LazyLock;

/// A quoted JSON key followed by its colon.
static JSON_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*"\s*:"#).expect("JSON key pattern is valid"));

pub struct MessageView<'a> {
    rendered: &'a Rendered<'a>,
    kind: Kind,
    paused: bool,
    theme: &'a Theme,
}

impl<'a> MessageView<'a> {
    pub fn new(rendered: &'a Rendered<'a>, kind: Kind, paused: bool, theme: &'a Theme) -> Self {
        Self { rendered, kind, paused, theme }
    }

    /// Rows available for content once the border is drawn.
    pub fn content_height(area: Rect) -> usize {
        Block::bordered().inner(area).height as usize
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.paused { self.theme.border_paused } else { self.theme.border };
        let block = Block::bordered()
            .title(format!(" {} ", self.kind.label()))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let lines: Vec<Line> = self
            .rendered
            .lines
            .iter()
            .map(|line| render_line(line, self.theme))
            .collect();
        Paragraph::new(lines).render(text_area, buf);

        let total = self.rendered.total;
        if total > 0 {
            let mut sb_state = ScrollbarState::new(total)
                .position(self.rendered.y_offset)
                .viewport_content_length(self.rendered.height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

fn render_line<'a>(line: &RenderedLine<'a>, theme: &Theme) -> Line<'a> {
    let base = if line.unparsed { theme.unparsed } else { Style::default() };
    let rendered = if line.unparsed {
        Line::from(Span::styled(line.text, base))
    } else {
        Line::from(key_spans(line.text, theme.json_key))
    };
    match line.highlight {
        Highlight::None => rendered,
        Highlight::Message => rendered.patch_style(theme.message_highlight),
        Highlight::Cursor => rendered.patch_style(theme.cursor),
    }
}

/// Split `text` into spans, styling every JSON key with `key_style`.
fn key_spans(text: &str, key_style: Style) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in JSON_KEY.find_iter(text) {
        if m.start() > last {
            spans.push(Span::raw(&text[last..m.start()]));
        }
        spans.push(Span::styled(m.as_str(), key_style));
        last = m.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(Span::raw(&text[last..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn keys_are_split_out() {
        let style = Style::default().fg(Color::Cyan);
        let spans = key_spans(r#"  "name": "a: b","#, style);
        let parts: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["  ", r#""name":"#, r#" "a: b","#]);
        assert_eq!(spans[1].style, style);
    }

    #[test]
    fn escaped_quotes_stay_inside_the_key() {
        let spans = key_spans(r#""a\"b": 1"#, Style::default());
        assert_eq!(spans[0].content, r#""a\"b":"#);
    }

    #[test]
    fn plain_lines_are_one_span() {
        let spans = key_spans("]", Style::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "]");
    }
}
