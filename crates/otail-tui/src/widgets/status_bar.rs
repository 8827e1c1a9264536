//! Status line — stream state, active kind, pause counters and notices.

use crate::theme::Theme;
use otail_core::Kind;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What the status line shows for one frame.
#[derive(Debug, Clone, Default)]
pub struct Status<'a> {
    pub paused: bool,
    pub active: Kind,
    /// Animation tick; selects the spinner glyph.
    pub tick: usize,
    pub dropped: usize,
    pub queued: usize,
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub struct StatusBar<'a> {
    status: Status<'a>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: Status<'a>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = &self.status;
        let theme = self.theme;
        let mut spans = Vec::new();

        if s.paused {
            spans.push(Span::styled(" [PAUSED] ", theme.paused_badge));
        } else {
            spans.push(Span::styled(
                format!(" {} Streaming ", spinner_frame(s.tick)),
                theme.status_live,
            ));
        }
        spans.push(Span::styled(format!(" {} ", s.active), theme.status));
        if s.paused && s.dropped > 0 {
            spans.push(Span::styled(format!(" dropped {} ", s.dropped), theme.status));
        }
        if s.queued > 0 {
            spans.push(Span::styled(format!(" queued {} ", s.queued), theme.status));
        }
        if let Some(error) = s.error {
            spans.push(Span::styled(format!(" {error} "), theme.error));
        } else if let Some(notice) = s.notice {
            spans.push(Span::styled(format!(" {notice} "), theme.notice));
        }

        Paragraph::new(Line::from(spans)).style(theme.status).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    fn draw(status: Status) -> String {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(status, &Theme::load_default()).render(area, &mut buf);
        row(&buf)
    }

    #[test]
    fn paused_shows_badge_and_drops() {
        let line = draw(Status {
            paused: true,
            active: Kind::Metrics,
            dropped: 4,
            ..Status::default()
        });
        assert!(line.contains("[PAUSED]"), "{line}");
        assert!(line.contains("metrics"), "{line}");
        assert!(line.contains("dropped 4"), "{line}");
    }

    #[test]
    fn live_shows_spinner() {
        let line = draw(Status { tick: 1, ..Status::default() });
        assert!(line.contains("⠙ Streaming"), "{line}");
        assert!(line.contains(" logs "), "{line}");
        assert!(!line.contains("PAUSED"));
    }

    #[test]
    fn error_wins_over_notice() {
        let line = draw(Status { notice: Some("copied"), error: Some("stream ended"), ..Status::default() });
        assert!(line.contains("stream ended"));
        assert!(!line.contains("copied"));
    }
}
