//! Viewport window over a partition's flattened lines.
//!
//! `y_offset` is the first visible line; it is always clamped to
//! `[0, max(0, content_len - height)]`, so the window never scrolls past the
//! last line.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    y_offset: usize,
    height: usize,
    content_len: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { y_offset: 0, height, content_len: 0 }
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn content_len(&self) -> usize {
        self.content_len
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.set_y_offset(self.y_offset);
    }

    /// Replace the content length; an offset past the new end snaps to the
    /// bottom.
    pub fn set_content_len(&mut self, len: usize) {
        self.content_len = len;
        if self.y_offset > self.max_y_offset() {
            self.goto_bottom();
        }
    }

    pub fn max_y_offset(&self) -> usize {
        self.content_len.saturating_sub(self.height)
    }

    pub fn set_y_offset(&mut self, y: usize) {
        self.y_offset = y.min(self.max_y_offset());
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_y_offset()
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_y_offset();
    }

    /// Number of content lines actually on screen.
    pub fn visible_line_count(&self) -> usize {
        self.height.min(self.content_len.saturating_sub(self.y_offset))
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.y_offset..self.y_offset + self.visible_line_count()
    }

    /// Move the window by `delta` lines (negative is up), clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.y_offset.saturating_add_signed(delta);
        self.set_y_offset(target);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
