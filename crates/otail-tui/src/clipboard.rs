//! Clipboard access for yanking messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Backend(#[from] arboard::Error),
    #[error("clipboard unavailable")]
    Unavailable,
}

pub trait Clipboard {
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError>;
}

/// System clipboard using arboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        self.inner.as_mut().ok_or(ClipboardError::Unavailable)
    }
}

impl Clipboard for SystemClipboard {
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError> {
        self.ensure()?.set_text(contents.to_string())?;
        Ok(())
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// When set, every `set` fails.
    pub broken: bool,
}

impl Clipboard for MemoryClipboard {
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable);
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
