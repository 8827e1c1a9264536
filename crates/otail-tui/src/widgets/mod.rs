//! Ratatui widgets for the otail TUI.

pub mod help;
pub mod message_view;
pub mod status_bar;
pub mod tab_bar;
