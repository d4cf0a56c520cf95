//! Terminal rendering using ratatui.
//!
//! - [`theme`]: light/dark themes with terminal auto-detection
//! - [`widgets`]: painting of view trees, header, status bar and help

pub mod theme;
pub mod widgets;

pub use theme::Theme;
