//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`]
/// explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the header bar.
    pub header: Style,
    /// Style for group captions.
    pub caption: Style,
    /// Style for field rows.
    pub field: Style,
    /// Style for unfocused buttons.
    pub button: Style,
    /// Style for the focused button.
    pub button_focused: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            caption: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            field: Style::default(),
            button: Style::default().fg(Color::Gray),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            caption: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            field: Style::default(),
            button: Style::default().fg(Color::DarkGray),
            button_focused: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Theme by name: "dark", "light" or "auto".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "auto" => Some(Self::auto_detect()),
            _ => None,
        }
    }
}
