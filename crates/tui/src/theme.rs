//! Theme and styling for the Huemark TUI.
//!
//! Defines the color scheme and style helpers used throughout the
//! interface: a dark theme with a green accent matching the copy-success
//! check mark.

use ratatui::style::{Color, Modifier, Style};

/// Accent color for highlights and focus indicators.
pub const ACCENT: Color = Color::Rgb(72, 187, 120);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground color for hints, labels, and secondary information.
pub const FG_MUTED: Color = Color::Rgb(168, 168, 175);

/// Default border color for unfocused UI components.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

/// Focused border color.
pub const BORDER_FOCUS: Color = ACCENT;

/// Background color for highlighted rows.
pub const BG_HIGHLIGHT: Color = Color::Rgb(22, 36, 28);

/// Warning color for errors, alerts, and validation failures.
pub const WARN: Color = Color::Rgb(220, 96, 110);

/// Border style based on focus state.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Style for titles and headers.
pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

/// Style for normal text content.
pub fn text_style() -> Style {
    Style::default().fg(FG)
}

/// Style for muted or secondary text.
pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

/// Style for focused input rows; keeps a subtle background hint.
pub fn highlight_style() -> Style {
    Style::default().fg(FG).bg(BG_HIGHLIGHT)
}

/// Style for selected list items; accent + bold, no fill.
pub fn list_highlight_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
