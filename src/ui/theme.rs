//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on terminal
/// background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for the focused panel and active elements.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the header bar.
    pub header: Style,
    /// Style for the focused panel title.
    pub focused: Style,
    /// Style for loading placeholders.
    pub loading: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
    /// Per-series line colors, cycled by series index.
    pub series_palette: [Color; 6],
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            loading: Style::default().fg(Color::Yellow),
            border_type: BorderType::Rounded,
            series_palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Red,
            ],
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            loading: Style::default().fg(Color::Yellow),
            border_type: BorderType::Rounded,
            series_palette: [
                Color::Blue,
                Color::Magenta,
                Color::Green,
                Color::DarkGray,
                Color::Cyan,
                Color::Red,
            ],
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

    /// Line color for the series at `index`.
    pub fn series_color(&self, index: usize) -> Color {
        self.series_palette[index % self.series_palette.len()]
    }
}
