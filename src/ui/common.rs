//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, the period bar, the status bar and
//! the help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::data::BUTTON_TOKENS;

/// Render the header bar: dashboard name, site, current window.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" QOS DASHBOARD ", app.theme.header),
        Span::raw("│ site: "),
        Span::styled(app.site.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" │ window: "),
        Span::styled(
            app.current_period.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ {} panels", app.panels.len())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the period bar: one tab per exposed period token, keyed 1-9.
///
/// Shows no selection while the window came from a zoom or pan rather than
/// a button press.
pub fn render_period_bar(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = BUTTON_TOKENS
        .iter()
        .enumerate()
        .map(|(i, token)| Line::from(format!(" {}:{} ", i + 1, token)))
        .collect();

    let mut tabs = Tabs::new(titles)
        .style(Style::default().add_modifier(Modifier::DIM))
        .highlight_style(app.theme.focused)
        .divider("|");
    if let Some(selected) = app.current_period_index() {
        tabs = tabs.select(selected);
    }

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages, otherwise the available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.modal_open {
        " Esc:close q:quit".to_string()
    } else {
        format!(
            " {} | Tab:focus 1-9:period z:zoom </>:pan r:refresh ?:help q:quit",
            app.focused_panel().title
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab ←/→ h/l  Switch panel focus"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Time window",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1-9        Select period (changes every chart)"),
        Line::from("  < / >      Pan the focused chart"),
        Line::from("  z / Enter  Pop the focused chart into the modal"),
        Line::from("  Esc        Close the modal"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r          Re-query everything"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay, responsive to terminal size
    let help_width = 52u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
