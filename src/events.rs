use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::{App, PanDirection};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // The modal overlay only responds to close and quit
    if app.modal_open {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('z') => app.close_modal(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Panel focus
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
            app.next_panel()
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
            app.prev_panel()
        }

        // Period buttons, 1-based like the on-screen bar
        KeyCode::Char(c @ '1'..='9') => {
            app.select_period(c as usize - '1' as usize);
        }

        // Pop the focused chart out into the modal
        KeyCode::Char('z') | KeyCode::Enter => app.zoom_focused(),

        // Pan the focused chart's window
        KeyCode::Char('<') | KeyCode::Char(',') => app.pan_focused(PanDirection::Back),
        KeyCode::Char('>') | KeyCode::Char('.') => app.pan_focused(PanDirection::Forward),

        // Re-query everything at the current period
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
