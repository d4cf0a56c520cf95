//! Keyboard event handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::App;

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

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Focus movement
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.focus_prev(),

        // Activate the focused button
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused(),

        // Write the document
        KeyCode::Char('w') => {
            let Some(path) = app.document_path.clone() else {
                app.set_status_message("No output path; start with --out".to_string());
                return;
            };
            match app.save_document(&path) {
                Ok(()) => app.set_status_message(format!("Wrote {}", path.display())),
                Err(err) => app.set_status_message(format!("Write failed: {err}")),
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
