use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::debug;

use crate::app::{handle_input, App};
use crate::ui;

// Event poll timeout; also the frame interval for the spinner and fetch pump.
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Advance animations and apply finished fetches
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code);
            }
            Ok(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "failed to read terminal event"),
        }
    }
    Ok(())
}
