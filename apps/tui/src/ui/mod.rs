// Rendering entry point; screens draw from `App` state only.

pub mod screens;
pub mod widgets;

use crate::app::state::{AppScreen, InputState};
use crate::app::App;
use ratatui::style::{Color, Style};
use ratatui::text::Line as TextLine;
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Overview => screens::overview::render_overview(app, f),
        AppScreen::Map => screens::map::render_map_screen(app, f),
    }

    if app.input_state == InputState::EditingRange {
        widgets::panels::render_range_dialog(app, f);
    }

    if app.show_help {
        widgets::panels::render_help_popup(f);
    }
}

/// Spinner shown in the map title while a fetch cycle is outstanding.
pub fn loading_line(app: &App) -> Option<TextLine<'static>> {
    app.map().is_loading().then(|| {
        Throbber::default()
            .label("Loading map data...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Yellow))
            .to_line(&app.throbber_state)
    })
}
