use crate::app::input::helpers::wrap_increment;
use crate::app::state::{App, AppScreen, InputState};
use crossterm::event::KeyCode;
use sharkwatch::domain::FilterMode;

mod help;
mod map;
mod overview;
mod range;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.input_state == InputState::EditingRange {
        range::handle_range_input(app, key);
        return;
    }

    if handle_global_input(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Overview => overview::handle_overview_input(app, key),
        AppScreen::Map => map::handle_map_input(app, key),
    }
}

/// Keys shared by every screen. Returns `true` when the key was consumed.
fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('a') => app.apply_filter(FilterMode::All),
        KeyCode::Char('h') => app.apply_filter(FilterMode::Hotspots),
        KeyCode::Char('t') => app.apply_filter(FilterMode::Tags),
        KeyCode::Char('f') => {
            let next = wrap_increment(app.map().filter().index(), FilterMode::ALL.len());
            if let Some(filter) = FilterMode::from_index(next) {
                app.apply_filter(filter);
            }
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('d') => app.begin_range_edit(),
        KeyCode::Char('n') | KeyCode::Tab => app.controller.map_mut().select_next(),
        KeyCode::Char('p') | KeyCode::BackTab => app.controller.map_mut().select_prev(),
        KeyCode::Char('m') => app.toggle_screen(),
        KeyCode::Esc => app.controller.map_mut().close_popup(),
        _ => return false,
    }
    true
}
