use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    let surface = app.controller.map_mut().surface_mut();
    match key {
        KeyCode::Up => surface.pan(1.0, 0.0),
        KeyCode::Down => surface.pan(-1.0, 0.0),
        KeyCode::Left => surface.pan(0.0, -1.0),
        KeyCode::Right => surface.pan(0.0, 1.0),
        KeyCode::Char('+' | '=') => surface.zoom_in(),
        KeyCode::Char('-') => surface.zoom_out(),
        KeyCode::Char('0') => surface.reset_view(),
        _ => {}
    }
}
