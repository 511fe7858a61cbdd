use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_overview_input(app: &mut App, key: KeyCode) {
    let len = app.latest_tags.len();
    match key {
        KeyCode::Up => app.selected_tag_index = wrap_decrement(app.selected_tag_index, len),
        KeyCode::Down => app.selected_tag_index = wrap_increment(app.selected_tag_index, len),
        KeyCode::Home => app.selected_tag_index = 0,
        KeyCode::End => app.selected_tag_index = len.saturating_sub(1),
        _ => {}
    }
}
