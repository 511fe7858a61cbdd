use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_range_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.cancel_range_edit(),
        KeyCode::Enter => app.commit_range_edit(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.range_editor.switch_field();
        }
        KeyCode::Backspace => {
            app.range_editor.active_mut().pop();
        }
        KeyCode::Char(c) => {
            let field = app.range_editor.active_mut();
            if field.len() < 10 {
                field.push(c);
            }
        }
        _ => {}
    }
}
