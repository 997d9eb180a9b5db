use crate::app::input::helpers::{grid_down, grid_up, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_cards_input(app: &mut App, key: KeyCode) {
    let total = app.deck.len();

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('w') => app.where_am_i(),
        KeyCode::Char('/') => {
            app.search_input.clear();
            app.screen = AppScreen::Search;
        }
        KeyCode::Enter => app.activate_selected_card(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.selected_card_index = wrap_decrement(app.selected_card_index, total);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.selected_card_index = wrap_increment(app.selected_card_index, total);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_card_index = grid_up(app.selected_card_index, app.grid_columns);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_card_index = grid_down(app.selected_card_index, app.grid_columns, total);
        }
        KeyCode::Home => {
            app.selected_card_index = 0;
        }
        KeyCode::End => {
            app.selected_card_index = total.saturating_sub(1);
        }
        _ => {}
    }
}
