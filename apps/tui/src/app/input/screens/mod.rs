use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod cards;
mod help;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Cards => cards::handle_cards_input(app, key),
        AppScreen::Search => search::handle_search_input(app, key),
    }
}
