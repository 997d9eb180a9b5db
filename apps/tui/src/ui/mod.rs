// UI module for country-explorer
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub use widgets::grid::grid_columns;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::cards::render_cards(app, f);

    if app.screen == AppScreen::Search {
        screens::search::render_search_popup(app, f);
    }
    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
