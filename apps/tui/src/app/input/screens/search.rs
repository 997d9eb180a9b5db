use crate::app::input::helpers::complete;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.search_input.clear();
            app.screen = AppScreen::Cards;
        }
        KeyCode::Enter => {
            let name = app.search_input.trim().to_string();
            if name.is_empty() {
                return;
            }
            app.search_input.clear();
            app.screen = AppScreen::Cards;
            app.search(name);
        }
        KeyCode::Tab => {
            let suggestion = complete(
                &app.search_input,
                app.deck.cards().iter().map(|card| card.name.as_str()),
            )
            .map(str::to_string);
            if let Some(name) = suggestion {
                app.search_input = name;
            }
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(ch) => {
            app.search_input.push(ch);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{fill_deck, offline_app};

    #[tokio::test]
    async fn typing_and_completion() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = offline_app()?;
        fill_deck(&mut app, &["PRT", "ESP"]);
        app.screen = AppScreen::Search;

        for ch in "cntry e".chars() {
            handle_search_input(&mut app, KeyCode::Char(ch));
        }
        handle_search_input(&mut app, KeyCode::Tab);
        assert_eq!(app.search_input, "Country ESP");

        handle_search_input(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_input, "Country ES");

        handle_search_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Cards);
        assert!(app.search_input.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn blank_search_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = offline_app()?;
        app.screen = AppScreen::Search;
        app.search_input = "   ".to_string();

        handle_search_input(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, AppScreen::Search);
        Ok(())
    }
}
