use std::sync::Mutex;
use std::time::{Duration, Instant};

use country_explorer::display::{CardDeck, DisplayEvents};
use country_explorer::render::Card;
use ratatui::style::Color;
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::{AppActions, LiveExplorer};
use crate::cli::StartupLookup;

const REVEAL_FADE_MS: u32 = 450;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Cards,
    Search,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub deck: CardDeck,
    pub selected_card_index: usize,
    /// Cards per grid row at the current terminal width.
    pub grid_columns: usize,
    pub search_input: String,
    pub status_message: String,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub throbber_state: ThrobberState,
    pub reveal_fx: Mutex<Option<Effect>>,
    pub actions: AppActions,
    events: DisplayEvents,
}

impl App {
    pub fn new(explorer: LiveExplorer, events: DisplayEvents) -> Self {
        Self {
            running: true,
            screen: AppScreen::Cards,
            show_help: false,
            deck: CardDeck::new(),
            selected_card_index: 0,
            grid_columns: 1,
            search_input: String::new(),
            status_message: "Press 'w' to find where you are, '/' to search a country".to_string(),
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            throbber_state: ThrobberState::default(),
            reveal_fx: Mutex::new(None),
            actions: AppActions::new(explorer),
            events,
        }
    }

    pub fn start(&mut self, lookup: StartupLookup) {
        match lookup {
            StartupLookup::WhereAmI => self.where_am_i(),
            StartupLookup::Code(code) => {
                self.status_message = format!("Looking up {code}...");
                self.actions.show_country(code);
            }
            StartupLookup::Name(name) => self.search(name),
        }
    }

    pub fn where_am_i(&mut self) {
        self.status_message = "Locating you...".to_string();
        self.actions.where_am_i();
    }

    pub fn search(&mut self, name: String) {
        self.status_message = format!("Searching for {name}...");
        self.actions.search_country(name);
    }

    /// Activating a card starts a fresh cycle for the country it is bound to.
    pub fn activate_selected_card(&mut self) {
        let Some((code, name)) = self
            .selected_card()
            .map(|card| (card.code.clone(), card.name.clone()))
        else {
            return;
        };
        self.status_message = format!("Looking up {name}...");
        self.actions.click_country(code);
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.deck.card(self.selected_card_index)
    }

    /// Advances timers and applies whatever the running cycles produced.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        let summary = self.events.drain_into(&mut self.deck);

        if summary.cleared {
            self.selected_card_index = 0;
        }
        if summary.revealed {
            self.on_revealed();
        }
        if self.deck.is_busy() {
            self.throbber_state.calc_next();
        }

        if self.selected_card_index >= self.deck.len() {
            self.selected_card_index = self.deck.len().saturating_sub(1);
        }
    }

    fn on_revealed(&mut self) {
        self.status_message = match self.deck.error() {
            Some(error) => format!("Error: {error}"),
            None => {
                let time = self
                    .deck
                    .finished_at()
                    .map(|at| at.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                format!("{} countries shown at {time}", self.deck.len())
            }
        };

        let fade = fx::fade_from_fg(Color::Black, (REVEAL_FADE_MS, Interpolation::SineOut));
        if let Ok(mut effect) = self.reveal_fx.lock() {
            *effect = Some(fade);
        }
    }
}
