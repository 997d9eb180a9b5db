use color_eyre::eyre::eyre;
use color_eyre::Result;
use country_explorer::display::{CardDeck, DisplayEvents};
use country_explorer::render::Card;
use country_explorer::Role;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt::Write as _;
use std::io::Stdout;
use tracing::{debug, info};

use crate::app::actions::LiveExplorer;
use crate::app::{handle_input, App};
use crate::cli::StartupLookup;
use crate::ui;

/// Run one resolution cycle without a UI and print what the panel would show.
pub async fn run_headless(
    explorer: &LiveExplorer,
    mut events: DisplayEvents,
    lookup: StartupLookup,
    json: bool,
) -> Result<()> {
    info!(?lookup, "running headless");

    let generation = match &lookup {
        StartupLookup::WhereAmI => explorer.where_am_i().await,
        StartupLookup::Code(code) => explorer.show_country(code, Role::Primary).await,
        StartupLookup::Name(name) => explorer.search_country(name).await,
    };

    let mut deck = CardDeck::new();
    let summary = events.drain_into(&mut deck);
    debug!(generation, applied = summary.applied, discarded = summary.discarded, "cycle drained");

    let report = HeadlessReport {
        location: deck.location().map(str::to_string),
        cards: deck.cards().to_vec(),
        error: deck.error().map(str::to_string),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", headless_text(&report));
    }

    match report.error {
        Some(error) => Err(eyre!(error)),
        None => Ok(()),
    }
}

/// The failure itself is reported once, by color-eyre, from the returned error.
fn headless_text(report: &HeadlessReport) -> String {
    let mut out = String::new();
    if let Some(location) = &report.location {
        let _ = writeln!(out, "{location}");
    }

    if report.error.is_some() {
        return out;
    }

    out.push_str("\nCountries\n=========\n");
    for card in &report.cards {
        let _ = writeln!(out, "\n[{}] {} ({})", card.role.label(), card.title(), card.code);
        let _ = writeln!(out, "  Region:     {}", card.region);
        let _ = writeln!(out, "  Population: {}", card.population);
        let _ = writeln!(out, "  Languages:  {}", card.languages);
        let _ = writeln!(out, "  Currencies: {}", card.currencies);
        if let Some(flag) = &card.flag_image {
            let _ = writeln!(out, "  Flag:       {flag}");
        }
    }
    out
}

#[derive(serde::Serialize)]
struct HeadlessReport {
    location: Option<String>,
    cards: Vec<Card>,
    error: Option<String>,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        app.update();

        if let Ok(size) = terminal.size() {
            // Two columns of margin on each side
            app.grid_columns = ui::grid_columns(size.width.saturating_sub(4));
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        // Polling blocks the thread, so yield to let cycles make progress
        tokio::task::yield_now().await;

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}
