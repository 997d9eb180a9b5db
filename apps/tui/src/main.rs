mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::actions::LiveExplorer;
use app::App;
use clap::Parser;
use cli::{CliArgs, StartupLookup};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use country_explorer::api::{Endpoints, HttpTransport};
use country_explorer::config::AppConfig;
use country_explorer::display;
use country_explorer::locate::ConfiguredLocator;
use country_explorer::logging::{self, LogTarget};
use country_explorer::Explorer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    // Without a terminal there is nothing to draw on
    let headless = args.headless || !is_terminal();
    let target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(&config, target)
        .map_err(|e| eyre!("Failed to open log file {}: {e}", config.log_file.display()))?;

    let transport = HttpTransport::new(config.request_timeout)?;
    let locator = ConfiguredLocator::new(config.home_position);
    let (display, events) = display::channel();
    let explorer: LiveExplorer = Explorer::new(
        transport,
        locator,
        Endpoints::from_config(&config),
        display,
    );

    let lookup = args.startup_lookup();
    info!(headless, ?lookup, "starting country explorer");

    if headless {
        return event::run_headless(
            &explorer,
            events,
            lookup.unwrap_or(StartupLookup::WhereAmI),
            args.json,
        )
        .await;
    }

    let mut app = App::new(explorer, events);
    if let Some(lookup) = lookup {
        app.start(lookup);
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
