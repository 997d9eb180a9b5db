use country_explorer::api::HttpTransport;
use country_explorer::locate::ConfiguredLocator;
use country_explorer::{Explorer, Role};
use tokio::task::JoinHandle;
use tracing::debug;

pub type LiveExplorer = Explorer<HttpTransport, ConfiguredLocator>;

/// Starts resolution cycles in the background, one at a time.
pub struct AppActions {
    explorer: LiveExplorer,
    in_flight: Option<JoinHandle<u64>>,
}

impl AppActions {
    pub const fn new(explorer: LiveExplorer) -> Self {
        Self {
            explorer,
            in_flight: None,
        }
    }

    pub fn where_am_i(&mut self) {
        let explorer = self.explorer.clone();
        self.spawn(async move { explorer.where_am_i().await });
    }

    /// Initial lookup by code, rendered as the primary card.
    pub fn show_country(&mut self, code: String) {
        let explorer = self.explorer.clone();
        self.spawn(async move { explorer.show_country(&code, Role::Primary).await });
    }

    /// Follow-up lookup from an activated card.
    pub fn click_country(&mut self, code: String) {
        let explorer = self.explorer.clone();
        self.spawn(async move { explorer.show_country(&code, Role::Clicked).await });
    }

    pub fn search_country(&mut self, name: String) {
        let explorer = self.explorer.clone();
        self.spawn(async move { explorer.search_country(&name).await });
    }

    /// A new cycle supersedes the previous one, so the old task is aborted.
    /// Whatever it already sent is dropped by the deck's generation check.
    fn spawn<F>(&mut self, cycle: F)
    where
        F: std::future::Future<Output = u64> + Send + 'static,
    {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("aborting superseded cycle");
                previous.abort();
            }
        }
        self.in_flight = Some(tokio::spawn(cycle));
    }
}
