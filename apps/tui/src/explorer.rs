//! Resolution cycles: one country plus its border neighbours.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, error, info};

use crate::api::{fetch_json, Endpoints, Transport};
use crate::display::DisplayHandle;
use crate::domain::{CountryRecord, ReverseGeocode, Role};
use crate::error::ExplorerError;
use crate::locate::Locator;
use crate::render::Card;

const COUNTRY_NOT_FOUND: &str = "Country not found";
const GEOCODE_FAILED: &str = "Could not look up your position";
const NO_COUNTRY_HERE: &str = "No country found at your position";

/// Monotonic cycle counter shared by every clone of an [`Explorer`].
#[derive(Debug, Clone, Default)]
pub struct Generations(Arc<AtomicU64>);

impl Generations {
    /// Starts a new generation; every older one becomes stale.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// How the lead country of a cycle is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryQuery {
    Code(String),
    Name(String),
}

/// Everything a resolution cycle needs, passed explicitly instead of living
/// in globals. Clones share the transport, locator and generation counter.
pub struct Explorer<T, L> {
    transport: Arc<T>,
    locator: Arc<L>,
    endpoints: Arc<Endpoints>,
    display: DisplayHandle,
    generations: Generations,
}

impl<T, L> Clone for Explorer<T, L> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            locator: Arc::clone(&self.locator),
            endpoints: Arc::clone(&self.endpoints),
            display: self.display.clone(),
            generations: self.generations.clone(),
        }
    }
}

impl<T: Transport, L: Locator> Explorer<T, L> {
    pub fn new(transport: T, locator: L, endpoints: Endpoints, display: DisplayHandle) -> Self {
        Self {
            transport: Arc::new(transport),
            locator: Arc::new(locator),
            endpoints: Arc::new(endpoints),
            display,
            generations: Generations::default(),
        }
    }

    pub const fn generations(&self) -> &Generations {
        &self.generations
    }

    /// Locate the device, reverse-geocode it and show that country.
    pub async fn where_am_i(&self) -> u64 {
        let generation = self.begin_cycle();
        let outcome = self.locate_and_resolve(generation).await;
        self.finish_cycle(generation, outcome);
        generation
    }

    /// Show the country with `code` and its neighbours.
    pub async fn show_country(&self, code: &str, role: Role) -> u64 {
        let generation = self.begin_cycle();
        let outcome = self
            .resolve_country_and_neighbours(generation, CountryQuery::Code(code.to_string()), role)
            .await;
        self.finish_cycle(generation, outcome);
        generation
    }

    /// Show the first country matching `name` and its neighbours.
    pub async fn search_country(&self, name: &str) -> u64 {
        let generation = self.begin_cycle();
        let outcome = self
            .resolve_country_and_neighbours(
                generation,
                CountryQuery::Name(name.to_string()),
                Role::Primary,
            )
            .await;
        self.finish_cycle(generation, outcome);
        generation
    }

    fn begin_cycle(&self) -> u64 {
        let generation = self.generations.advance();
        debug!(generation, "cycle started");
        self.display.begin(generation);
        self.display.clear(generation);
        generation
    }

    /// The single place a cycle's failure is handled. The panel is revealed
    /// on both paths.
    fn finish_cycle(&self, generation: u64, outcome: Result<(), ExplorerError>) {
        match outcome {
            Ok(()) => debug!(generation, "cycle finished"),
            Err(e) => {
                error!(generation, error = %e, "resolution failed 💥💥💥");
                self.display.error(generation, e.inline_message());
            }
        }
        self.display.reveal(generation);
    }

    async fn locate_and_resolve(&self, generation: u64) -> Result<(), ExplorerError> {
        let position = self.locator.current_position().await?;
        debug!(%position, "position acquired");

        let url = self.endpoints.reverse_geocode(position);
        let place: ReverseGeocode = fetch_json(&*self.transport, &url, Some(GEOCODE_FAILED)).await?;

        let code = place
            .country_code()
            .ok_or_else(|| ExplorerError::NoMatch {
                label: NO_COUNTRY_HERE.to_string(),
            })?
            .to_string();

        let description = place.describe();
        info!(country_code = %code, "{description}");
        self.display.located(generation, description);

        self.resolve_country_and_neighbours(generation, CountryQuery::Code(code), Role::Primary)
            .await
    }

    async fn resolve_country_and_neighbours(
        &self,
        generation: u64,
        query: CountryQuery,
        role: Role,
    ) -> Result<(), ExplorerError> {
        let country = self.fetch_country(query).await?;
        if !self.generations.is_current(generation) {
            debug!(generation, "stale cycle, dropping {}", country.cca3);
            return Ok(());
        }
        self.display.append(generation, Card::render(&country, role));

        let neighbours = try_join_all(
            country
                .borders
                .iter()
                .map(|code| self.fetch_country(CountryQuery::Code(code.clone()))),
        )
        .await?;

        if !self.generations.is_current(generation) {
            debug!(generation, count = neighbours.len(), "stale cycle, dropping neighbours");
            return Ok(());
        }

        info!(
            country = %country.cca3,
            neighbours = neighbours.len(),
            "resolved"
        );
        for neighbour in &neighbours {
            self.display
                .append(generation, Card::render(neighbour, Role::Neighbour));
        }
        Ok(())
    }

    async fn fetch_country(&self, query: CountryQuery) -> Result<CountryRecord, ExplorerError> {
        let url = match &query {
            CountryQuery::Code(code) => self.endpoints.alpha(code),
            CountryQuery::Name(name) => self.endpoints.name(name),
        };

        let records: Vec<CountryRecord> =
            fetch_json(&*self.transport, &url, Some(COUNTRY_NOT_FOUND)).await?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| ExplorerError::NoMatch {
                label: COUNTRY_NOT_FOUND.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{self, CardDeck, DisplayEvents};
    use crate::domain::Coordinates;
    use crate::error::CapabilityError;
    use crate::test_support::{country, country_json, geocode_json, StubLocator, StubTransport};

    fn endpoints() -> Endpoints {
        Endpoints::new("https://countries.test/v3.1", "https://geo.test/reverse")
    }

    fn explorer(
        transport: StubTransport,
        locator: StubLocator,
    ) -> (Explorer<StubTransport, StubLocator>, DisplayEvents) {
        let (display, events) = display::channel();
        (
            Explorer::new(transport, locator, endpoints(), display),
            events,
        )
    }

    fn with_country(transport: StubTransport, code: &str, name: &str, borders: &[&str]) -> StubTransport {
        transport.route(&endpoints().alpha(code), 200, country_json(code, name, borders))
    }

    fn lisbon() -> Coordinates {
        Coordinates {
            latitude: 38.72,
            longitude: -9.14,
        }
    }

    fn summary(deck: &CardDeck) -> Vec<(String, Role)> {
        deck.cards()
            .iter()
            .map(|card| (card.code.clone(), card.role))
            .collect()
    }

    #[tokio::test]
    async fn portugal_with_spain_as_neighbour() {
        let transport = with_country(StubTransport::new(), "PRT", "Portugal", &["ESP"]);
        let transport = with_country(transport, "ESP", "Spain", &["PRT", "FRA"]);
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.show_country("PRT", Role::Primary).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(
            summary(&deck),
            [
                ("PRT".to_string(), Role::Primary),
                ("ESP".to_string(), Role::Neighbour)
            ]
        );
        assert_eq!(deck.cards()[0].name, "Portugal");
        assert_eq!(deck.cards()[1].name, "Spain");
        assert_eq!(deck.error(), None);
        assert!(deck.is_revealed());
    }

    #[tokio::test]
    async fn island_renders_a_single_card() {
        let transport = with_country(StubTransport::new(), "ISL", "Iceland", &[]);
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.show_country("ISL", Role::Clicked).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(summary(&deck), [("ISL".to_string(), Role::Clicked)]);
        assert!(deck.cards().iter().all(|card| card.role != Role::Neighbour));
    }

    #[tokio::test]
    async fn neighbours_follow_border_order() {
        let borders = ["AUT", "FRA", "ITA", "LIE", "DEU"];
        let mut transport = with_country(StubTransport::new(), "CHE", "Switzerland", &borders);
        for code in borders {
            transport = with_country(transport, code, code, &[]);
        }
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.show_country("CHE", Role::Primary).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(deck.len(), borders.len() + 1);
        assert_eq!(deck.cards()[0].role, Role::Primary);
        let neighbour_codes: Vec<&str> = deck.cards()[1..].iter().map(|c| c.code.as_str()).collect();
        assert_eq!(neighbour_codes, borders);
        assert_eq!(
            deck.cards().iter().filter(|card| card.role.is_lead()).count(),
            1
        );
    }

    #[tokio::test]
    async fn one_failed_neighbour_fails_the_whole_batch() {
        let transport = with_country(StubTransport::new(), "FRA", "France", &["BEL", "XXX", "ESP"]);
        let transport = with_country(transport, "BEL", "Belgium", &[]);
        let transport = with_country(transport, "ESP", "Spain", &[]);
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.show_country("FRA", Role::Primary).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(summary(&deck), [("FRA".to_string(), Role::Primary)]);
        let message = deck.error().unwrap_or_default();
        assert!(message.contains("Country not found (404)"), "{message}");
        assert!(deck.is_revealed());
    }

    #[tokio::test]
    async fn null_border_list_renders_a_single_card() {
        let body = r#"[{ "cca3": "ATA", "name": { "common": "Antarctica" }, "borders": null, "population": 1106.0 }]"#;
        let transport = StubTransport::new().route(&endpoints().alpha("ATA"), 200, body);
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.show_country("ATA", Role::Primary).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(summary(&deck), [("ATA".to_string(), Role::Primary)]);
        assert_eq!(deck.error(), None);
        assert_eq!(deck.cards()[0].population, "0.0 M");
    }

    #[tokio::test]
    async fn failed_location_drops_the_previous_cards() {
        let transport = with_country(StubTransport::new(), "ISL", "Iceland", &[]);
        let (explorer, mut events) = explorer(transport, StubLocator::default());
        let mut deck = CardDeck::new();

        explorer.show_country("ISL", Role::Primary).await;
        events.drain_into(&mut deck);
        assert_eq!(deck.len(), 1);

        explorer.where_am_i().await;
        events.drain_into(&mut deck);
        assert!(deck.is_empty());
        assert!(deck.error().is_some());
    }

    #[tokio::test]
    async fn unknown_code_shows_inline_error() {
        let (explorer, mut events) = explorer(StubTransport::new(), StubLocator::default());

        explorer.show_country("NOPE", Role::Clicked).await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert!(deck.is_empty());
        assert_eq!(
            deck.error(),
            Some("Something went wrong 💥 Country not found (404). Try again!")
        );
    }

    #[tokio::test]
    async fn search_by_name_uses_first_match() {
        let url = endpoints().name("guinea");
        let body = serde_json::json!([
            country("GIN", "Guinea", &[]),
            country("GNB", "Guinea-Bissau", &[]),
        ])
        .to_string();
        let transport = StubTransport::new().route(&url, 200, body);
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.search_country("guinea").await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(summary(&deck), [("GIN".to_string(), Role::Primary)]);
    }

    #[tokio::test]
    async fn empty_result_list_is_no_match() {
        let url = endpoints().name("atlantis");
        let transport = StubTransport::new().route(&url, 200, "[]");
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        explorer.search_country("atlantis").await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert!(deck.is_empty());
        assert!(deck.error().is_some());
    }

    #[tokio::test]
    async fn where_am_i_resolves_geocoded_country() {
        let geocode_url = endpoints().reverse_geocode(lisbon());
        let transport = StubTransport::new().route(&geocode_url, 200, geocode_json("Lisbon", "Portugal", "PT"));
        let transport = with_country(transport, "PT", "Portugal", &["ESP"]);
        let transport = with_country(transport, "ESP", "Spain", &[]);
        let (explorer, mut events) = explorer(transport, StubLocator::at(lisbon()));

        explorer.where_am_i().await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(deck.location(), Some("You are in Lisbon, Portugal"));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].role, Role::Primary);
        assert_eq!(deck.cards()[1].role, Role::Neighbour);
    }

    #[tokio::test]
    async fn geocoded_code_rejected_by_lookup_shows_error_and_reveals() {
        let geocode_url = endpoints().reverse_geocode(lisbon());
        let transport =
            StubTransport::new().route(&geocode_url, 200, geocode_json("Nowhere", "Nowhere", "ZZ"));
        let (explorer, mut events) = explorer(transport, StubLocator::at(lisbon()));

        explorer.where_am_i().await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert!(deck.is_empty());
        assert!(deck.error().unwrap_or_default().contains("404"));
        assert!(deck.is_revealed());
        assert!(!deck.is_busy());
    }

    #[tokio::test]
    async fn geocoder_failure_is_a_lookup_error() {
        let geocode_url = endpoints().reverse_geocode(lisbon());
        let transport = StubTransport::new().route(&geocode_url, 403, "{}");
        let (explorer, mut events) = explorer(transport, StubLocator::at(lisbon()));

        explorer.where_am_i().await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(
            deck.error(),
            Some("Something went wrong 💥 Could not look up your position (403). Try again!")
        );
    }

    #[tokio::test]
    async fn missing_capability_stops_before_any_request() {
        let transport = StubTransport::new();
        let (explorer, mut events) =
            explorer(transport, StubLocator::failing(CapabilityError::Unsupported));

        explorer.where_am_i().await;

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(
            deck.error(),
            Some("Something went wrong 💥 Geolocation is not supported on this device. Try again!")
        );
        assert!(deck.is_revealed());
        assert!(explorer.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn stale_cycle_never_reaches_the_display() -> Result<(), Box<dyn std::error::Error>> {
        let transport = with_country(StubTransport::new(), "AND", "Andorra", &["FRA"]);
        let transport = with_country(transport, "FRA", "France", &[]);
        let transport = with_country(transport, "ISL", "Iceland", &[]);
        let gate = transport.gate(&endpoints().alpha("FRA"));
        let (explorer, mut events) = explorer(transport, StubLocator::default());

        let slow = tokio::spawn({
            let explorer = explorer.clone();
            async move { explorer.show_country("AND", Role::Primary).await }
        });

        // Let the first cycle get as far as the held neighbour request.
        while !explorer.transport.requests().contains(&endpoints().alpha("FRA")) {
            tokio::task::yield_now().await;
        }

        let newer = explorer.show_country("ISL", Role::Clicked).await;
        gate.notify_one();
        let older = slow.await?;
        assert!(older < newer);
        assert!(explorer.generations().is_current(newer));
        assert!(!explorer.generations().is_current(older));

        let mut deck = CardDeck::new();
        events.drain_into(&mut deck);
        assert_eq!(deck.generation(), newer);
        assert_eq!(summary(&deck), [("ISL".to_string(), Role::Clicked)]);
        assert!(deck.is_revealed());
        Ok(())
    }
}
