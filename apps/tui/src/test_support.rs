// Stub collaborators for unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::api::{HttpReply, Transport};
use crate::domain::Coordinates;
use crate::error::{CapabilityError, ExplorerError};
use crate::locate::Locator;

/// Answers from a fixed routing table; unknown URLs get a 404.
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: HashMap<String, HttpReply>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.to_string(),
            HttpReply {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Holds requests to `url` until the returned handle is notified.
    pub fn gate(&self, url: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, ExplorerError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        let gate = self
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        Ok(self.routes.get(url).cloned().unwrap_or_else(|| HttpReply {
            status: 404,
            body: r#"{"status":404,"message":"Not Found"}"#.to_string(),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct StubLocator {
    outcome: Result<Coordinates, CapabilityError>,
}

impl Default for StubLocator {
    fn default() -> Self {
        Self::failing(CapabilityError::Unsupported)
    }
}

impl StubLocator {
    pub const fn at(position: Coordinates) -> Self {
        Self {
            outcome: Ok(position),
        }
    }

    pub const fn failing(error: CapabilityError) -> Self {
        Self { outcome: Err(error) }
    }
}

impl Locator for StubLocator {
    async fn current_position(&self) -> Result<Coordinates, CapabilityError> {
        self.outcome.clone()
    }
}

pub fn country(code: &str, name: &str, borders: &[&str]) -> Value {
    json!({
        "cca3": code,
        "name": { "common": name, "official": name },
        "region": "Europe",
        "population": 5_700_000,
        "languages": { "eng": "English" },
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "flags": { "png": format!("https://flags.test/{code}.png") },
        "borders": borders,
    })
}

/// A lookup response: a one-element list.
pub fn country_json(code: &str, name: &str, borders: &[&str]) -> String {
    json!([country(code, name, borders)]).to_string()
}

pub fn geocode_json(city: &str, country_name: &str, country_code: &str) -> String {
    json!({
        "latitude": 38.72,
        "longitude": -9.14,
        "city": city,
        "countryName": country_name,
        "countryCode": country_code,
        "localityInfo": {},
    })
    .to_string()
}
