// Remote services: the country lookup API and the reverse geocoder

mod transport;

pub use transport::{HttpReply, HttpTransport, Transport};

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::Coordinates;
use crate::error::ExplorerError;

pub const DEFAULT_LOOKUP_LABEL: &str = "Something went wrong";

/// GET `url` and decode the body as JSON.
///
/// A non-success status fails with [`ExplorerError::Lookup`] carrying `label`
/// (or [`DEFAULT_LOOKUP_LABEL`]) and the numeric status.
pub async fn fetch_json<T, D>(transport: &T, url: &str, label: Option<&str>) -> Result<D, ExplorerError>
where
    T: Transport,
    D: DeserializeOwned,
{
    debug!(url, "GET");
    let reply = transport.get(url).await?;

    if !reply.is_success() {
        debug!(url, status = reply.status, "lookup failed");
        return Err(ExplorerError::Lookup {
            label: label.unwrap_or(DEFAULT_LOOKUP_LABEL).to_string(),
            status: reply.status,
        });
    }

    serde_json::from_str(&reply.body).map_err(|source| ExplorerError::Parse {
        url: url.to_string(),
        source,
    })
}

/// Base URLs of both services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    countries: String,
    geocode: String,
}

impl Endpoints {
    pub fn new(countries: impl Into<String>, geocode: impl Into<String>) -> Self {
        Self {
            countries: countries.into().trim_end_matches('/').to_string(),
            geocode: geocode.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.countries_api_url, &config.geocode_api_url)
    }

    pub fn alpha(&self, code: &str) -> String {
        self.countries_path(&["alpha", code.trim()])
    }

    /// `name` is free user input and always ends up as one encoded segment.
    pub fn name(&self, name: &str) -> String {
        self.countries_path(&["name", name.trim()])
    }

    fn countries_path(&self, segments: &[&str]) -> String {
        let Ok(mut url) = Url::parse(&self.countries) else {
            // Unparseable base: the request fails later with a transport error.
            return format!("{}/{}", self.countries, segments.join("/"));
        };
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    pub fn reverse_geocode(&self, position: Coordinates) -> String {
        format!(
            "{}?latitude={}&longitude={}&localityLanguage=en",
            self.geocode, position.latitude, position.longitude
        )
    }
}
