use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Coordinates;
use crate::error::ConfigError;

pub const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_GEOCODE_API_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "country-explorer.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub countries_api_url: String,
    pub geocode_api_url: String,
    /// `None` disables the request timeout.
    pub request_timeout: Option<Duration>,
    pub home_position: Option<Coordinates>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            countries_api_url: DEFAULT_COUNTRIES_API_URL.to_string(),
            geocode_api_url: DEFAULT_GEOCODE_API_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            home_position: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get("COUNTRIES_API_URL") {
            config.countries_api_url = url;
        }
        if let Some(url) = get("GEOCODE_API_URL") {
            config.geocode_api_url = url;
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_number("REQUEST_TIMEOUT_SECS", &secs)?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(path) = get("LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }
        config.debug = get("DEBUG").is_some_and(|value| value != "0" && value != "false");

        config.home_position = match (get("HOME_LATITUDE"), get("HOME_LONGITUDE")) {
            (Some(lat), Some(lng)) => {
                let latitude: f64 = parse_number("HOME_LATITUDE", &lat)?;
                let longitude: f64 = parse_number("HOME_LONGITUDE", &lng)?;
                Some(
                    Coordinates::new(latitude, longitude).ok_or(ConfigError::OutOfRange {
                        latitude,
                        longitude,
                    })?,
                )
            }
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    key: "HOME_LATITUDE",
                    other: "HOME_LONGITUDE",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    key: "HOME_LONGITUDE",
                    other: "HOME_LATITUDE",
                })
            }
            (None, None) => None,
        };

        Ok(config)
    }
}

fn parse_number<N: std::str::FromStr>(key: &'static str, value: &str) -> Result<N, ConfigError> {
    value.parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() -> Result<(), ConfigError> {
        let config = config_from(&[])?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.home_position, None);
        Ok(())
    }

    #[test]
    fn reads_overrides() -> Result<(), ConfigError> {
        let config = config_from(&[
            ("COUNTRIES_API_URL", "http://localhost:8080/v3.1"),
            ("REQUEST_TIMEOUT_SECS", "0"),
            ("HOME_LATITUDE", "38.72"),
            ("HOME_LONGITUDE", "-9.14"),
            ("DEBUG", "1"),
        ])?;

        assert_eq!(config.countries_api_url, "http://localhost:8080/v3.1");
        assert_eq!(config.request_timeout, None);
        assert_eq!(
            config.home_position,
            Some(Coordinates {
                latitude: 38.72,
                longitude: -9.14
            })
        );
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn rejects_half_a_position() {
        let result = config_from(&[("HOME_LATITUDE", "38.72")]);
        assert!(matches!(result, Err(ConfigError::Incomplete { .. })));
    }

    #[test]
    fn rejects_garbage_numbers() {
        let result = config_from(&[("REQUEST_TIMEOUT_SECS", "soon")]);
        assert!(matches!(
            result,
            Err(ConfigError::NotANumber {
                key: "REQUEST_TIMEOUT_SECS",
                ..
            })
        ));

        let result = config_from(&[("HOME_LATITUDE", "120"), ("HOME_LONGITUDE", "0")]);
        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
    }
}
