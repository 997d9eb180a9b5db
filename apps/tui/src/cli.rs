use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "country-explorer",
    version,
    about = "Look up a country and its neighbours"
)]
pub struct CliArgs {
    /// Run one lookup, print the cards and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Start with the country matching this name
    #[arg(long, value_name = "NAME", conflicts_with = "code")]
    pub country: Option<String>,

    /// Start with the country with this ISO code (e.g. PRT)
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,

    /// Latitude reported as the current position
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Longitude reported as the current position
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Override the country service base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the reverse geocoding service URL
    #[arg(long = "geocode-url", value_name = "URL")]
    pub geocode_url: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the log file used in TUI mode
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

/// What to resolve when the program starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupLookup {
    WhereAmI,
    Code(String),
    Name(String),
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("COUNTRIES_API_URL", url);
        }
        if let Some(url) = &self.geocode_url {
            std::env::set_var("GEOCODE_API_URL", url);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("REQUEST_TIMEOUT_SECS", timeout.to_string());
        }
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            std::env::set_var("HOME_LATITUDE", lat.to_string());
            std::env::set_var("HOME_LONGITUDE", lng.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// The lookup requested on the command line, if any.
    pub fn startup_lookup(&self) -> Option<StartupLookup> {
        if let Some(code) = self.code.as_deref().filter(|c| !c.trim().is_empty()) {
            return Some(StartupLookup::Code(code.trim().to_string()));
        }
        self.country
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(|name| StartupLookup::Name(name.trim().to_string()))
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
