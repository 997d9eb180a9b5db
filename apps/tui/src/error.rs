use thiserror::Error;

/// The device cannot tell us where it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Permission to read the current position was denied")]
    PermissionDenied,
    #[error("The current position is unavailable")]
    PositionUnavailable,
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("{label} ({status})")]
    Lookup { label: String, status: u16 },

    #[error("Could not parse the response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("{label}")]
    NoMatch { label: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Could not build the HTTP client: {0}")]
    Client(String),
}

impl ExplorerError {
    /// HTTP status of a failed lookup, if the failure came from one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Lookup { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text written into the display when a cycle fails.
    pub fn inline_message(&self) -> String {
        format!("Something went wrong 💥 {self}. Try again!")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} and {other} must be set together")]
    Incomplete {
        key: &'static str,
        other: &'static str,
    },

    #[error("coordinates out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_message_contains_label_and_status() {
        let error = ExplorerError::Lookup {
            label: "Country not found".to_string(),
            status: 404,
        };
        assert_eq!(error.to_string(), "Country not found (404)");
        assert_eq!(error.status(), Some(404));
        assert_eq!(
            error.inline_message(),
            "Something went wrong 💥 Country not found (404). Try again!"
        );
    }

    #[test]
    fn capability_errors_convert() {
        let error: ExplorerError = CapabilityError::PermissionDenied.into();
        assert!(matches!(
            error,
            ExplorerError::Capability(CapabilityError::PermissionDenied)
        ));
        assert_eq!(error.status(), None);
    }
}
