// Export our modules for use in the binary and tests
pub mod api;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod explorer;
pub mod locate;
pub mod logging;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{Coordinates, CountryRecord, Role};
pub use error::{CapabilityError, ConfigError, ExplorerError};
pub use explorer::Explorer;
