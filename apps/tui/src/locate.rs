use std::future::Future;

use crate::domain::Coordinates;
use crate::error::CapabilityError;

/// Source of the device's current position, asked once per activation.
pub trait Locator: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, CapabilityError>> + Send;
}

/// A terminal has no positioning hardware, so the position comes from
/// configuration. Without one the capability is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocator {
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub const fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl Locator for ConfiguredLocator {
    async fn current_position(&self) -> Result<Coordinates, CapabilityError> {
        self.position.ok_or(CapabilityError::Unsupported)
    }
}
