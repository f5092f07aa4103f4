//! Driving port for reserving identifiers.

use async_trait::async_trait;

use crate::domain::{ApiKey, AskeId, Error};

/// Use-case port: allocate unbound identifiers for a registrant.
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Reserve `count` identifiers (raw query text; `None` uses the default).
    ///
    /// Ids are returned in generation order and are durably recorded before
    /// this returns.
    async fn reserve(&self, api_key: &ApiKey, count: Option<&str>) -> Result<Vec<AskeId>, Error>;
}
