//! Driving port for binding locations to reserved identifiers.

use async_trait::async_trait;

use crate::domain::{ApiKey, AskeId, BatchReport, Error};

/// Canonical registration input.
///
/// Two-element request tuples arrive here with an empty description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterItem {
    /// Identifier text as supplied by the caller.
    pub id: String,
    /// Location text as supplied by the caller.
    pub location: String,
    /// Description; empty when omitted.
    pub description: String,
}

impl RegisterItem {
    /// Build an item, normalising a missing description to `""`.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            description: description.unwrap_or_default(),
        }
    }
}

/// Use-case port: bind or rebind identifiers the caller owns.
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Apply each item independently; unowned or failing items are skipped.
    async fn register(
        &self,
        api_key: &ApiKey,
        items: Vec<RegisterItem>,
    ) -> Result<BatchReport<AskeId>, Error>;
}
