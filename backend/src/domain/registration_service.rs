//! Registration: bind or rebind locations on identifiers the caller owns.
//!
//! Ownership is checked per item against the store. Items that are not
//! owned, malformed, or rejected by the store are skipped silently from the
//! caller's point of view; the [`BatchReport`] keeps the reason.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::authorization::{owns, resolve_registrant};
use super::ports::{IdentifierRepository, RegisterItem, RegistrantRepository, RegistrationCommand};
use super::{ApiKey, AskeId, BatchReport, Error, Location, Registrant, SkipReason};

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<R, I> {
    registrants: Arc<R>,
    identifiers: Arc<I>,
}

impl<R, I> RegistrationService<R, I> {
    /// Create a service over the given repositories.
    pub fn new(registrants: Arc<R>, identifiers: Arc<I>) -> Self {
        Self {
            registrants,
            identifiers,
        }
    }
}

impl<R, I> RegistrationService<R, I>
where
    I: IdentifierRepository,
{
    async fn register_one(
        &self,
        registrant: &Registrant,
        item: &RegisterItem,
    ) -> Result<AskeId, SkipReason> {
        let id = item
            .id
            .parse::<AskeId>()
            .map_err(|_| SkipReason::MalformedIdentifier)?;
        let location =
            Location::parse(&item.location).map_err(|err| SkipReason::InvalidLocation {
                reason: err.to_string(),
            })?;

        let owned = owns(self.identifiers.as_ref(), registrant.api_key(), &id)
            .await
            .map_err(|err| SkipReason::Store {
                message: err.to_string(),
            })?;
        if !owned {
            return Err(SkipReason::NotOwned);
        }

        let updated = self
            .identifiers
            .update_binding(registrant.id(), &id, &location, &item.description)
            .await
            .map_err(|err| SkipReason::Store {
                message: err.to_string(),
            })?;
        if updated { Ok(id) } else { Err(SkipReason::NotOwned) }
    }
}

#[async_trait]
impl<R, I> RegistrationCommand for RegistrationService<R, I>
where
    R: RegistrantRepository,
    I: IdentifierRepository,
{
    async fn register(
        &self,
        api_key: &ApiKey,
        items: Vec<RegisterItem>,
    ) -> Result<BatchReport<AskeId>, Error> {
        let registrant = resolve_registrant(self.registrants.as_ref(), api_key).await?;
        let mut report = BatchReport::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.register_one(&registrant, item).await {
                Ok(id) => report.commit(id),
                Err(reason) => {
                    warn!(index, %reason, "register item skipped");
                    report.skip(reason);
                }
            }
        }

        info!(
            registrant_id = %registrant.id(),
            key = %api_key.fingerprint(),
            committed = report.outcomes().len() - report.skipped_count(),
            skipped = report.skipped_count(),
            "register batch processed"
        );
        Ok(report)
    }
}
