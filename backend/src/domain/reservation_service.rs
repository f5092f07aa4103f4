//! Reservation: allocate batches of unbound identifiers.
//!
//! The batch is written in one atomic store call, so a failed reservation
//! leaves no rows behind and returns no ids.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::authorization::{map_identifier_error, resolve_registrant};
use super::ports::{IdentifierRepository, RegistrantRepository, ReservationCommand};
use super::{ApiKey, AskeId, Error};

/// Default number of ids reserved when the caller gives no count.
pub const DEFAULT_RESERVE_COUNT: u32 = 10;
/// Default upper bound on a single reservation.
pub const DEFAULT_MAX_RESERVE_COUNT: u32 = 10_000;

/// Count bounds applied to reservation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPolicy {
    /// Count used when the request omits one.
    pub default_count: u32,
    /// Largest count accepted in one request.
    pub max_count: u32,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_RESERVE_COUNT,
            max_count: DEFAULT_MAX_RESERVE_COUNT,
        }
    }
}

impl ReservationPolicy {
    /// Coerce raw count text into a batch size.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for text that is not a non-negative
    /// integer or exceeds `max_count`.
    pub fn coerce_count(&self, raw: Option<&str>) -> Result<u32, Error> {
        let count = match raw.map(str::trim) {
            None | Some("") => self.default_count,
            Some(value) => value.parse::<u32>().map_err(|_| {
                Error::invalid_parameter(format!(
                    "n must be a non-negative integer, got '{value}'"
                ))
            })?,
        };
        if count > self.max_count {
            return Err(Error::invalid_parameter(format!(
                "n must not exceed {}",
                self.max_count
            )));
        }
        Ok(count)
    }
}

/// Reservation service implementing [`ReservationCommand`].
#[derive(Clone)]
pub struct ReservationService<R, I> {
    registrants: Arc<R>,
    identifiers: Arc<I>,
    policy: ReservationPolicy,
}

impl<R, I> ReservationService<R, I> {
    /// Create a service over the given repositories.
    pub fn new(registrants: Arc<R>, identifiers: Arc<I>, policy: ReservationPolicy) -> Self {
        Self {
            registrants,
            identifiers,
            policy,
        }
    }
}

#[async_trait]
impl<R, I> ReservationCommand for ReservationService<R, I>
where
    R: RegistrantRepository,
    I: IdentifierRepository,
{
    async fn reserve(&self, api_key: &ApiKey, count: Option<&str>) -> Result<Vec<AskeId>, Error> {
        let registrant = resolve_registrant(self.registrants.as_ref(), api_key).await?;
        let count = self.policy.coerce_count(count)?;

        let ids: Vec<AskeId> = (0..count).map(|_| AskeId::generate()).collect();
        if ids.is_empty() {
            return Ok(ids);
        }

        self.identifiers
            .reserve(registrant.id(), &ids)
            .await
            .map_err(map_identifier_error)?;

        info!(
            registrant_id = %registrant.id(),
            key = %api_key.fingerprint(),
            count,
            "reserved identifiers"
        );
        Ok(ids)
    }
}
