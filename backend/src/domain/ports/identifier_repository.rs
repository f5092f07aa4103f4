//! Driven port for the identifier store.

use std::num::NonZeroU32;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{ApiKey, AskeId, IdentifierRecord, Location, RegistrantId, ResolvedIdentifier};

define_port_error! {
    /// Errors raised by identifier store adapters.
    pub enum IdentifierRepositoryError {
        /// The store could not be reached.
        Connection => "identifier store connection failed: {message}",
        /// A query failed during execution.
        Query => "identifier store query failed: {message}",
        /// A write referenced a registrant that does not exist.
        ForeignKey => "identifier store rejected dangling registrant: {message}",
        /// A write collided with an existing identifier.
        Duplicate => "identifier already exists: {message}",
    }
}

/// One page of the bulk listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: NonZeroU32,
    /// Maximum records per page.
    pub page_size: NonZeroU32,
}

impl PageRequest {
    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get() - 1) * u64::from(self.page_size.get())
    }

    /// Row limit for this page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.page_size.get()
    }
}

/// Port for reading and writing identifier records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifierRepository: Send + Sync {
    /// Insert unbound records for `ids` in one atomic write.
    ///
    /// Either every id is recorded or none is.
    async fn reserve(
        &self,
        registrant_id: RegistrantId,
        ids: &[AskeId],
    ) -> Result<(), IdentifierRepositoryError>;

    /// Insert one record, committed on its own.
    async fn insert(&self, record: &IdentifierRecord) -> Result<(), IdentifierRepositoryError>;

    /// Whether the registrant holding `api_key` owns `id`.
    async fn is_owned_by(
        &self,
        api_key: &ApiKey,
        id: &AskeId,
    ) -> Result<bool, IdentifierRepositoryError>;

    /// Set location and description on a record owned by `registrant_id`.
    ///
    /// Returns `false` when no such owned record exists.
    async fn update_binding(
        &self,
        registrant_id: RegistrantId,
        id: &AskeId,
        location: &Location,
        description: &str,
    ) -> Result<bool, IdentifierRepositoryError>;

    /// Fetch one record joined to its registrant.
    async fn find(&self, id: &AskeId) -> Result<Option<ResolvedIdentifier>, IdentifierRepositoryError>;

    /// Fetch one page of records with a bound location, ordered by id.
    async fn list_resolvable(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ResolvedIdentifier>, IdentifierRepositoryError>;
}
