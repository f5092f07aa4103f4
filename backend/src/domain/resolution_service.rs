//! Resolution: public, read-only translation of identifiers to metadata.
//!
//! A malformed identifier and an unknown one produce the same
//! `IdentifierNotFound` error so callers cannot discover which ids exist.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::authorization::map_identifier_error;
use super::ports::{IdentifierRepository, LookupTarget, PageRequest, ResolutionQuery};
use super::{AskeId, BibRecord, Error};

/// Default number of records per bulk listing page.
pub const DEFAULT_LOOKUP_PAGE_SIZE: u32 = 1_000;

const NOT_FOUND_MESSAGE: &str = "No ASKE-ID found with that identifier.";

/// Resolution service implementing [`ResolutionQuery`].
#[derive(Clone)]
pub struct ResolutionService<I> {
    identifiers: Arc<I>,
    page_size: NonZeroU32,
}

impl<I> ResolutionService<I> {
    /// Create a service listing at most `page_size` records per page.
    pub fn new(identifiers: Arc<I>, page_size: NonZeroU32) -> Self {
        Self {
            identifiers,
            page_size,
        }
    }
}

#[async_trait]
impl<I> ResolutionQuery for ResolutionService<I>
where
    I: IdentifierRepository,
{
    async fn lookup(&self, target: LookupTarget) -> Result<Vec<BibRecord>, Error> {
        match target {
            LookupTarget::All { page } => {
                let rows = self
                    .identifiers
                    .list_resolvable(PageRequest {
                        page,
                        page_size: self.page_size,
                    })
                    .await
                    .map_err(map_identifier_error)?;
                Ok(rows.into_iter().map(BibRecord::from).collect())
            }
            LookupTarget::One(raw) => {
                let Ok(id) = raw.parse::<AskeId>() else {
                    debug!("lookup of malformed identifier");
                    return Err(Error::identifier_not_found(NOT_FOUND_MESSAGE));
                };
                let row = self
                    .identifiers
                    .find(&id)
                    .await
                    .map_err(map_identifier_error)?
                    .ok_or_else(|| Error::identifier_not_found(NOT_FOUND_MESSAGE))?;
                Ok(vec![BibRecord::from(row)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for resolution.

    use super::*;
    use crate::domain::ports::{IdentifierRepositoryError, MockIdentifierRepository};
    use crate::domain::{
        ErrorCode, IdentifierRecord, Location, RegistrantId, ResolvedIdentifier,
    };
    use rstest::rstest;

    fn resolved(id: AskeId, location: &str) -> ResolvedIdentifier {
        ResolvedIdentifier {
            record: IdentifierRecord {
                id,
                registrant_id: RegistrantId::new(1),
                location: Some(Location::from_stored(location.to_owned())),
                description: Some(String::new()),
            },
            registrant_name: "xDD".to_owned(),
        }
    }

    fn service(identifiers: MockIdentifierRepository) -> ResolutionService<MockIdentifierRepository> {
        ResolutionService::new(Arc::new(identifiers), NonZeroU32::new(2).expect("non-zero"))
    }

    #[tokio::test]
    async fn single_lookup_returns_one_bib_record() {
        let id = AskeId::generate();
        let mut identifiers = MockIdentifierRepository::new();
        identifiers
            .expect_find()
            .withf(move |candidate| *candidate == id)
            .returning(move |_| Ok(Some(resolved(id, "http://a"))));

        let records = service(identifiers)
            .lookup(LookupTarget::One(id.to_string()))
            .await
            .expect("lookup succeeds");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier[0].id, id);
        assert_eq!(
            records[0].link[0].url.as_ref().map(Location::as_str),
            Some("http://a")
        );
        assert_eq!(records[0].registrant, "xDD");
    }

    #[rstest]
    #[case("not-a-valid-token".to_owned())]
    #[case(AskeId::generate().to_string())]
    #[tokio::test]
    async fn malformed_and_unknown_ids_are_indistinguishable(#[case] raw: String) {
        let mut identifiers = MockIdentifierRepository::new();
        identifiers.expect_find().returning(|_| Ok(None));

        let err = service(identifiers)
            .lookup(LookupTarget::One(raw))
            .await
            .expect_err("not found");

        assert_eq!(err.code(), ErrorCode::IdentifierNotFound);
        assert_eq!(err.message(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn bulk_listing_requests_bounded_pages() {
        let first = AskeId::generate();
        let mut identifiers = MockIdentifierRepository::new();
        identifiers
            .expect_list_resolvable()
            .withf(|page| page.page.get() == 3 && page.page_size.get() == 2)
            .returning(move |_| Ok(vec![resolved(first, "http://a")]));

        let records = service(identifiers)
            .lookup(LookupTarget::All {
                page: NonZeroU32::new(3).expect("non-zero"),
            })
            .await
            .expect("listing succeeds");

        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let mut identifiers = MockIdentifierRepository::new();
        identifiers
            .expect_list_resolvable()
            .returning(|_| Err(IdentifierRepositoryError::connection("refused")));

        let err = service(identifiers)
            .lookup(LookupTarget::All {
                page: NonZeroU32::MIN,
            })
            .await
            .expect_err("store down");

        assert_eq!(err.code(), ErrorCode::StoreError);
    }
}
