//! Creation: issue identifiers already bound to locations.
//!
//! Each item is validated and inserted on its own. A failing item is logged
//! and recorded as skipped; the rest of the batch still commits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::authorization::resolve_registrant;
use super::ports::{CreateItem, CreatedIdentifier, CreationCommand, IdentifierRepository, RegistrantRepository};
use super::{ApiKey, AskeId, BatchReport, Error, IdentifierRecord, Location, SkipReason};

/// Creation service implementing [`CreationCommand`].
#[derive(Clone)]
pub struct CreationService<R, I> {
    registrants: Arc<R>,
    identifiers: Arc<I>,
}

impl<R, I> CreationService<R, I> {
    /// Create a service over the given repositories.
    pub fn new(registrants: Arc<R>, identifiers: Arc<I>) -> Self {
        Self {
            registrants,
            identifiers,
        }
    }
}

impl<R, I> CreationService<R, I>
where
    I: IdentifierRepository,
{
    async fn create_one(
        &self,
        record: IdentifierRecord,
        location: Location,
    ) -> Result<CreatedIdentifier, SkipReason> {
        self.identifiers
            .insert(&record)
            .await
            .map_err(|err| SkipReason::Store {
                message: err.to_string(),
            })?;
        Ok(CreatedIdentifier {
            id: record.id,
            location,
            description: record.description,
        })
    }
}

#[async_trait]
impl<R, I> CreationCommand for CreationService<R, I>
where
    R: RegistrantRepository,
    I: IdentifierRepository,
{
    async fn create(
        &self,
        api_key: &ApiKey,
        items: Vec<CreateItem>,
    ) -> Result<BatchReport<CreatedIdentifier>, Error> {
        let registrant = resolve_registrant(self.registrants.as_ref(), api_key).await?;
        let mut report = BatchReport::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let location = match Location::parse(&item.location) {
                Ok(location) => location,
                Err(err) => {
                    warn!(index, error = %err, "create item skipped");
                    report.skip(SkipReason::InvalidLocation {
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let record = IdentifierRecord {
                id: AskeId::generate(),
                registrant_id: registrant.id(),
                location: Some(location.clone()),
                description: item.description,
            };
            match self.create_one(record, location).await {
                Ok(created) => report.commit(created),
                Err(reason) => {
                    warn!(index, %reason, "create item skipped");
                    report.skip(reason);
                }
            }
        }

        info!(
            registrant_id = %registrant.id(),
            key = %api_key.fingerprint(),
            committed = report.outcomes().len() - report.skipped_count(),
            skipped = report.skipped_count(),
            "create batch processed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for single-step creation.

    use std::sync::Mutex;

    use super::*;
    use crate::domain::ports::{
        IdentifierRepositoryError, MockIdentifierRepository, MockRegistrantRepository,
    };
    use crate::domain::{ErrorCode, ItemOutcome, Registrant, RegistrantId};

    fn registrants_knowing(key: ApiKey) -> MockRegistrantRepository {
        let mut registrants = MockRegistrantRepository::new();
        registrants
            .expect_find_by_api_key()
            .returning(move |candidate| {
                Ok((*candidate == key).then(|| Registrant::new(RegistrantId::new(8), "xDD", key)))
            });
        registrants
    }

    fn recording_store(rows: Arc<Mutex<Vec<IdentifierRecord>>>) -> MockIdentifierRepository {
        let mut identifiers = MockIdentifierRepository::new();
        identifiers.expect_insert().returning(move |record| {
            if record.location.as_ref().map(Location::as_str) == Some("http://reject.me") {
                return Err(IdentifierRepositoryError::query("value too long"));
            }
            rows.lock().expect("rows lock").push(record.clone());
            Ok(())
        });
        identifiers
    }

    #[tokio::test]
    async fn plain_locations_are_bound_without_description() {
        let key = ApiKey::generate();
        let rows = Arc::new(Mutex::new(Vec::new()));
        let service = CreationService::new(
            Arc::new(registrants_knowing(key)),
            Arc::new(recording_store(Arc::clone(&rows))),
        );

        let created = service
            .create(&key, vec![CreateItem::location("http://a")])
            .await
            .expect("create succeeds")
            .into_committed();

        assert_eq!(created.len(), 1);
        let stored = rows.lock().expect("rows lock");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, created[0].id);
        assert_eq!(stored[0].registrant_id, RegistrantId::new(8));
        assert_eq!(created[0].location.as_str(), "http://a");
        assert_eq!(created[0].description, None);
    }

    #[tokio::test]
    async fn failing_items_are_skipped_without_aborting_the_batch() {
        let key = ApiKey::generate();
        let rows = Arc::new(Mutex::new(Vec::new()));
        let service = CreationService::new(
            Arc::new(registrants_knowing(key)),
            Arc::new(recording_store(Arc::clone(&rows))),
        );

        let report = service
            .create(
                &key,
                vec![
                    CreateItem::described("http://one", "first"),
                    CreateItem::location("not a uri"),
                    CreateItem::location("http://reject.me"),
                    CreateItem::described("http://two", "second"),
                ],
            )
            .await
            .expect("batch succeeds");

        assert!(matches!(
            report.outcomes()[1],
            ItemOutcome::Skipped(SkipReason::InvalidLocation { .. })
        ));
        assert!(matches!(
            report.outcomes()[2],
            ItemOutcome::Skipped(SkipReason::Store { .. })
        ));
        let committed = report.into_committed();
        let locations: Vec<&str> = committed.iter().map(|c| c.location.as_str()).collect();
        assert_eq!(locations, vec!["http://one", "http://two"]);
        assert_eq!(committed[1].description.as_deref(), Some("second"));
        assert_eq!(rows.lock().expect("rows lock").len(), 2);
    }

    #[tokio::test]
    async fn empty_input_is_an_empty_success() {
        let key = ApiKey::generate();
        let mut identifiers = MockIdentifierRepository::new();
        identifiers.expect_insert().never();
        let service = CreationService::new(Arc::new(registrants_knowing(key)), Arc::new(identifiers));

        let report = service.create(&key, Vec::new()).await.expect("empty create");

        assert!(report.outcomes().is_empty());
    }

    #[tokio::test]
    async fn unknown_key_is_rejected_before_any_insert() {
        let mut identifiers = MockIdentifierRepository::new();
        identifiers.expect_insert().never();
        let service = CreationService::new(
            Arc::new(registrants_knowing(ApiKey::generate())),
            Arc::new(identifiers),
        );

        let err = service
            .create(&ApiKey::generate(), vec![CreateItem::location("http://a")])
            .await
            .expect_err("unknown key");

        assert_eq!(err.code(), ErrorCode::UnauthorizedKey);
    }

    #[tokio::test]
    async fn created_identifiers_serialize_as_tuples() {
        let id = AskeId::generate();
        let bare = CreatedIdentifier {
            id,
            location: Location::from_stored("http://a".to_owned()),
            description: None,
        };
        let described = CreatedIdentifier {
            description: Some("d".to_owned()),
            ..bare.clone()
        };

        assert_eq!(
            serde_json::to_value(&bare).expect("serialize"),
            serde_json::json!([id.to_string(), "http://a"])
        );
        assert_eq!(
            serde_json::to_value(&described).expect("serialize"),
            serde_json::json!([id.to_string(), "http://a", "d"])
        );
    }
}
