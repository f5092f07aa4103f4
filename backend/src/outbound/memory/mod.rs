//! In-process registry adapter.
//!
//! Implements both driven ports over a single mutex-guarded state so that
//! reservation batches are applied atomically. Used by the HTTP tests and
//! by the server when no database URL is configured; contents are lost on
//! restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    IdentifierRepository, IdentifierRepositoryError, PageRequest, RegistrantRepository,
    RegistrantRepositoryError,
};
use crate::domain::{
    ApiKey, AskeId, IdentifierRecord, Location, Registrant, RegistrantId, ResolvedIdentifier,
};

#[derive(Debug, Default)]
struct RegistryState {
    registrants: HashMap<RegistrantId, Registrant>,
    next_registrant_id: i32,
    // Ordered by id so bulk listing pages are stable.
    objects: BTreeMap<AskeId, IdentifierRecord>,
}

impl RegistryState {
    fn resolve(&self, record: &IdentifierRecord) -> Option<ResolvedIdentifier> {
        self.registrants
            .get(&record.registrant_id)
            .map(|registrant| ResolvedIdentifier {
                record: record.clone(),
                registrant_name: registrant.name().to_owned(),
            })
    }

    fn check_registrant(&self, id: RegistrantId) -> Result<(), IdentifierRepositoryError> {
        if self.registrants.contains_key(&id) {
            Ok(())
        } else {
            Err(IdentifierRepositoryError::foreign_key(format!(
                "registrant {id} does not exist"
            )))
        }
    }
}

/// Registrant directory and identifier store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory registry lock poisoned".to_owned())
    }

    /// Add a registrant with a freshly drawn key.
    ///
    /// # Errors
    ///
    /// Fails only when the state lock is poisoned.
    pub fn add_registrant(&self, name: &str) -> Result<Registrant, RegistrantRepositoryError> {
        self.add_registrant_with_key(name, ApiKey::generate())
    }

    /// Add a registrant holding a caller-chosen key.
    ///
    /// # Errors
    ///
    /// Returns a query error when `api_key` is already assigned, and a
    /// connection error when the state lock is poisoned.
    pub fn add_registrant_with_key(
        &self,
        name: &str,
        api_key: ApiKey,
    ) -> Result<Registrant, RegistrantRepositoryError> {
        let mut state = self.lock().map_err(RegistrantRepositoryError::connection)?;
        if state
            .registrants
            .values()
            .any(|registrant| *registrant.api_key() == api_key)
        {
            return Err(RegistrantRepositoryError::query(format!(
                "api key {} is already assigned",
                api_key.fingerprint()
            )));
        }
        state.next_registrant_id += 1;
        let registrant = Registrant::new(
            RegistrantId::new(state.next_registrant_id),
            name,
            api_key,
        );
        state
            .registrants
            .insert(registrant.id(), registrant.clone());
        Ok(registrant)
    }

    /// Number of stored identifier records.
    pub fn identifier_count(&self) -> usize {
        self.lock().map(|state| state.objects.len()).unwrap_or_default()
    }
}

#[async_trait]
impl RegistrantRepository for InMemoryRegistry {
    async fn find_by_api_key(
        &self,
        api_key: &ApiKey,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        let state = self.lock().map_err(RegistrantRepositoryError::connection)?;
        Ok(state
            .registrants
            .values()
            .find(|registrant| registrant.api_key() == api_key)
            .cloned())
    }

    async fn create(&self, name: &str) -> Result<Registrant, RegistrantRepositoryError> {
        self.add_registrant(name)
    }
}

#[async_trait]
impl IdentifierRepository for InMemoryRegistry {
    async fn reserve(
        &self,
        registrant_id: RegistrantId,
        ids: &[AskeId],
    ) -> Result<(), IdentifierRepositoryError> {
        let mut state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        state.check_registrant(registrant_id)?;
        if let Some(taken) = ids.iter().find(|id| state.objects.contains_key(id)) {
            return Err(IdentifierRepositoryError::duplicate(taken.to_string()));
        }
        for id in ids {
            state
                .objects
                .insert(*id, IdentifierRecord::reserved(*id, registrant_id));
        }
        Ok(())
    }

    async fn insert(&self, record: &IdentifierRecord) -> Result<(), IdentifierRepositoryError> {
        let mut state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        state.check_registrant(record.registrant_id)?;
        if state.objects.contains_key(&record.id) {
            return Err(IdentifierRepositoryError::duplicate(record.id.to_string()));
        }
        state.objects.insert(record.id, record.clone());
        Ok(())
    }

    async fn is_owned_by(
        &self,
        api_key: &ApiKey,
        id: &AskeId,
    ) -> Result<bool, IdentifierRepositoryError> {
        let state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        Ok(state
            .objects
            .get(id)
            .and_then(|record| state.registrants.get(&record.registrant_id))
            .is_some_and(|owner| owner.api_key() == api_key))
    }

    async fn update_binding(
        &self,
        registrant_id: RegistrantId,
        id: &AskeId,
        location: &Location,
        description: &str,
    ) -> Result<bool, IdentifierRepositoryError> {
        let mut state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        match state.objects.get_mut(id) {
            Some(record) if record.registrant_id == registrant_id => {
                record.location = Some(location.clone());
                record.description = Some(description.to_owned());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find(
        &self,
        id: &AskeId,
    ) -> Result<Option<ResolvedIdentifier>, IdentifierRepositoryError> {
        let state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        Ok(state.objects.get(id).and_then(|record| state.resolve(record)))
    }

    async fn list_resolvable(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ResolvedIdentifier>, IdentifierRepositoryError> {
        let state = self.lock().map_err(IdentifierRepositoryError::connection)?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(state
            .objects
            .values()
            .filter(|record| record.is_resolvable())
            .skip(skip)
            .take(take)
            .filter_map(|record| state.resolve(record))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage for the in-memory adapter.

    use std::num::NonZeroU32;

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new()
    }

    fn location(raw: &str) -> Location {
        Location::parse(raw).expect("valid location")
    }

    #[rstest]
    #[tokio::test]
    async fn registrants_are_found_by_key(registry: InMemoryRegistry) {
        let xdd = registry.add_registrant("xDD").expect("add");

        let found = registry
            .find_by_api_key(xdd.api_key())
            .await
            .expect("lookup");
        let missing = registry
            .find_by_api_key(&ApiKey::generate())
            .await
            .expect("lookup");

        assert_eq!(found.map(|r| r.id()), Some(xdd.id()));
        assert!(missing.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn chosen_keys_resolve_and_cannot_be_reused(registry: InMemoryRegistry) {
        let key = ApiKey::generate();
        let seeded = registry
            .add_registrant_with_key("Operator", key)
            .expect("seed");

        let found = registry.find_by_api_key(&key).await.expect("lookup");
        let err = registry
            .add_registrant_with_key("Imposter", key)
            .expect_err("key already assigned");

        assert_eq!(found.map(|r| r.id()), Some(seeded.id()));
        assert!(matches!(err, RegistrantRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn reservation_with_a_taken_id_writes_nothing(registry: InMemoryRegistry) {
        let owner = registry.add_registrant("xDD").expect("add");
        let taken = AskeId::generate();
        registry.reserve(owner.id(), &[taken]).await.expect("first");

        let err = registry
            .reserve(owner.id(), &[AskeId::generate(), taken])
            .await
            .expect_err("duplicate");

        assert!(matches!(err, IdentifierRepositoryError::Duplicate { .. }));
        assert_eq!(registry.identifier_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_for_unknown_registrants_are_rejected(registry: InMemoryRegistry) {
        let err = registry
            .reserve(RegistrantId::new(42), &[AskeId::generate()])
            .await
            .expect_err("dangling registrant");

        assert!(matches!(err, IdentifierRepositoryError::ForeignKey { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn ownership_follows_the_owning_key(registry: InMemoryRegistry) {
        let owner = registry.add_registrant("xDD").expect("add");
        let other = registry.add_registrant("other").expect("add");
        let id = AskeId::generate();
        registry.reserve(owner.id(), &[id]).await.expect("reserve");

        assert!(registry.is_owned_by(owner.api_key(), &id).await.expect("owns"));
        assert!(!registry.is_owned_by(other.api_key(), &id).await.expect("owns"));
        assert!(
            !registry
                .update_binding(other.id(), &id, &location("http://x"), "")
                .await
                .expect("update")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn listing_skips_unbound_records_and_pages_by_id(registry: InMemoryRegistry) {
        let owner = registry.add_registrant("xDD").expect("add");
        let mut ids: Vec<AskeId> = (0..5).map(|_| AskeId::generate()).collect();
        registry.reserve(owner.id(), &ids).await.expect("reserve");
        let unbound = ids.remove(0);
        for id in &ids {
            registry
                .update_binding(owner.id(), id, &location("http://x"), "")
                .await
                .expect("bind");
        }
        ids.sort();

        let page_size = NonZeroU32::new(3).expect("non-zero");
        let first = registry
            .list_resolvable(PageRequest {
                page: NonZeroU32::MIN,
                page_size,
            })
            .await
            .expect("page 1");
        let second = registry
            .list_resolvable(PageRequest {
                page: NonZeroU32::new(2).expect("non-zero"),
                page_size,
            })
            .await
            .expect("page 2");

        let listed: Vec<AskeId> = first.iter().chain(&second).map(|r| r.record.id).collect();
        assert_eq!(listed, ids);
        assert!(!listed.contains(&unbound));
        assert_eq!(first[0].registrant_name, "xDD");
    }
}
