//! PostgreSQL-backed identifier store.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{IdentifierRepository, IdentifierRepositoryError, PageRequest};
use crate::domain::{
    ApiKey, AskeId, IdentifierRecord, Location, RegistrantId, ResolvedIdentifier,
};

use super::error_mapping::{identifier_diesel_error, identifier_pool_error};
use super::models::{NewObjectRow, ObjectRow};
use super::pool::DbPool;
use super::schema::{object, registrant};

/// Rows per INSERT statement; keeps bind parameters under the protocol limit.
const RESERVE_CHUNK_ROWS: usize = 5_000;

/// Diesel implementation of [`IdentifierRepository`].
#[derive(Clone)]
pub struct DieselIdentifierRepository {
    pool: DbPool,
}

impl DieselIdentifierRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn resolved((row, registrant_name): (ObjectRow, String)) -> ResolvedIdentifier {
    ResolvedIdentifier {
        record: IdentifierRecord::from(row),
        registrant_name,
    }
}

#[async_trait]
impl IdentifierRepository for DieselIdentifierRepository {
    async fn reserve(
        &self,
        registrant_id: RegistrantId,
        ids: &[AskeId],
    ) -> Result<(), IdentifierRepositoryError> {
        let rows: Vec<NewObjectRow<'static>> = ids
            .iter()
            .map(|id| NewObjectRow {
                id: *id.as_uuid(),
                registrant_id: registrant_id.get(),
                location: None,
                description: None,
            })
            .collect();

        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        conn.transaction(|conn| {
            async move {
                for chunk in rows.chunks(RESERVE_CHUNK_ROWS) {
                    diesel::insert_into(object::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(identifier_diesel_error)
    }

    async fn insert(&self, record: &IdentifierRecord) -> Result<(), IdentifierRepositoryError> {
        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        diesel::insert_into(object::table)
            .values(NewObjectRow::from(record))
            .execute(&mut conn)
            .await
            .map_err(identifier_diesel_error)?;
        Ok(())
    }

    async fn is_owned_by(
        &self,
        api_key: &ApiKey,
        id: &AskeId,
    ) -> Result<bool, IdentifierRepositoryError> {
        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        diesel::select(exists(
            object::table
                .inner_join(registrant::table)
                .filter(object::id.eq(id.as_uuid()))
                .filter(registrant::api_key.eq(api_key.as_uuid())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(identifier_diesel_error)
    }

    async fn update_binding(
        &self,
        registrant_id: RegistrantId,
        id: &AskeId,
        location: &Location,
        description: &str,
    ) -> Result<bool, IdentifierRepositoryError> {
        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        let updated = diesel::update(
            object::table
                .filter(object::id.eq(id.as_uuid()))
                .filter(object::registrant_id.eq(registrant_id.get())),
        )
        .set((
            object::location.eq(Some(location.as_str())),
            object::description.eq(Some(description)),
        ))
        .execute(&mut conn)
        .await
        .map_err(identifier_diesel_error)?;
        Ok(updated > 0)
    }

    async fn find(
        &self,
        id: &AskeId,
    ) -> Result<Option<ResolvedIdentifier>, IdentifierRepositoryError> {
        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        let row = object::table
            .inner_join(registrant::table)
            .filter(object::id.eq(id.as_uuid()))
            .select((ObjectRow::as_select(), registrant::name))
            .first::<(ObjectRow, String)>(&mut conn)
            .await
            .optional()
            .map_err(identifier_diesel_error)?;
        Ok(row.map(resolved))
    }

    async fn list_resolvable(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ResolvedIdentifier>, IdentifierRepositoryError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| IdentifierRepositoryError::query("page offset out of range"))?;

        let mut conn = self.pool.get().await.map_err(identifier_pool_error)?;
        let rows = object::table
            .inner_join(registrant::table)
            .filter(object::location.is_not_null())
            .order(object::id.asc())
            .limit(i64::from(page.limit()))
            .offset(offset)
            .select((ObjectRow::as_select(), registrant::name))
            .load::<(ObjectRow, String)>(&mut conn)
            .await
            .map_err(identifier_diesel_error)?;
        Ok(rows.into_iter().map(resolved).collect())
    }
}
