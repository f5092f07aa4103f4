//! PostgreSQL-backed registrant directory.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::{RegistrantRepository, RegistrantRepositoryError};
use crate::domain::{ApiKey, Registrant};

use super::error_mapping::{registrant_diesel_error, registrant_pool_error};
use super::models::{NewRegistrantRow, RegistrantRow};
use super::pool::DbPool;
use super::schema::registrant;

/// Diesel implementation of [`RegistrantRepository`].
#[derive(Clone)]
pub struct DieselRegistrantRepository {
    pool: DbPool,
}

impl DieselRegistrantRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrantRepository for DieselRegistrantRepository {
    async fn find_by_api_key(
        &self,
        api_key: &ApiKey,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(registrant_pool_error)?;

        let row = registrant::table
            .filter(registrant::api_key.eq(api_key.as_uuid()))
            .select(RegistrantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(registrant_diesel_error)?;

        Ok(row.map(Registrant::from))
    }

    async fn create(&self, name: &str) -> Result<Registrant, RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(registrant_pool_error)?;

        let row = diesel::insert_into(registrant::table)
            .values(NewRegistrantRow {
                name,
                api_key: *ApiKey::generate().as_uuid(),
            })
            .returning(RegistrantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(registrant_diesel_error)?;

        let created = Registrant::from(row);
        info!(
            registrant_id = %created.id(),
            key = %created.api_key().fingerprint(),
            "registrant provisioned"
        );
        Ok(created)
    }
}
