//! PostgreSQL-backed `RegistrantRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrantRepository, RegistrantRepositoryError};
use crate::domain::{ApprovalStatus, Constituency, Identity, Registrant, Role};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewRegistrantRow, RegistrantRow};
use super::pool::{DbPool, PoolError};
use super::schema::registrants;

/// Diesel adapter over the `registrants` table.
///
/// Identity uniqueness comes from the primary key, so two concurrent signups
/// for the same identity cannot both succeed.
#[derive(Clone)]
pub struct DieselRegistrantRepository {
    pool: DbPool,
}

impl DieselRegistrantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrantRepositoryError {
    map_basic_pool_error(error, |message| RegistrantRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> RegistrantRepositoryError {
    map_basic_diesel_error(
        error,
        |message| RegistrantRepositoryError::query(message),
        |message| RegistrantRepositoryError::connection(message),
    )
}

fn to_domain(row: RegistrantRow) -> Result<Registrant, RegistrantRepositoryError> {
    row.into_domain()
        .map_err(|err| RegistrantRepositoryError::query(format!("invalid registrant row: {err}")))
}

#[async_trait]
impl RegistrantRepository for DieselRegistrantRepository {
    async fn insert(&self, registrant: &Registrant) -> Result<(), RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(registrants::table)
            .values(NewRegistrantRow::from(registrant))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RegistrantRepositoryError::duplicate(registrant.identity().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        Ok(())
    }

    async fn find(
        &self,
        identity: &Identity,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        registrants::table
            .find(identity.as_ref())
            .select(RegistrantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn set_status(
        &self,
        identity: &Identity,
        status: ApprovalStatus,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            registrants::table
                .filter(registrants::identity.eq(identity.as_ref()))
                .filter(registrants::role.ne(Role::Admin.as_str())),
        )
        .set((
            registrants::status.eq(status.as_str()),
            registrants::updated_at.eq(diesel::dsl::now),
        ))
        .returning(RegistrantRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .map(to_domain)
        .transpose()
    }

    async fn list_by_constituency_and_status(
        &self,
        constituency: &Constituency,
        status: ApprovalStatus,
    ) -> Result<Vec<Registrant>, RegistrantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrantRow> = registrants::table
            .filter(registrants::constituency.eq(constituency.as_ref()))
            .filter(registrants::status.eq(status.as_str()))
            .filter(registrants::role.ne(Role::Admin.as_str()))
            .order(registrants::identity.asc())
            .select(RegistrantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }
}
