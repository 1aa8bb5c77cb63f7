//! PostgreSQL-backed `PartitionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PartitionRepository, PartitionRepositoryError};
use crate::domain::{Identity, PartitionName};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewPartitionRow;
use super::pool::{DbPool, PoolError};
use super::schema::voter_partitions;

/// Diesel adapter over the `voter_partitions` registry.
///
/// Registration is `INSERT .. ON CONFLICT DO NOTHING`, so concurrent or
/// repeated calls converge on a single row.
#[derive(Clone)]
pub struct DieselPartitionRepository {
    pool: DbPool,
}

impl DieselPartitionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PartitionRepositoryError {
    map_basic_pool_error(error, |message| PartitionRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PartitionRepositoryError {
    map_basic_diesel_error(
        error,
        |message| PartitionRepositoryError::query(message),
        |message| PartitionRepositoryError::connection(message),
    )
}

#[async_trait]
impl PartitionRepository for DieselPartitionRepository {
    async fn register(
        &self,
        name: &PartitionName,
        owner: &Identity,
    ) -> Result<(), PartitionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(voter_partitions::table)
            .values(NewPartitionRow {
                name: name.as_ref(),
                owner: owner.as_ref(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(partition = %name, created = inserted > 0, "partition registered");
        Ok(())
    }

    async fn exists(&self, name: &PartitionName) -> Result<bool, PartitionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            voter_partitions::table.filter(voter_partitions::name.eq(name.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
