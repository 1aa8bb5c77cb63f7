//! PostgreSQL-backed `VoterRepository`.
//!
//! All partitions share the `voters` table; every statement filters on
//! `partition_name`, so a caller can only ever see rows of the partition it
//! names.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{VoterRepository, VoterRepositoryError};
use crate::domain::{PartitionName, VoterFields, VoterId, VoterRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVoterRow, VoterChangeset, VoterRow};
use super::pool::{DbPool, PoolError};
use super::schema::voters;

#[derive(Clone)]
pub struct DieselVoterRepository {
    pool: DbPool,
}

impl DieselVoterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoterRepositoryError {
    map_basic_pool_error(error, |message| VoterRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> VoterRepositoryError {
    map_basic_diesel_error(
        error,
        |message| VoterRepositoryError::query(message),
        |message| VoterRepositoryError::connection(message),
    )
}

/// `(OFFSET, LIMIT)` for `page`. Bounds past `i64::MAX` saturate: no
/// partition can hold that many rows, so the page is simply empty.
fn sql_window(page: PageRequest) -> (i64, i64) {
    let clamp = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);
    (clamp(page.offset()), clamp(page.limit()))
}

#[async_trait]
impl VoterRepository for DieselVoterRepository {
    async fn insert(
        &self,
        partition: &PartitionName,
        record: &VoterRecord,
    ) -> Result<(), VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(voters::table)
            .values(NewVoterRow {
                id: *record.id().as_uuid(),
                partition_name: partition.as_ref(),
                fields: VoterChangeset::from(record.fields()),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self, partition: &PartitionName) -> Result<Vec<VoterRecord>, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VoterRow> = voters::table
            .filter(voters::partition_name.eq(partition.as_ref()))
            .order(voters::seq.asc())
            .select(VoterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(VoterRecord::from).collect())
    }

    async fn page(
        &self,
        partition: &PartitionName,
        page: PageRequest,
    ) -> Result<Vec<VoterRecord>, VoterRepositoryError> {
        let (offset, limit) = sql_window(page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VoterRow> = voters::table
            .filter(voters::partition_name.eq(partition.as_ref()))
            .order(voters::seq.asc())
            .offset(offset)
            .limit(limit)
            .select(VoterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(VoterRecord::from).collect())
    }

    async fn count(&self, partition: &PartitionName) -> Result<u64, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = voters::table
            .filter(voters::partition_name.eq(partition.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| VoterRepositoryError::query("negative row count"))
    }

    async fn find(
        &self,
        partition: &PartitionName,
        id: VoterId,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = voters::table
            .filter(voters::partition_name.eq(partition.as_ref()))
            .filter(voters::id.eq(*id.as_uuid()))
            .select(VoterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(VoterRecord::from))
    }

    async fn update(
        &self,
        partition: &PartitionName,
        id: VoterId,
        patch: &VoterFields,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError> {
        // Diesel rejects an UPDATE with no columns; nothing to change anyway.
        if patch.is_empty() {
            return self.find(partition, id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            voters::table
                .filter(voters::partition_name.eq(partition.as_ref()))
                .filter(voters::id.eq(*id.as_uuid())),
        )
        .set(VoterChangeset::from(patch))
        .returning(VoterRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(VoterRecord::from))
    }

    async fn delete(&self, partition: &PartitionName, id: VoterId) -> Result<bool, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            voters::table
                .filter(voters::partition_name.eq(partition.as_ref()))
                .filter(voters::id.eq(*id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
