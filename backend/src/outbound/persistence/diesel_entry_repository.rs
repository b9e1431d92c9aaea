//! PostgreSQL-backed `Repository<Entry>` using Diesel ORM.
//!
//! Listings follow the `seq` insertion counter, so rows sharing an
//! `entered_at` come back in the order they were written.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Entry;
use crate::domain::ports::{EntryFilter, Repository, RepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EntryRow, NewEntryRow};
use super::pool::DbPool;
use super::schema::entries;

/// Diesel-backed entry store.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Entries matching `filter`, oldest insertion first.
fn filtered_query(filter: &EntryFilter) -> entries::BoxedQuery<'_, Pg> {
    let query = entries::table.order(entries::seq.asc()).into_boxed();
    match filter {
        EntryFilter::VehicleId(vehicle_id) => {
            query.filter(entries::vehicle_id.eq(vehicle_id.as_str()))
        }
        EntryFilter::VehicleType(vehicle_type) => {
            query.filter(entries::vehicle_type.eq(vehicle_type.as_str()))
        }
    }
}

fn rows_to_entries(rows: Vec<EntryRow>) -> Result<Vec<Entry>, RepositoryError> {
    rows.into_iter().map(Entry::try_from).collect()
}

#[async_trait]
impl Repository<Entry> for DieselEntryRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        entries::table
            .find(id)
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Entry::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = entries::table
            .select(EntryRow::as_select())
            .order(entries::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_entries(rows)
    }

    async fn list_where(&self, filter: &EntryFilter) -> Result<Vec<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = filtered_query(filter)
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_entries(rows)
    }

    async fn add(&self, record: &Entry) -> Result<(), RepositoryError> {
        let row = NewEntryRow::try_from(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(entries::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
