//! PostgreSQL-backed `Repository<Departure>` using Diesel ORM.
//!
//! `departures.entry_id` carries a unique constraint; a second departure for
//! the same entry surfaces as [`RepositoryError::Conflict`]. Listings follow
//! the `seq` insertion counter.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Departure;
use crate::domain::ports::{DepartureFilter, Repository, RepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DepartureRow, NewDepartureRow};
use super::pool::DbPool;
use super::schema::departures;

/// Diesel-backed departure store.
#[derive(Clone)]
pub struct DieselDepartureRepository {
    pool: DbPool,
}

impl DieselDepartureRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Departures matching `filter`, oldest insertion first.
fn filtered_query(filter: &DepartureFilter) -> departures::BoxedQuery<'_, Pg> {
    let query = departures::table.order(departures::seq.asc()).into_boxed();
    match filter {
        DepartureFilter::EntryId(entry_id) => query.filter(departures::entry_id.eq(*entry_id)),
        DepartureFilter::EntryIds(entry_ids) => {
            query.filter(departures::entry_id.eq_any(entry_ids.clone()))
        }
    }
}

fn rows_to_departures(rows: Vec<DepartureRow>) -> Result<Vec<Departure>, RepositoryError> {
    rows.into_iter().map(Departure::try_from).collect()
}

#[async_trait]
impl Repository<Departure> for DieselDepartureRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Departure>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departures::table
            .find(id)
            .select(DepartureRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Departure::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Departure>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = departures::table
            .select(DepartureRow::as_select())
            .order(departures::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_departures(rows)
    }

    async fn list_where(
        &self,
        filter: &DepartureFilter,
    ) -> Result<Vec<Departure>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = filtered_query(filter)
            .select(DepartureRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_departures(rows)
    }

    async fn add(&self, record: &Departure) -> Result<(), RepositoryError> {
        let row = NewDepartureRow::try_from(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(departures::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DepartureFilter::EntryId(Uuid::nil()), "\"entry_id\" = $1")]
    #[case(DepartureFilter::EntryIds(vec![Uuid::nil(), Uuid::max()]), "\"entry_id\"")]
    fn filtered_listing_orders_by_insertion(
        #[case] filter: DepartureFilter,
        #[case] predicate: &str,
    ) {
        let query = filtered_query(&filter);
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains(predicate), "{sql}");
        assert!(sql.contains("ORDER BY \"departures\".\"seq\" ASC"), "{sql}");
    }
}
