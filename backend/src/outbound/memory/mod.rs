//! In-process repository adapter.
//!
//! Backs local runs without a database URL and the service tests. Records
//! live for the lifetime of the process.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{Record, Repository, RepositoryError};

/// [`Repository`] keeping records in insertion order behind an async lock.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a repository with existing records.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn list_where(&self, filter: &T::Filter) -> Result<Vec<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect())
    }

    async fn add(&self, record: &T) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let id = record.id();
        if records.iter().any(|existing| existing.id() == id) {
            return Err(RepositoryError::conflict(format!("record {id} already exists")));
        }
        records.push(record.clone());
        Ok(())
    }
}
