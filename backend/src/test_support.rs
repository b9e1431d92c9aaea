//! Shared test doubles for the service and handler tests.

use std::marker::PhantomData;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{Record, Repository, RepositoryError};
use crate::outbound::memory::InMemoryRepository;

/// Monday morning used as the default "now" across tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock whose reading only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        Self::new(fixture_timestamp())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Repository whose every call fails with a connection error.
pub struct FailingRepository<T>(PhantomData<fn() -> T>);

impl<T> Default for FailingRepository<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for FailingRepository<T> {
    async fn get_by_id(&self, _id: Uuid) -> Result<Option<T>, RepositoryError> {
        Err(RepositoryError::connection("database offline"))
    }

    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::connection("database offline"))
    }

    async fn list_where(&self, _filter: &T::Filter) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::connection("database offline"))
    }

    async fn add(&self, _record: &T) -> Result<(), RepositoryError> {
        Err(RepositoryError::connection("database offline"))
    }
}

/// Repository whose calls never complete.
pub struct StalledRepository<T>(PhantomData<fn() -> T>);

impl<T> Default for StalledRepository<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for StalledRepository<T> {
    async fn get_by_id(&self, _id: Uuid) -> Result<Option<T>, RepositoryError> {
        std::future::pending().await
    }

    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        std::future::pending().await
    }

    async fn list_where(&self, _filter: &T::Filter) -> Result<Vec<T>, RepositoryError> {
        std::future::pending().await
    }

    async fn add(&self, _record: &T) -> Result<(), RepositoryError> {
        std::future::pending().await
    }
}

/// In-memory repository that refuses full listings and counts filtered reads.
pub struct FilterOnlyRepository<T> {
    inner: InMemoryRepository<T>,
    filtered_reads: AtomicUsize,
}

impl<T: Record> Default for FilterOnlyRepository<T> {
    fn default() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            filtered_reads: AtomicUsize::new(0),
        }
    }
}

impl<T> FilterOnlyRepository<T> {
    pub fn filtered_reads(&self) -> usize {
        self.filtered_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for FilterOnlyRepository<T> {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, RepositoryError> {
        self.inner.get_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::query("full listing not allowed"))
    }

    async fn list_where(&self, filter: &T::Filter) -> Result<Vec<T>, RepositoryError> {
        self.filtered_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_where(filter).await
    }

    async fn add(&self, record: &T) -> Result<(), RepositoryError> {
        self.inner.add(record).await
    }
}
