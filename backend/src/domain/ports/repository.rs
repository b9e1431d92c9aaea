//! Generic storage port for entry and departure records.
//!
//! Adapters provide identity lookup, full listing, filtered listing and
//! insertion. The port carries no business rules; services decide what a
//! filter result means.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Departure, Entry, VehicleType, normalize_vehicle_id};

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection => "repository connection failed",
        /// Query or mutation failed during execution.
        Query => "repository query failed",
        /// A uniqueness constraint rejected the write.
        Conflict => "repository write conflicted",
    }
}

/// A persistable record with a stable identifier and a filter vocabulary.
pub trait Record: Clone + Send + Sync + 'static {
    /// Criteria understood by [`Repository::list_where`].
    type Filter: Send + Sync;

    fn id(&self) -> Uuid;

    /// Whether this record satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Filters over [`Entry`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// Entries for a vehicle identifier, compared in normalised form.
    VehicleId(String),
    VehicleType(VehicleType),
}

impl EntryFilter {
    pub fn vehicle_id(raw: &str) -> Self {
        Self::VehicleId(normalize_vehicle_id(raw))
    }
}

/// Filters over [`Departure`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureFilter {
    EntryId(Uuid),
    /// Departures closing any of the listed entries.
    EntryIds(Vec<Uuid>),
}

impl Record for Entry {
    type Filter = EntryFilter;

    fn id(&self) -> Uuid {
        Self::id(self)
    }

    fn matches(&self, filter: &EntryFilter) -> bool {
        match filter {
            EntryFilter::VehicleId(vehicle_id) => self.vehicle_id() == vehicle_id,
            EntryFilter::VehicleType(vehicle_type) => self.vehicle_type() == *vehicle_type,
        }
    }
}

impl Record for Departure {
    type Filter = DepartureFilter;

    fn id(&self) -> Uuid {
        Self::id(self)
    }

    fn matches(&self, filter: &DepartureFilter) -> bool {
        match filter {
            DepartureFilter::EntryId(entry_id) => self.entry_id() == *entry_id,
            DepartureFilter::EntryIds(entry_ids) => entry_ids.contains(&self.entry_id()),
        }
    }
}

/// Port for reading and inserting records of type `T`.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Find a record by identifier.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, RepositoryError>;

    /// Every stored record, in insertion order.
    async fn list(&self) -> Result<Vec<T>, RepositoryError>;

    /// Records satisfying `filter`, in insertion order.
    async fn list_where(&self, filter: &T::Filter) -> Result<Vec<T>, RepositoryError>;

    /// Insert a new record.
    async fn add(&self, record: &T) -> Result<(), RepositoryError>;
}
