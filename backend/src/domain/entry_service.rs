//! Entry registration and lookup services.
//!
//! Registration validates a request against the facility rules before
//! recording the arrival. The checks after the displacement check read
//! shared occupancy, so they run inside the [`RegistrationGate`] together
//! with the insert.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use super::ports::{
    CellQuota, DepartureFilter, EntryCommand, EntryFilter, EntryPayload, EntryQuery, PlateReader,
    RegisterEntryRequest, Repository,
};
use super::registration_support::{RegistrationGate, RepositoryDeadline};
use super::{Departure, Entry, EntryDraft, Error, messages, normalize_vehicle_id};

/// Entry service implementing the entry command driving port.
#[derive(Clone)]
pub struct EntryCommandService<E, D> {
    entries: Arc<E>,
    departures: Arc<D>,
    quota: Arc<dyn CellQuota>,
    plates: Arc<dyn PlateReader>,
    clock: Arc<dyn Clock>,
    gate: RegistrationGate,
    deadline: RepositoryDeadline,
}

impl<E, D> EntryCommandService<E, D> {
    /// Create a command service over the entry and departure stores.
    pub fn new(
        entries: Arc<E>,
        departures: Arc<D>,
        quota: Arc<dyn CellQuota>,
        plates: Arc<dyn PlateReader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries,
            departures,
            quota,
            plates,
            clock,
            gate: RegistrationGate::default(),
            deadline: RepositoryDeadline::default(),
        }
    }

    /// Share `gate` with the departure service.
    #[must_use]
    pub fn with_gate(mut self, gate: RegistrationGate) -> Self {
        self.gate = gate;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: RepositoryDeadline) -> Self {
        self.deadline = deadline;
        self
    }
}

impl<E, D> EntryCommandService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    async fn has_pending_departure(&self, vehicle_id: &str) -> Result<bool, Error> {
        let entries = self
            .deadline
            .run(
                "entry lookup",
                self.entries
                    .list_where(&EntryFilter::VehicleId(vehicle_id.to_owned())),
            )
            .await?;

        if entries.is_empty() {
            return Ok(false);
        }

        let ids = entries.iter().map(Entry::id).collect();
        let departures = self
            .deadline
            .run(
                "departure lookup",
                self.departures
                    .list_where(&DepartureFilter::EntryIds(ids)),
            )
            .await?;
        let closed: HashSet<Uuid> = departures.iter().map(Departure::entry_id).collect();
        Ok(entries.iter().any(|entry| !closed.contains(&entry.id())))
    }
}

fn reject(vehicle_id: &str, error: Error) -> Error {
    tracing::debug!(
        vehicle_id,
        code = ?error.code(),
        reason = error.message(),
        "entry rejected"
    );
    error
}

#[async_trait]
impl<E, D> EntryCommand for EntryCommandService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    async fn register_entry(&self, request: RegisterEntryRequest) -> Result<EntryPayload, Error> {
        let RegisterEntryRequest {
            vehicle_id,
            vehicle_type,
            displacement,
        } = request;
        let vehicle_id = normalize_vehicle_id(&vehicle_id);

        if vehicle_type.requires_displacement() && displacement.is_none() {
            return Err(reject(
                &vehicle_id,
                Error::entry_validation(messages::MISSING_DISPLACEMENT),
            ));
        }

        let _gate = self.gate.enter().await;

        let available = self
            .deadline
            .run(
                "cell quota lookup",
                self.quota.exists_quota_by_vehicle_type(vehicle_type),
            )
            .await?;
        if !available {
            return Err(reject(
                &vehicle_id,
                Error::capacity(messages::NO_CELLS_AVAILABLE),
            ));
        }

        if self.has_pending_departure(&vehicle_id).await? {
            return Err(reject(
                &vehicle_id,
                Error::entry_validation(messages::PENDING_DEPARTURE),
            ));
        }

        if self
            .plates
            .last_number_of_vehicle_id(vehicle_type, &vehicle_id)
            .is_none()
        {
            return Err(reject(
                &vehicle_id,
                Error::entry_validation(messages::UNREADABLE_PLATE),
            ));
        }

        let entry = Entry::new(EntryDraft {
            id: Uuid::new_v4(),
            vehicle_id,
            vehicle_type,
            entered_at: self.clock.utc(),
            displacement,
        })
        .map_err(|err| Error::invalid_request(format!("invalid entry: {err}")))?;

        self.deadline
            .run("entry insert", self.entries.add(&entry))
            .await?;

        tracing::info!(
            entry_id = %entry.id(),
            vehicle_id = entry.vehicle_id(),
            vehicle_type = %entry.vehicle_type(),
            "entry registered"
        );
        Ok(EntryPayload::from(entry))
    }
}

/// Entry service implementing the entry query driving port.
#[derive(Clone)]
pub struct EntryQueryService<E> {
    entries: Arc<E>,
    deadline: RepositoryDeadline,
}

impl<E> EntryQueryService<E> {
    pub fn new(entries: Arc<E>) -> Self {
        Self {
            entries,
            deadline: RepositoryDeadline::default(),
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: RepositoryDeadline) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl<E> EntryQuery for EntryQueryService<E>
where
    E: Repository<Entry>,
{
    async fn list_entries(&self) -> Result<Vec<EntryPayload>, Error> {
        let mut entries = self
            .deadline
            .run("entry list", self.entries.list())
            .await?;
        entries.sort_by_key(Entry::entered_at);
        Ok(entries.into_iter().map(EntryPayload::from).collect())
    }

    async fn get_entry_by_id(&self, id: &str) -> Result<Option<EntryPayload>, Error> {
        let Ok(id) = Uuid::parse_str(id.trim()) else {
            return Ok(None);
        };
        let entry = self
            .deadline
            .run("entry lookup", self.entries.get_by_id(id))
            .await?;
        Ok(entry.map(EntryPayload::from))
    }

    async fn get_last_entry_by_vehicle_id(
        &self,
        vehicle_id: &str,
    ) -> Result<Option<EntryPayload>, Error> {
        let entries = self
            .deadline
            .run(
                "entry lookup",
                self.entries.list_where(&EntryFilter::vehicle_id(vehicle_id)),
            )
            .await?;
        // Later insertions win ties on the timestamp.
        let last = entries.into_iter().max_by_key(Entry::entered_at);
        Ok(last.map(EntryPayload::from))
    }
}

#[cfg(test)]
#[path = "entry_service_tests.rs"]
mod tests;
