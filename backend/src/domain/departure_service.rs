//! Departure registration and lookup services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use super::ports::{
    DepartureCommand, DepartureFilter, DeparturePayload, DepartureQuery, EntryFilter,
    RegisterDepartureRequest, Repository, RepositoryError,
};
use super::registration_support::{RegistrationGate, RepositoryDeadline};
use super::{Departure, Entry, Error, FeeSchedule, messages};

/// Departure service implementing the departure command driving port.
#[derive(Clone)]
pub struct DepartureCommandService<E, D> {
    entries: Arc<E>,
    departures: Arc<D>,
    fees: FeeSchedule,
    clock: Arc<dyn Clock>,
    gate: RegistrationGate,
    deadline: RepositoryDeadline,
}

impl<E, D> DepartureCommandService<E, D> {
    pub fn new(entries: Arc<E>, departures: Arc<D>, fees: FeeSchedule, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries,
            departures,
            fees,
            clock,
            gate: RegistrationGate::default(),
            deadline: RepositoryDeadline::default(),
        }
    }

    /// Share `gate` with the entry service.
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

/// How a departure request names its entry.
enum EntryReference {
    Id(String),
    Vehicle(String),
}

impl EntryReference {
    fn from_request(request: RegisterDepartureRequest) -> Option<Self> {
        let present = |value: Option<String>| value.filter(|raw| !raw.trim().is_empty());
        present(request.entry_id)
            .map(Self::Id)
            .or_else(|| present(request.vehicle_id).map(Self::Vehicle))
    }
}

fn departure_rejected(message: &'static str) -> Error {
    tracing::debug!(reason = message, "departure rejected");
    Error::departure_validation(message)
}

impl<E, D> DepartureCommandService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    async fn departures_of(&self, entry_id: Uuid) -> Result<Vec<Departure>, Error> {
        self.deadline
            .run(
                "departure lookup",
                self.departures
                    .list_where(&DepartureFilter::EntryId(entry_id)),
            )
            .await
    }

    /// Entry named by identifier; it must exist and still be open.
    async fn entry_by_id(&self, raw: &str) -> Result<Entry, Error> {
        let Ok(id) = Uuid::parse_str(raw.trim()) else {
            return Err(departure_rejected(messages::ENTRY_NOT_FOUND));
        };
        let entry = self
            .deadline
            .run("entry lookup", self.entries.get_by_id(id))
            .await?
            .ok_or_else(|| departure_rejected(messages::ENTRY_NOT_FOUND))?;

        if !self.departures_of(entry.id()).await?.is_empty() {
            return Err(departure_rejected(messages::DEPARTURE_ALREADY_REGISTERED));
        }
        Ok(entry)
    }

    /// Open entry of a vehicle, if it is still inside.
    async fn entry_by_vehicle(&self, vehicle_id: &str) -> Result<Entry, Error> {
        let mut entries = self
            .deadline
            .run(
                "entry lookup",
                self.entries.list_where(&EntryFilter::vehicle_id(vehicle_id)),
            )
            .await?;
        if entries.is_empty() {
            return Err(departure_rejected(messages::ENTRY_NOT_FOUND));
        }

        entries.sort_by_key(Entry::entered_at);
        while let Some(entry) = entries.pop() {
            if self.departures_of(entry.id()).await?.is_empty() {
                return Ok(entry);
            }
        }
        Err(departure_rejected(messages::DEPARTURE_ALREADY_REGISTERED))
    }
}

#[async_trait]
impl<E, D> DepartureCommand for DepartureCommandService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    async fn register_departure(
        &self,
        request: RegisterDepartureRequest,
    ) -> Result<DeparturePayload, Error> {
        let reference = EntryReference::from_request(request)
            .ok_or_else(|| Error::invalid_request("entryId or vehicleId is required"))?;

        let _gate = self.gate.enter().await;

        let entry = match reference {
            EntryReference::Id(raw) => self.entry_by_id(&raw).await?,
            EntryReference::Vehicle(vehicle_id) => self.entry_by_vehicle(&vehicle_id).await?,
        };

        let departed_at = self.clock.utc();
        let fee = self.fees.fee_for(&entry, departed_at);
        let departure = Departure::new(Uuid::new_v4(), entry.id(), departed_at, fee);

        self.deadline
            .run("departure insert", async {
                match self.departures.add(&departure).await {
                    // A unique index on the entry reference rejected a racing insert.
                    Err(RepositoryError::Conflict { .. }) => {
                        Err(departure_rejected(messages::DEPARTURE_ALREADY_REGISTERED))
                    }
                    other => other.map_err(Error::from),
                }
            })
            .await?;

        tracing::info!(
            departure_id = %departure.id(),
            entry_id = %entry.id(),
            vehicle_id = entry.vehicle_id(),
            fee = fee.amount(),
            "departure registered"
        );
        Ok(DeparturePayload::from(departure))
    }
}

/// Departure service implementing the departure query driving port.
#[derive(Clone)]
pub struct DepartureQueryService<D> {
    departures: Arc<D>,
    deadline: RepositoryDeadline,
}

impl<D> DepartureQueryService<D> {
    pub fn new(departures: Arc<D>) -> Self {
        Self {
            departures,
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
impl<D> DepartureQuery for DepartureQueryService<D>
where
    D: Repository<Departure>,
{
    async fn list_departures(&self) -> Result<Vec<DeparturePayload>, Error> {
        let mut departures = self
            .deadline
            .run("departure list", self.departures.list())
            .await?;
        departures.sort_by_key(Departure::departed_at);
        Ok(departures.into_iter().map(DeparturePayload::from).collect())
    }

    async fn get_departure_by_id(&self, id: &str) -> Result<Option<DeparturePayload>, Error> {
        let Ok(id) = Uuid::parse_str(id.trim()) else {
            return Ok(None);
        };
        let departure = self
            .deadline
            .run("departure lookup", self.departures.get_by_id(id))
            .await?;
        Ok(departure.map(DeparturePayload::from))
    }
}

#[cfg(test)]
#[path = "departure_service_tests.rs"]
mod tests;
