//! Driving port wiring for the HTTP state.
//!
//! Both storage back ends share one [`RegistrationGate`] across the entry and
//! departure services so every check-then-create sequence is serialised.

use std::sync::Arc;

use mockable::DefaultClock;
use parking::domain::ports::Repository;
use parking::domain::{
    CellQuotaService, Departure, DepartureCommandService, DepartureQueryService, Entry,
    EntryCommandService, EntryQueryService, PlateValidator, RegistrationGate,
};
use parking::inbound::http::state::HttpState;
use parking::outbound::memory::InMemoryRepository;
use parking::outbound::persistence::{DieselDepartureRepository, DieselEntryRepository};
use tracing::info;

use super::ServerConfig;

fn wire<E, D>(entries: Arc<E>, departures: Arc<D>, config: &ServerConfig) -> HttpState
where
    E: Repository<Entry> + 'static,
    D: Repository<Departure> + 'static,
{
    let gate = RegistrationGate::new();
    let clock = Arc::new(DefaultClock);
    let quota = Arc::new(
        CellQuotaService::new(Arc::clone(&entries), Arc::clone(&departures), config.capacity),
    );
    let plates = Arc::new(PlateValidator::new(config.last_issued));

    let entry_command = EntryCommandService::new(
        Arc::clone(&entries),
        Arc::clone(&departures),
        quota,
        plates,
        clock.clone(),
    )
    .with_gate(gate.clone())
    .with_deadline(config.deadline);
    let departure_command = DepartureCommandService::new(
        Arc::clone(&entries),
        Arc::clone(&departures),
        config.fees.clone(),
        clock,
    )
    .with_gate(gate)
    .with_deadline(config.deadline);

    HttpState::new(
        Arc::new(entry_command),
        Arc::new(EntryQueryService::new(entries).with_deadline(config.deadline)),
        Arc::new(departure_command),
        Arc::new(DepartureQueryService::new(departures).with_deadline(config.deadline)),
    )
}

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over in-memory repositories.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselEntryRepository::new(pool.clone())),
            Arc::new(DieselDepartureRepository::new(pool.clone())),
            config,
        ),
        None => {
            info!("no database configured; records are kept in memory");
            wire(
                Arc::new(InMemoryRepository::<Entry>::new()),
                Arc::new(InMemoryRepository::<Departure>::new()),
                config,
            )
        }
    }
}
