//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use crate::domain::ports::{
    MockDepartureCommand, MockDepartureQuery, MockEntryCommand, MockEntryQuery,
};
use crate::domain::{
    CellCapacity, CellQuotaService, Departure, DepartureCommandService, DepartureQueryService,
    Entry, EntryCommandService, EntryQueryService, FeeSchedule, LastIssuedNumbers, PlateValidator,
    RegistrationGate,
};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{departures, entries};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::MutableClock;

/// In-memory wiring of every driving port, sharing one clock.
pub struct MemoryBackend {
    pub entries: Arc<InMemoryRepository<Entry>>,
    pub departures: Arc<InMemoryRepository<Departure>>,
    pub clock: Arc<MutableClock>,
    pub capacity: CellCapacity,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            entries: Arc::new(InMemoryRepository::new()),
            departures: Arc::new(InMemoryRepository::new()),
            clock: Arc::new(MutableClock::default()),
            capacity: CellCapacity::default(),
        }
    }
}

impl MemoryBackend {
    pub fn with_capacity(capacity: CellCapacity) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn state(&self) -> HttpState {
        let gate = RegistrationGate::new();
        let quota = Arc::new(CellQuotaService::new(
            Arc::clone(&self.entries),
            Arc::clone(&self.departures),
            self.capacity,
        ));
        let plates = Arc::new(PlateValidator::new(LastIssuedNumbers::default()));

        HttpState::new(
            Arc::new(
                EntryCommandService::new(
                    Arc::clone(&self.entries),
                    Arc::clone(&self.departures),
                    quota,
                    plates,
                    self.clock.clone(),
                )
                .with_gate(gate.clone()),
            ),
            Arc::new(EntryQueryService::new(Arc::clone(&self.entries))),
            Arc::new(
                DepartureCommandService::new(
                    Arc::clone(&self.entries),
                    Arc::clone(&self.departures),
                    FeeSchedule::default(),
                    self.clock.clone(),
                )
                .with_gate(gate),
            ),
            Arc::new(DepartureQueryService::new(Arc::clone(&self.departures))),
        )
    }
}

/// Handler state backed by driving-port mocks.
///
/// Mocks left without expectations fail the test if a handler calls them.
pub fn mocked_state(
    entries: MockEntryCommand,
    entries_query: MockEntryQuery,
    departures: MockDepartureCommand,
    departures_query: MockDepartureQuery,
) -> HttpState {
    HttpState::new(
        Arc::new(entries),
        Arc::new(entries_query),
        Arc::new(departures),
        Arc::new(departures_query),
    )
}

/// Application exposing the entry and departure routes under `/api`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(entries::list_entries)
                .service(entries::get_last_entry_by_vehicle)
                .service(entries::get_entry)
                .service(entries::register_entry)
                .service(departures::list_departures)
                .service(departures::get_departure)
                .service(departures::register_departure),
        )
}
