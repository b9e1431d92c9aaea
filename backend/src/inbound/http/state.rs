//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DepartureCommand, DepartureQuery, EntryCommand, EntryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub entries: Arc<dyn EntryCommand>,
    pub entries_query: Arc<dyn EntryQuery>,
    pub departures: Arc<dyn DepartureCommand>,
    pub departures_query: Arc<dyn DepartureQuery>,
}

impl HttpState {
    pub fn new(
        entries: Arc<dyn EntryCommand>,
        entries_query: Arc<dyn EntryQuery>,
        departures: Arc<dyn DepartureCommand>,
        departures_query: Arc<dyn DepartureQuery>,
    ) -> Self {
        Self {
            entries,
            entries_query,
            departures,
            departures_query,
        }
    }
}
