//! Domain primitives, aggregates and services.
//!
//! Purpose: hold the parking rules independent of transport and storage.
//! Services implement the driving ports in [`ports`] and talk to storage,
//! capacity and plate reading only through the driven ports declared there.
//!
//! Public surface:
//! - Entry / Departure: immutable records of arrivals and exits.
//! - EntryCommandService / EntryQueryService: entry registration and reads.
//! - DepartureCommandService / DepartureQueryService: exits and fees.
//! - CellQuotaService, PlateValidator, FeeSchedule: the facility rules.
//! - Error / ErrorCode: transport-agnostic failure payload.

pub mod error;
pub mod ports;

mod cell_quota_service;
mod departure;
mod departure_service;
mod entry;
mod entry_service;
mod fee;
mod plate;
mod registration_support;
mod trace_id;
mod vehicle;

pub use self::cell_quota_service::{CellCapacity, CellQuotaService};
pub use self::departure::Departure;
pub use self::departure_service::{DepartureCommandService, DepartureQueryService};
pub use self::entry::{Entry, EntryDraft, EntryValidationError};
pub use self::entry_service::{EntryCommandService, EntryQueryService};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER, messages};
pub use self::fee::{Fee, FeeSchedule, Rate};
pub use self::plate::{LastIssuedNumbers, PlateValidationError, PlateValidator, SequenceNumber};
pub use self::registration_support::{
    DEFAULT_REPOSITORY_TIMEOUT, RegistrationGate, RepositoryDeadline,
};
pub use self::trace_id::TraceId;
pub use self::vehicle::{UnknownVehicleType, VehicleType, normalize_vehicle_id};
