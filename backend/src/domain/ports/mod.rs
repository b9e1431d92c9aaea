//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cell_quota;
mod departure_command;
mod departure_query;
mod entry_command;
mod entry_query;
mod plate_reader;
mod repository;

#[cfg(test)]
pub use cell_quota::MockCellQuota;
pub use cell_quota::{CellQuota, CellQuotaError, FixtureCellQuota};
#[cfg(test)]
pub use departure_command::MockDepartureCommand;
pub use departure_command::{DepartureCommand, DeparturePayload, RegisterDepartureRequest};
#[cfg(test)]
pub use departure_query::MockDepartureQuery;
pub use departure_query::DepartureQuery;
#[cfg(test)]
pub use entry_command::MockEntryCommand;
pub use entry_command::{EntryCommand, EntryPayload, RegisterEntryRequest};
#[cfg(test)]
pub use entry_query::MockEntryQuery;
pub use entry_query::EntryQuery;
#[cfg(test)]
pub use plate_reader::MockPlateReader;
pub use plate_reader::PlateReader;
pub use repository::{DepartureFilter, EntryFilter, Record, Repository, RepositoryError};
