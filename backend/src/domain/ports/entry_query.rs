//! Driving port for reading vehicle entries.
//!
//! Lookups answer `None` for unknown identifiers, including identifiers that
//! are not well-formed UUIDs, so callers decide what absence means.

use async_trait::async_trait;

use crate::domain::Error;

use super::entry_command::EntryPayload;

/// Driving port for entry read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryQuery: Send + Sync {
    /// Every entry ordered by entry time.
    async fn list_entries(&self) -> Result<Vec<EntryPayload>, Error>;

    async fn get_entry_by_id(&self, id: &str) -> Result<Option<EntryPayload>, Error>;

    /// Most recent entry for a vehicle identifier.
    async fn get_last_entry_by_vehicle_id(
        &self,
        vehicle_id: &str,
    ) -> Result<Option<EntryPayload>, Error>;
}
