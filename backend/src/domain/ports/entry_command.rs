//! Driving port for registering vehicle entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entry, Error, VehicleType};

/// Serializable entry payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub id: Uuid,
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub entered_at: DateTime<Utc>,
    pub displacement: Option<u32>,
}

impl From<Entry> for EntryPayload {
    fn from(value: Entry) -> Self {
        Self {
            id: value.id(),
            vehicle_id: value.vehicle_id().to_owned(),
            vehicle_type: value.vehicle_type(),
            entered_at: value.entered_at(),
            displacement: value.displacement(),
        }
    }
}

/// Request to register a vehicle arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEntryRequest {
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    /// Engine displacement in cc; mandatory for motorcycles.
    pub displacement: Option<u32>,
}

/// Driving port for entry write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryCommand: Send + Sync {
    /// Validates and records a vehicle arrival.
    ///
    /// Checks run in a fixed order and the first failure wins: missing
    /// motorcycle displacement, cell quota, pending departure, plate rule.
    /// Rejections carry [`crate::domain::ErrorCode::EntryValidation`] or
    /// [`crate::domain::ErrorCode::Capacity`].
    async fn register_entry(&self, request: RegisterEntryRequest) -> Result<EntryPayload, Error>;
}
