//! Departure aggregate: the record of a vehicle leaving, with its fee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fee::Fee;

/// A registered vehicle exit referencing exactly one [`super::Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    id: Uuid,
    entry_id: Uuid,
    departed_at: DateTime<Utc>,
    fee: Fee,
}

impl Departure {
    pub fn new(id: Uuid, entry_id: Uuid, departed_at: DateTime<Utc>, fee: Fee) -> Self {
        Self {
            id,
            entry_id,
            departed_at,
            fee,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Identifier of the entry this departure closes.
    pub fn entry_id(&self) -> Uuid {
        self.entry_id
    }

    pub fn departed_at(&self) -> DateTime<Utc> {
        self.departed_at
    }

    pub fn fee(&self) -> Fee {
        self.fee
    }
}
