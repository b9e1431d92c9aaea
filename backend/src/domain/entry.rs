//! Entry aggregate: the record of a vehicle's arrival.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vehicle::{VehicleType, normalize_vehicle_id};

/// Validation errors returned by [`Entry::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyVehicleId,
    MissingDisplacement,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVehicleId => write!(f, "vehicle id must not be empty"),
            Self::MissingDisplacement => {
                write!(f, "motorcycle entries must carry an engine displacement")
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Input for constructing an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub id: Uuid,
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub entered_at: DateTime<Utc>,
    pub displacement: Option<u32>,
}

/// A registered vehicle arrival.
///
/// ## Invariants
/// - `vehicle_id` is normalised (trimmed, upper-case) and non-empty.
/// - Motorcycle entries always carry a displacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    id: Uuid,
    vehicle_id: String,
    vehicle_type: VehicleType,
    entered_at: DateTime<Utc>,
    displacement: Option<u32>,
}

impl Entry {
    /// Validate a draft and build the entry.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use parking::domain::{Entry, EntryDraft, VehicleType};
    /// use uuid::Uuid;
    ///
    /// let entry = Entry::new(EntryDraft {
    ///     id: Uuid::new_v4(),
    ///     vehicle_id: "sfl555".to_owned(),
    ///     vehicle_type: VehicleType::Car,
    ///     entered_at: Utc::now(),
    ///     displacement: None,
    /// })
    /// .expect("valid entry");
    /// assert_eq!(entry.vehicle_id(), "SFL555");
    /// ```
    pub fn new(draft: EntryDraft) -> Result<Self, EntryValidationError> {
        let EntryDraft {
            id,
            vehicle_id,
            vehicle_type,
            entered_at,
            displacement,
        } = draft;

        let vehicle_id = normalize_vehicle_id(&vehicle_id);
        if vehicle_id.is_empty() {
            return Err(EntryValidationError::EmptyVehicleId);
        }
        if vehicle_type.requires_displacement() && displacement.is_none() {
            return Err(EntryValidationError::MissingDisplacement);
        }

        Ok(Self {
            id,
            vehicle_id,
            vehicle_type,
            entered_at,
            displacement,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vehicle_id(&self) -> &str {
        self.vehicle_id.as_str()
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.entered_at
    }

    /// Engine displacement in cubic centimetres.
    pub fn displacement(&self) -> Option<u32> {
        self.displacement
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn car_draft() -> EntryDraft {
        EntryDraft {
            id: Uuid::new_v4(),
            vehicle_id: "SFL555".to_owned(),
            vehicle_type: VehicleType::Car,
            entered_at: Utc::now(),
            displacement: None,
        }
    }

    #[rstest]
    fn normalises_vehicle_id(mut car_draft: EntryDraft) {
        car_draft.vehicle_id = " sfl555\t".to_owned();
        let entry = Entry::new(car_draft).expect("valid entry");
        assert_eq!(entry.vehicle_id(), "SFL555");
    }

    #[rstest]
    fn rejects_blank_vehicle_id(mut car_draft: EntryDraft) {
        car_draft.vehicle_id = "   ".to_owned();
        assert_eq!(
            Entry::new(car_draft),
            Err(EntryValidationError::EmptyVehicleId)
        );
    }

    #[rstest]
    fn motorcycle_requires_displacement(mut car_draft: EntryDraft) {
        car_draft.vehicle_type = VehicleType::Motorcycle;
        car_draft.vehicle_id = "SFL55D".to_owned();
        assert_eq!(
            Entry::new(car_draft),
            Err(EntryValidationError::MissingDisplacement)
        );
    }

    #[rstest]
    fn car_accepts_optional_displacement(mut car_draft: EntryDraft) {
        car_draft.displacement = Some(1600);
        let entry = Entry::new(car_draft).expect("cars may declare displacement");
        assert_eq!(entry.displacement(), Some(1600));
    }
}
