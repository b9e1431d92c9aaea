//! Row structs for the parking tables.
//!
//! Rows are storage shapes only; conversion to domain records goes through
//! the validating constructors and reports failures as query errors.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{Departure, Entry, EntryDraft, Fee, VehicleType};

use super::schema::{departures, entries};

/// Row read from `entries`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub id: Uuid,
    pub vehicle_id: String,
    pub vehicle_type: String,
    pub entered_at: DateTime<Utc>,
    pub displacement: Option<i32>,
}

/// Row written to `entries`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = entries)]
pub(crate) struct NewEntryRow<'a> {
    pub id: Uuid,
    pub vehicle_id: &'a str,
    pub vehicle_type: &'a str,
    pub entered_at: DateTime<Utc>,
    pub displacement: Option<i32>,
}

/// Row read from `departures`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartureRow {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub departed_at: DateTime<Utc>,
    pub fee: i64,
}

/// Row written to `departures`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departures)]
pub(crate) struct NewDepartureRow {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub departed_at: DateTime<Utc>,
    pub fee: i64,
}

impl TryFrom<EntryRow> for Entry {
    type Error = RepositoryError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let vehicle_type = VehicleType::from_str(&row.vehicle_type)
            .map_err(|err| RepositoryError::query(err.to_string()))?;
        let displacement = row
            .displacement
            .map(u32::try_from)
            .transpose()
            .map_err(|_| RepositoryError::query("negative displacement stored"))?;

        Entry::new(EntryDraft {
            id: row.id,
            vehicle_id: row.vehicle_id,
            vehicle_type,
            entered_at: row.entered_at,
            displacement,
        })
        .map_err(|err| RepositoryError::query(err.to_string()))
    }
}

impl<'a> TryFrom<&'a Entry> for NewEntryRow<'a> {
    type Error = RepositoryError;

    fn try_from(entry: &'a Entry) -> Result<Self, Self::Error> {
        let displacement = entry
            .displacement()
            .map(i32::try_from)
            .transpose()
            .map_err(|_| RepositoryError::query("displacement exceeds column range"))?;

        Ok(Self {
            id: entry.id(),
            vehicle_id: entry.vehicle_id(),
            vehicle_type: entry.vehicle_type().as_str(),
            entered_at: entry.entered_at(),
            displacement,
        })
    }
}

impl TryFrom<DepartureRow> for Departure {
    type Error = RepositoryError;

    fn try_from(row: DepartureRow) -> Result<Self, Self::Error> {
        let fee = u64::try_from(row.fee).map_err(|_| RepositoryError::query("negative fee stored"))?;
        Ok(Departure::new(
            row.id,
            row.entry_id,
            row.departed_at,
            Fee::from_amount(fee),
        ))
    }
}

impl TryFrom<&Departure> for NewDepartureRow {
    type Error = RepositoryError;

    fn try_from(departure: &Departure) -> Result<Self, Self::Error> {
        let fee = i64::try_from(departure.fee().amount())
            .map_err(|_| RepositoryError::query("fee exceeds column range"))?;
        Ok(Self {
            id: departure.id(),
            entry_id: departure.entry_id(),
            departed_at: departure.departed_at(),
            fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn entered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn row(vehicle_type: &str, displacement: Option<i32>) -> EntryRow {
        EntryRow {
            id: Uuid::new_v4(),
            vehicle_id: "SFL55D".to_owned(),
            vehicle_type: vehicle_type.to_owned(),
            entered_at: entered_at(),
            displacement,
        }
    }

    #[rstest]
    fn entry_row_converts_to_domain() {
        let entry = Entry::try_from(row("motorcycle", Some(650))).expect("valid row");
        assert_eq!(entry.vehicle_type(), VehicleType::Motorcycle);
        assert_eq!(entry.displacement(), Some(650));

        let back = NewEntryRow::try_from(&entry).expect("valid entry");
        assert_eq!(back.vehicle_type, "motorcycle");
        assert_eq!(back.displacement, Some(650));
    }

    #[rstest]
    #[case(row("truck", None))]
    #[case(row("motorcycle", Some(-1)))]
    #[case(row("motorcycle", None))]
    fn corrupt_entry_rows_are_query_errors(#[case] row: EntryRow) {
        let err = Entry::try_from(row).expect_err("row is invalid");
        assert!(matches!(err, RepositoryError::Query { .. }));
    }

    #[rstest]
    fn departure_with_negative_fee_is_rejected() {
        let err = Departure::try_from(DepartureRow {
            id: Uuid::new_v4(),
            entry_id: Uuid::new_v4(),
            departed_at: entered_at(),
            fee: -5,
        })
        .expect_err("fee is negative");
        assert!(matches!(err, RepositoryError::Query { .. }));
    }
}
