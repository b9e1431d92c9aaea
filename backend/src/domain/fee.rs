//! Parking fee rule.
//!
//! Billing is hour-based: elapsed time rounds up to the next whole hour with
//! a one-hour minimum. Every full day is charged at the day rate, and a
//! trailing remainder of [`FeeSchedule::day_threshold_hours`] or more is
//! billed as one extra day instead of by the hour. Motorcycles above the
//! displacement threshold pay a flat surcharge.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::vehicle::VehicleType;

const SECONDS_PER_HOUR: u64 = 3_600;
const HOURS_PER_DAY: u64 = 24;

/// Non-negative amount charged for a stay, in whole pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fee(u64);

impl Fee {
    pub const fn from_amount(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }
}

/// Hour and day prices for one vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    pub hour: u64,
    pub day: u64,
}

/// Rate table and billing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    pub car: Rate,
    pub motorcycle: Rate,
    /// Remainder hours from which a partial day is billed as a full day.
    pub day_threshold_hours: u64,
    /// Displacement above which motorcycles pay the surcharge.
    pub high_displacement_cc: u32,
    pub high_displacement_surcharge: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            car: Rate {
                hour: 1_000,
                day: 8_000,
            },
            motorcycle: Rate {
                hour: 500,
                day: 4_000,
            },
            day_threshold_hours: 9,
            high_displacement_cc: 500,
            high_displacement_surcharge: 2_000,
        }
    }
}

impl FeeSchedule {
    /// Rates applied to `vehicle_type`.
    pub fn rate_for(&self, vehicle_type: VehicleType) -> Rate {
        match vehicle_type {
            VehicleType::Car => self.car,
            VehicleType::Motorcycle => self.motorcycle,
        }
    }

    /// Fee owed by `entry` when leaving at `departed_at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use parking::domain::{Entry, EntryDraft, FeeSchedule, VehicleType};
    /// use uuid::Uuid;
    ///
    /// let entered_at = Utc::now();
    /// let entry = Entry::new(EntryDraft {
    ///     id: Uuid::new_v4(),
    ///     vehicle_id: "SFL555".to_owned(),
    ///     vehicle_type: VehicleType::Car,
    ///     entered_at,
    ///     displacement: None,
    /// })
    /// .expect("valid entry");
    ///
    /// let fee = FeeSchedule::default().fee_for(&entry, entered_at + Duration::minutes(150));
    /// assert_eq!(fee.amount(), 3_000);
    /// ```
    pub fn fee_for(&self, entry: &Entry, departed_at: DateTime<Utc>) -> Fee {
        let rate = self.rate_for(entry.vehicle_type());
        let hours = billable_hours(entry.entered_at(), departed_at);

        let mut days = hours / HOURS_PER_DAY;
        let mut remainder = hours % HOURS_PER_DAY;
        if remainder >= self.day_threshold_hours {
            days += 1;
            remainder = 0;
        }

        let mut total = days
            .saturating_mul(rate.day)
            .saturating_add(remainder.saturating_mul(rate.hour));

        let oversized = entry
            .displacement()
            .is_some_and(|cc| cc > self.high_displacement_cc);
        if entry.vehicle_type() == VehicleType::Motorcycle && oversized {
            total = total.saturating_add(self.high_displacement_surcharge);
        }

        Fee(total)
    }
}

/// Whole hours billed between two instants; never less than one.
fn billable_hours(entered_at: DateTime<Utc>, departed_at: DateTime<Utc>) -> u64 {
    let elapsed = departed_at - entered_at;
    if elapsed <= Duration::zero() {
        return 1;
    }
    // Any started second counts, so a fractional tail rolls into the next hour.
    let whole = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
    let seconds = if elapsed.subsec_nanos() > 0 {
        whole.saturating_add(1)
    } else {
        whole
    };
    seconds.div_ceil(SECONDS_PER_HOUR).max(1)
}
