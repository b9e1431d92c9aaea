//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Recorded vehicle arrivals.
    entries (id) {
        id -> Uuid,
        /// Normalised plate, upper case.
        vehicle_id -> Varchar,
        /// `car` or `motorcycle`.
        vehicle_type -> Varchar,
        entered_at -> Timestamptz,
        /// Engine displacement in cc; null for most cars.
        displacement -> Nullable<Int4>,
        /// Insertion counter used for listing order.
        seq -> Int8,
    }
}

diesel::table! {
    /// Recorded vehicle exits. `entry_id` is unique: one departure per entry.
    departures (id) {
        id -> Uuid,
        entry_id -> Uuid,
        departed_at -> Timestamptz,
        fee -> Int8,
        /// Insertion counter used for listing order.
        seq -> Int8,
    }
}

diesel::joinable!(departures -> entries (entry_id));
diesel::allow_tables_to_appear_in_same_query!(entries, departures);
