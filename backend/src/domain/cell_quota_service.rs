//! Cell availability computed from stored occupancy.
//!
//! An entry occupies a cell until a departure references it. Availability
//! for a vehicle type is the configured cell count minus its open entries.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::ports::{CellQuota, CellQuotaError, DepartureFilter, EntryFilter, Repository};
use super::{Departure, Entry, VehicleType};

/// Number of cells per vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCapacity {
    pub car: u32,
    pub motorcycle: u32,
}

impl Default for CellCapacity {
    fn default() -> Self {
        Self {
            car: 20,
            motorcycle: 10,
        }
    }
}

impl CellCapacity {
    pub fn cells_for(self, vehicle_type: VehicleType) -> u32 {
        match vehicle_type {
            VehicleType::Car => self.car,
            VehicleType::Motorcycle => self.motorcycle,
        }
    }
}

/// [`CellQuota`] backed by the entry and departure repositories.
#[derive(Clone)]
pub struct CellQuotaService<E, D> {
    entries: Arc<E>,
    departures: Arc<D>,
    capacity: CellCapacity,
}

impl<E, D> CellQuotaService<E, D> {
    pub fn new(entries: Arc<E>, departures: Arc<D>, capacity: CellCapacity) -> Self {
        Self {
            entries,
            departures,
            capacity,
        }
    }
}

impl<E, D> CellQuotaService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    /// Entries of `vehicle_type` that have no departure yet.
    pub async fn occupied_cells(&self, vehicle_type: VehicleType) -> Result<usize, CellQuotaError> {
        let entries = self
            .entries
            .list_where(&EntryFilter::VehicleType(vehicle_type))
            .await?;
        if entries.is_empty() {
            return Ok(0);
        }

        let ids = entries.iter().map(Entry::id).collect();
        let closed: HashSet<Uuid> = self
            .departures
            .list_where(&DepartureFilter::EntryIds(ids))
            .await?
            .iter()
            .map(Departure::entry_id)
            .collect();

        Ok(entries
            .iter()
            .filter(|entry| !closed.contains(&entry.id()))
            .count())
    }
}

#[async_trait]
impl<E, D> CellQuota for CellQuotaService<E, D>
where
    E: Repository<Entry>,
    D: Repository<Departure>,
{
    async fn exists_quota_by_vehicle_type(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<bool, CellQuotaError> {
        let occupied = self.occupied_cells(vehicle_type).await?;
        let cells = usize::try_from(self.capacity.cells_for(vehicle_type)).unwrap_or(usize::MAX);
        tracing::debug!(%vehicle_type, occupied, cells, "checked cell quota");
        Ok(occupied < cells)
    }
}
