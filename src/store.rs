//! Farm records and the storage interface
//!
//! The engine never holds process-wide mutable state. Callers inject a
//! `FarmStore`; the engine only describes updates keyed by farmer id and the
//! most recent `created_at`. When two writers race on the same farmer the
//! store's last-writer-wins semantics decide which schedule becomes current.

use chrono::{DateTime, NaiveDate, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::soil_table::SoilSignature;

/// How the soil type was determined for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilOption {
    Manual,
    Sensor,
}

/// One saved farm request. Created by the recommendation flow, updated by
/// the schedule flow (selected crop); never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmRecord {
    pub farmer_id: String,
    pub location: String,
    pub land_size_acres: f64,
    pub soil_option: SoilOption,
    pub soil_type: String,
    pub sensor_reading: Option<SoilSignature>,
    pub start_date: NaiveDate,
    pub water_available: f64,
    pub selected_crop: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Narrow record interface the engine reads and writes through.
pub trait FarmStore {
    fn put(&mut self, record: FarmRecord);

    /// The farmer's current record: the one with the latest `created_at`.
    fn latest_for(&self, farmer_id: &str) -> Option<FarmRecord>;

    /// Set the selected crop on the farmer's current record. Returns false
    /// when the farmer has no record.
    fn set_selected_crop(&mut self, farmer_id: &str, crop: &str) -> bool;
}

/// In-memory store, useful for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryFarmStore {
    records: FxHashMap<String, Vec<FarmRecord>>,
}

impl MemoryFarmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self, farmer_id: &str) -> usize {
        self.records.get(farmer_id).map_or(0, |records| records.len())
    }
}

impl FarmStore for MemoryFarmStore {
    fn put(&mut self, record: FarmRecord) {
        self.records
            .entry(record.farmer_id.clone())
            .or_default()
            .push(record);
    }

    fn latest_for(&self, farmer_id: &str) -> Option<FarmRecord> {
        self.records
            .get(farmer_id)?
            .iter()
            .max_by_key(|record| record.created_at)
            .cloned()
    }

    fn set_selected_crop(&mut self, farmer_id: &str, crop: &str) -> bool {
        let Some(records) = self.records.get_mut(farmer_id) else {
            return false;
        };
        let Some(latest) = records.iter_mut().max_by_key(|record| record.created_at) else {
            return false;
        };
        latest.selected_crop = Some(crop.to_string());
        true
    }
}
