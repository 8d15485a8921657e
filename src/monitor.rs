//! Growth-Stage & Monitoring State Machine
//!
//! Stage transitions are driven solely by elapsed whole days since planting:
//!
//! ```text
//! Germination ──day 30──▶ VegetativeGrowth ──day 60──▶ Flowering ──day 90──▶ Harvesting
//! ```
//!
//! Harvesting is terminal. Live telemetry (moisture percentage, motor state)
//! is classified into buckets; a failed read degrades to `Unknown` moisture
//! or `Off` motor so monitoring always returns a result.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::ReferenceData;
use crate::error::AdvisorError;
use crate::recommend::water_requirement;
use crate::soil_table::MoistureBucket;
use crate::store::FarmRecord;

/// Fixed motor flow rate used for the water-supplied estimate, litres/minute.
pub const MOTOR_FLOW_RATE_LPM: f64 = 40.0;

/// Crop lifecycle stage, a pure function of elapsed days since planting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GrowthStage {
    Germination,
    VegetativeGrowth,
    Flowering,
    Harvesting,
}

impl GrowthStage {
    pub fn from_elapsed_days(days: i64) -> Self {
        if days < 30 {
            GrowthStage::Germination
        } else if days < 60 {
            GrowthStage::VegetativeGrowth
        } else if days < 90 {
            GrowthStage::Flowering
        } else {
            GrowthStage::Harvesting
        }
    }

    /// Fixed completion percentage per stage.
    pub fn progress(&self) -> u8 {
        match self {
            GrowthStage::Germination => 25,
            GrowthStage::VegetativeGrowth => 50,
            GrowthStage::Flowering => 75,
            GrowthStage::Harvesting => 100,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "Germination",
            GrowthStage::VegetativeGrowth => "VegetativeGrowth",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Harvesting => "Harvesting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotorStatus {
    On,
    Off,
}

/// Live motor telemetry as handed over by the boundary layer.
#[derive(Debug, Clone, Copy)]
pub struct MotorReading {
    pub running: bool,
    /// Minutes since the motor was switched on, when running.
    pub minutes_since_on: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Everything the monitoring flow reports for one farmer.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorReport {
    pub moisture: MoistureBucket,
    pub motor_status: MotorStatus,
    /// Estimated litres supplied today, capped at the crop's daily need.
    pub water_supplied: f64,
    pub stage: GrowthStage,
    pub progress: u8,
    pub notifications: Vec<Notification>,
}

/// Derive the monitoring report from the farmer's current record and live
/// telemetry. A missing record is `NoFarmRecord`; missing telemetry is not
/// an error.
pub fn monitor(
    reference: &ReferenceData,
    farmer_id: &str,
    record: Option<&FarmRecord>,
    today: NaiveDate,
    moisture_reading: Option<f64>,
    motor: Option<MotorReading>,
) -> Result<MonitorReport, AdvisorError> {
    let Some(record) = record else {
        return Err(AdvisorError::NoFarmRecord(farmer_id.to_string()));
    };

    let elapsed_days = (today - record.start_date).num_days();
    let stage = GrowthStage::from_elapsed_days(elapsed_days);

    if moisture_reading.is_none() {
        tracing::warn!(
            "moisture telemetry unavailable for farmer '{}', reporting Unknown",
            farmer_id
        );
    }
    let moisture = MoistureBucket::from_reading(moisture_reading);

    let (motor_status, water_supplied) = match motor {
        Some(reading) if reading.running => {
            let minutes = reading.minutes_since_on.max(0.0);
            let supplied = MOTOR_FLOW_RATE_LPM * minutes;
            let supplied = match record.selected_crop.as_deref() {
                Some(crop) => {
                    supplied.min(water_requirement(reference, crop) * record.land_size_acres)
                }
                // No cap before a crop is chosen.
                None => supplied,
            };
            (MotorStatus::On, supplied)
        }
        _ => (MotorStatus::Off, 0.0),
    };

    let mut notifications = Vec::new();
    if moisture == MoistureBucket::Low {
        notifications.push(Notification {
            kind: NotificationKind::Warning,
            message: "Moisture level is low. Consider irrigating.".to_string(),
        });
    }
    if water_supplied <= 0.0 && stage != GrowthStage::Harvesting {
        notifications.push(Notification {
            kind: NotificationKind::Info,
            message: "No water has been supplied recently.".to_string(),
        });
    }

    Ok(MonitorReport {
        moisture,
        motor_status,
        water_supplied,
        stage,
        progress: stage.progress(),
        notifications,
    })
}
