//! Crop Recommendation & Scheduling Engine
//!
//! Recommends crops for a farm plot from soil characteristics (measured or
//! manually selected), synthesizes watering and nutrient schedules for the
//! chosen crop, and tracks growth stage against live moisture and motor
//! telemetry.
//!
//! - `data`: reference-table loading with Polars, plus the builtin dataset
//! - `soil_table` / `classifier`: signature window matching and the trained
//!   fallback classifier
//! - `suitability` / `recommend`: candidate resolution and ranked output
//! - `schedule`: deterministic water/nutrient/pesticide synthesis
//! - `monitor`: the growth-stage and moisture state machine
//! - `store`: the narrow farm-record interface the engine reads through
//!
//! Everything is a synchronous function over read-only tables; persistence,
//! HTTP, and telemetry polling live with the caller.

pub mod advisor;
pub mod classifier;
pub mod data;
pub mod encyclopedia;
pub mod error;
pub mod monitor;
pub mod recommend;
pub mod schedule;
pub mod soil_table;
pub mod store;
pub mod suitability;

// Re-export commonly used types
pub use advisor::{CropAdvisor, RecommendationSet, SoilInput};
pub use data::{CropProfile, ReferenceData};
pub use error::AdvisorError;
pub use monitor::{
    GrowthStage, MonitorReport, MotorReading, MotorStatus, Notification, NotificationKind,
};
pub use recommend::{
    BoundedRandomEstimator, DeterministicEstimator, Recommendation, YieldEstimator,
};
pub use schedule::{CropSchedule, NutrientScheduleEntry, PesticideAdvice, WaterScheduleEntry};
pub use soil_table::{MoistureBucket, SoilSignature, SoilSignatureRow, SoilTable};
pub use store::{FarmRecord, FarmStore, MemoryFarmStore, SoilOption};
pub use suitability::SamplingStrategy;
