//! Engine error taxonomy
//!
//! Every fallible advisor operation surfaces one of these variants. Telemetry
//! failures are recovered inside the monitoring flow (Unknown moisture, Off
//! motor) and never appear here; data-quality gaps are logged and skipped
//! unless they empty a whole result set.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The soil classifier failed to initialize. Sensor-mode requests cannot
    /// be served without it; there is no fallback guess.
    #[error("soil classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The suitability table has no crops for the resolved soil type.
    #[error("no suitable crop for soil type '{0}'")]
    NoSuitableCrop(String),

    /// Every candidate crop was missing a nutrient profile.
    #[error("no recommendation available for soil type '{0}'")]
    NoRecommendation(String),

    /// A schedule was requested for a crop absent from the nutrient reference.
    #[error("unknown crop '{0}'")]
    UnknownCrop(String),

    /// Monitoring was requested before any farm record was saved.
    #[error("no farm record found for farmer '{0}'")]
    NoFarmRecord(String),
}
