//! Crop advisor facade
//!
//! Wires the reference tables, the soil classifier, the yield estimator, and
//! the candidate sampling strategy into the engine's four operations:
//! classify, recommend, schedule, monitor. All operations are synchronous
//! functions over the read-only reference data; nothing here blocks or
//! locks.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

use crate::classifier::SoilClassifier;
use crate::data::ReferenceData;
use crate::error::AdvisorError;
use crate::monitor::{self, MonitorReport, MotorReading};
use crate::recommend::{self, DeterministicEstimator, Recommendation, YieldEstimator};
use crate::schedule::{self, CropSchedule};
use crate::soil_table::SoilSignature;
use crate::store::FarmRecord;
use crate::suitability::{self, SamplingStrategy};

/// Soil input mode for a recommendation request.
#[derive(Debug, Clone)]
pub enum SoilInput {
    /// The farmer picked a soil type by hand.
    Manual(String),
    /// A raw sensor reading to resolve through the table and classifier.
    Sensor(SoilSignature),
}

/// Ranked recommendations together with the soil type they were built for.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub soil_type: String,
    pub recommendations: Vec<Recommendation>,
}

/// The recommendation & scheduling engine.
pub struct CropAdvisor {
    reference: ReferenceData,
    classifier: Option<SoilClassifier>,
    classifier_error: Option<String>,
    estimator: Box<dyn YieldEstimator + Send + Sync>,
    sampling: SamplingStrategy,
}

impl CropAdvisor {
    /// Build an advisor over already-loaded reference data. Classifier
    /// training failure is recorded, not fatal: manual-mode requests still
    /// work, sensor-mode requests surface `ClassifierUnavailable`.
    pub fn new(reference: ReferenceData) -> Self {
        let (classifier, classifier_error) = match SoilClassifier::train(reference.soil_table()) {
            Ok(model) => {
                tracing::info!(
                    "Soil classifier trained on {} signatures ({} soil types)",
                    reference.soil_table().len(),
                    model.class_count()
                );
                (Some(model), None)
            }
            Err(err) => {
                tracing::warn!("Soil classifier unavailable: {:#}", err);
                (None, Some(format!("{:#}", err)))
            }
        };

        Self {
            reference,
            classifier,
            classifier_error,
            estimator: Box::new(DeterministicEstimator),
            sampling: SamplingStrategy::FirstListed,
        }
    }

    /// Advisor over the builtin reference dataset.
    pub fn builtin() -> Self {
        Self::new(ReferenceData::builtin())
    }

    /// Advisor over CSV reference data in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self::new(ReferenceData::load(dir)?))
    }

    pub fn with_estimator(mut self, estimator: Box<dyn YieldEstimator + Send + Sync>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingStrategy) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Resolve a sensor signature to a soil type: exact reference window
    /// match first, trained classifier otherwise.
    pub fn classify_soil(&self, signature: &SoilSignature) -> Result<String, AdvisorError> {
        if let Some(label) = self.reference.soil_table().lookup(signature) {
            return Ok(label.to_string());
        }

        match &self.classifier {
            Some(model) => Ok(model.predict(&signature.features()).to_string()),
            None => Err(AdvisorError::ClassifierUnavailable(
                self.classifier_error
                    .clone()
                    .unwrap_or_else(|| "model not initialized".to_string()),
            )),
        }
    }

    /// Ranked crop recommendations for a plot, plus the resolved soil type.
    pub fn recommend(
        &self,
        soil: &SoilInput,
        land_size_acres: f64,
        start_date: NaiveDate,
    ) -> Result<RecommendationSet, AdvisorError> {
        let soil_type = match soil {
            SoilInput::Manual(label) => label.clone(),
            SoilInput::Sensor(signature) => self.classify_soil(signature)?,
        };

        tracing::info!(
            "Building recommendations for soil '{}' ({} acres, planting {})",
            soil_type,
            land_size_acres,
            start_date
        );

        let candidates = suitability::suitable_crops(&self.reference, &soil_type, self.sampling)?;
        let recommendations = recommend::build_recommendations(
            &self.reference,
            &soil_type,
            &candidates,
            self.estimator.as_ref(),
        )?;

        Ok(RecommendationSet {
            soil_type,
            recommendations,
        })
    }

    /// Watering and nutrient schedules plus pesticide advice for a chosen crop.
    pub fn schedule(
        &self,
        crop: &str,
        soil_type: &str,
        land_size_acres: f64,
        start_date: NaiveDate,
        water_available: f64,
    ) -> Result<CropSchedule, AdvisorError> {
        schedule::generate_schedule(
            &self.reference,
            crop,
            soil_type,
            land_size_acres,
            start_date,
            water_available,
        )
    }

    /// Monitoring report for a farmer's current record and live telemetry.
    pub fn monitor(
        &self,
        farmer_id: &str,
        record: Option<&FarmRecord>,
        today: NaiveDate,
        moisture_reading: Option<f64>,
        motor: Option<MotorReading>,
    ) -> Result<MonitorReport, AdvisorError> {
        monitor::monitor(
            &self.reference,
            farmer_id,
            record,
            today,
            moisture_reading,
            motor,
        )
    }
}
