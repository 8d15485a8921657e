//! Recommendation Synthesizer
//!
//! Turns a prioritized candidate list into ranked `Recommendation` records by
//! joining each crop against its reference profile. Candidates with no
//! profile are a data-quality gap: logged and skipped, fatal only when the
//! whole result set empties out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Mutex;

use crate::data::ReferenceData;
use crate::encyclopedia;
use crate::error::AdvisorError;

/// Estimated cost is a fixed multiple of the daily water requirement.
pub const COST_PER_WATER_UNIT: f64 = 10.0;

/// Known per-crop daily water requirements, litres per acre. Crops not
/// listed here use their profile figure, then the class constants.
const WATER_OVERRIDES: &[(&str, f64)] = &[("Tomato", 600.0), ("Rice", 1200.0), ("Wheat", 500.0)];

const VEGETABLE_WATER_DEFAULT: f64 = 550.0;
const WATER_DEFAULT: f64 = 800.0;

/// One ranked recommendation row returned to the caller. Derived data; the
/// caller decides what to persist.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub crop: String,
    pub nutrients: f64,
    pub water_requirement: f64,
    pub estimated_cost: f64,
    pub estimated_yield: f64,
    /// Market trend in [0, 1].
    pub market_trend: f64,
    pub image_url: String,
}

/// Yield and market-trend estimation capability.
///
/// Swappable between the deterministic class table and a seeded
/// bounded-random generator, so tests inject the deterministic variant and
/// callers that want spread opt into randomness explicitly.
pub trait YieldEstimator {
    /// Returns `(estimated_yield_tonnes_per_acre, market_trend)`.
    fn estimate(&self, crop: &str, is_vegetable: bool) -> (f64, f64);
}

/// Fixed crop-class estimates.
pub struct DeterministicEstimator;

impl YieldEstimator for DeterministicEstimator {
    fn estimate(&self, _crop: &str, is_vegetable: bool) -> (f64, f64) {
        if is_vegetable {
            (8.0, 0.72)
        } else {
            (6.5, 0.55)
        }
    }
}

/// Bounded-random estimates drawn from a seeded generator.
pub struct BoundedRandomEstimator {
    rng: Mutex<StdRng>,
}

impl BoundedRandomEstimator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl YieldEstimator for BoundedRandomEstimator {
    fn estimate(&self, _crop: &str, is_vegetable: bool) -> (f64, f64) {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if is_vegetable {
            (rng.gen_range(6.0..10.0), rng.gen_range(0.60..0.85))
        } else {
            (rng.gen_range(5.0..8.0), rng.gen_range(0.45..0.70))
        }
    }
}

/// Daily water requirement for a crop, litres per acre.
pub fn water_requirement(reference: &ReferenceData, crop: &str) -> f64 {
    if let Some((_, litres)) = WATER_OVERRIDES.iter().find(|(name, _)| *name == crop) {
        return *litres;
    }
    match reference.profile(crop) {
        Some(profile) if profile.base_water_per_acre_per_day > 0.0 => {
            profile.base_water_per_acre_per_day
        }
        Some(profile) if profile.is_vegetable => VEGETABLE_WATER_DEFAULT,
        _ => WATER_DEFAULT,
    }
}

/// Build ranked recommendations for the candidates, preserving their order.
pub fn build_recommendations(
    reference: &ReferenceData,
    soil_type: &str,
    candidates: &[String],
    estimator: &dyn YieldEstimator,
) -> Result<Vec<Recommendation>, AdvisorError> {
    let mut recommendations = Vec::with_capacity(candidates.len());

    for crop in candidates {
        let Some(profile) = reference.profile(crop) else {
            tracing::warn!(
                "crop '{}' is listed as suitable for '{}' but has no profile, skipping",
                crop,
                soil_type
            );
            continue;
        };

        let water_requirement = water_requirement(reference, crop);
        let (estimated_yield, market_trend) = estimator.estimate(crop, profile.is_vegetable);

        recommendations.push(Recommendation {
            crop: crop.clone(),
            nutrients: profile.nutrient_per_acre,
            water_requirement,
            estimated_cost: water_requirement * COST_PER_WATER_UNIT,
            estimated_yield,
            market_trend,
            image_url: encyclopedia::image_url(crop).to_string(),
        });
    }

    if recommendations.is_empty() {
        return Err(AdvisorError::NoRecommendation(soil_type.to_string()));
    }

    Ok(recommendations)
}
