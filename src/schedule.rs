//! Schedule Generator
//!
//! Deterministic synthesis of the watering schedule (7 consecutive days),
//! the nutrient schedule (4 weekly applications), and pesticide advice for a
//! chosen crop. Pure functions of (crop, soil type, land size, start date);
//! the daily water quantity is intentionally constant across the horizon
//! rather than ramping by growth stage.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::data::ReferenceData;
use crate::error::AdvisorError;
use crate::recommend::water_requirement;

/// Days covered by one watering schedule.
pub const WATER_HORIZON_DAYS: usize = 7;
/// Weekly applications in one nutrient schedule.
pub const NUTRIENT_HORIZON_WEEKS: usize = 4;

/// Share of the per-acre nutrient quantity applied each week.
const NUTRIENT_WEEKLY_FRACTION: f64 = 0.25;
const WATERING_DURATION_MINUTES: u32 = 60;
const FERTILIZER_TYPE: &str = "NPK 20-20-20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IrrigationMethod {
    Drip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowSpeed {
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationMethod {
    Foliar,
}

/// One day of watering. Entries are never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct WaterScheduleEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Litres for the whole plot on this day.
    pub water_quantity: f64,
    pub method: IrrigationMethod,
    pub flow_speed: FlowSpeed,
    pub duration_minutes: u32,
}

/// One weekly nutrient application.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientScheduleEntry {
    pub week_start: NaiveDate,
    pub nutrient_quantity: f64,
    pub fertilizer: String,
    pub application_method: ApplicationMethod,
}

/// Crop-keyed pest-control guidance with a generic fallback.
#[derive(Debug, Clone, Serialize)]
pub struct PesticideAdvice {
    pub product: String,
    pub preparation: String,
    pub notes: String,
}

/// The complete schedule bundle for one crop on one plot.
#[derive(Debug, Clone, Serialize)]
pub struct CropSchedule {
    pub water: Vec<WaterScheduleEntry>,
    pub nutrient: Vec<NutrientScheduleEntry>,
    pub pesticide: PesticideAdvice,
}

/// Watering adjustment multipliers keyed by soil type; unlisted soils use 1.0.
const SOIL_MULTIPLIERS: &[(&str, f64)] = &[
    ("Coastal Alluvial", 1.0),
    ("Red Loam", 1.05),
    ("Laterite - Gravelly", 1.15),
    ("Laterite - Plateau", 1.1),
    ("Black Clay", 0.85),
    ("Sandy Loam", 1.3),
];

pub fn soil_multiplier(soil_type: &str) -> f64 {
    SOIL_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == soil_type)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

/// Generate the watering and nutrient schedules plus pesticide advice.
///
/// `water_available` rides along for the caller's bookkeeping; quantities
/// derive from crop, soil, and land size only.
pub fn generate_schedule(
    reference: &ReferenceData,
    crop: &str,
    soil_type: &str,
    land_size_acres: f64,
    start_date: NaiveDate,
    _water_available: f64,
) -> Result<CropSchedule, AdvisorError> {
    let Some(profile) = reference.profile(crop) else {
        return Err(AdvisorError::UnknownCrop(crop.to_string()));
    };

    let daily_quantity =
        water_requirement(reference, crop) * land_size_acres * soil_multiplier(soil_type);
    let watering_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN);

    let water = (0..WATER_HORIZON_DAYS)
        .map(|day| WaterScheduleEntry {
            date: start_date + Duration::days(day as i64),
            time: watering_time,
            water_quantity: daily_quantity,
            method: IrrigationMethod::Drip,
            flow_speed: FlowSpeed::Low,
            duration_minutes: WATERING_DURATION_MINUTES,
        })
        .collect();

    let weekly_quantity = profile.nutrient_per_acre * land_size_acres * NUTRIENT_WEEKLY_FRACTION;
    let nutrient = (0..NUTRIENT_HORIZON_WEEKS)
        .map(|week| NutrientScheduleEntry {
            week_start: start_date + Duration::weeks(week as i64),
            nutrient_quantity: weekly_quantity,
            fertilizer: FERTILIZER_TYPE.to_string(),
            application_method: ApplicationMethod::Foliar,
        })
        .collect();

    Ok(CropSchedule {
        water,
        nutrient,
        pesticide: pesticide_advice(crop),
    })
}

/// Pest-control guidance for a crop; crops without a dedicated entry get
/// the generic integrated-pest-management fallback.
pub fn pesticide_advice(crop: &str) -> PesticideAdvice {
    let (product, preparation, notes) = match crop {
        "Tomato" => (
            "Neem oil spray",
            "Dilute 5 ml neem oil and 2 ml liquid soap per litre of water; shake well before use.",
            "Targets aphids, whiteflies, and tomato hornworms. Spray in the early morning, repeat weekly while pests persist.",
        ),
        "Rice" => (
            "Neem seed kernel extract",
            "Soak 50 g crushed neem kernels per litre of water overnight, filter, and spray the standing crop.",
            "Monitors stem borers and leaf folders. Avoid spraying within a week of draining the field.",
        ),
        "Wheat" => (
            "Sulfur-based organic spray",
            "Mix 3 g wettable sulfur per litre of water and apply to both leaf surfaces.",
            "Controls rust and discourages aphids; prefer resistant varieties at sowing.",
        ),
        "Brinjal" => (
            "Neem oil spray",
            "Dilute 5 ml neem oil per litre of water with a drop of emulsifier.",
            "Watch for shoot and fruit borer; remove and destroy infested shoots before spraying.",
        ),
        "Okra" => (
            "Insecticidal soap solution",
            "Dissolve 10 ml mild liquid soap in a litre of water and spray undersides of leaves.",
            "Keeps jassids and whiteflies in check; rinse-spray with plain water the following day.",
        ),
        "Pumpkin" => (
            "Neem oil spray",
            "Dilute 5 ml neem oil per litre of water; apply to vines and the underside of leaves.",
            "Deters fruit flies and beetles. Do not spray open flowers during pollinator hours.",
        ),
        _ => (
            "General-purpose neem spray",
            "Dilute 5 ml neem oil per litre of water and apply evenly over the foliage.",
            "Generic guidance: inspect the crop twice a week and spray at first sign of infestation.",
        ),
    };

    PesticideAdvice {
        product: product.to_string(),
        preparation: preparation.to_string(),
        notes: notes.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReferenceData;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_water_schedule_seven_identical_consecutive_days() {
        let data = ReferenceData::builtin();
        let schedule = generate_schedule(
            &data,
            "Tomato",
            "Coastal Alluvial",
            2.0,
            date(2024, 1, 1),
            5000.0,
        )
        .unwrap();

        assert_eq!(schedule.water.len(), WATER_HORIZON_DAYS);
        for (day, entry) in schedule.water.iter().enumerate() {
            assert_eq!(entry.date, date(2024, 1, 1) + Duration::days(day as i64));
            // Coastal Alluvial multiplier is 1.0: 600 × 2 acres.
            assert_relative_eq!(entry.water_quantity, 1200.0);
            assert_eq!(entry.duration_minutes, 60);
            assert_eq!(entry.method, IrrigationMethod::Drip);
            assert_eq!(entry.flow_speed, FlowSpeed::Low);
        }
    }

    #[test]
    fn test_nutrient_schedule_four_weekly_quarters() {
        let data = ReferenceData::builtin();
        let schedule = generate_schedule(
            &data,
            "Tomato",
            "Coastal Alluvial",
            2.0,
            date(2024, 1, 1),
            5000.0,
        )
        .unwrap();

        assert_eq!(schedule.nutrient.len(), NUTRIENT_HORIZON_WEEKS);
        for (week, entry) in schedule.nutrient.iter().enumerate() {
            assert_eq!(
                entry.week_start,
                date(2024, 1, 1) + Duration::weeks(week as i64)
            );
            // 50 nutrient/acre × 2 acres × 0.25.
            assert_relative_eq!(entry.nutrient_quantity, 25.0);
        }
    }

    #[test]
    fn test_soil_multiplier_applies() {
        let data = ReferenceData::builtin();
        let schedule =
            generate_schedule(&data, "Pumpkin", "Sandy Loam", 1.0, date(2024, 3, 10), 0.0).unwrap();
        // 450 base × 1.0 acre × 1.3 sandy multiplier.
        assert_relative_eq!(schedule.water[0].water_quantity, 585.0);
    }

    #[test]
    fn test_unlisted_soil_type_uses_default_multiplier() {
        assert_relative_eq!(soil_multiplier("Chalk"), 1.0);
    }

    #[test]
    fn test_unknown_crop_is_an_error() {
        let data = ReferenceData::builtin();
        let result = generate_schedule(
            &data,
            "Quinoa",
            "Coastal Alluvial",
            1.0,
            date(2024, 1, 1),
            0.0,
        );
        assert!(matches!(result, Err(AdvisorError::UnknownCrop(_))));
    }

    #[test]
    fn test_pesticide_fallback_for_unlisted_crop() {
        let advice = pesticide_advice("Groundnut");
        assert!(advice.product.contains("neem"));
        assert!(!advice.preparation.is_empty());
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let data = ReferenceData::builtin();
        let first = generate_schedule(&data, "Rice", "Black Clay", 3.0, date(2024, 6, 1), 0.0)
            .unwrap();
        let second = generate_schedule(&data, "Rice", "Black Clay", 3.0, date(2024, 6, 1), 0.0)
            .unwrap();
        assert_eq!(first.water.len(), second.water.len());
        for (a, b) in first.water.iter().zip(&second.water) {
            assert_eq!(a.date, b.date);
            assert_relative_eq!(a.water_quantity, b.water_quantity);
        }
    }
}
