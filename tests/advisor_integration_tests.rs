// Advisor Integration Tests
//
// Exercises the full engine against the builtin reference dataset plus the
// CSV loading path. Run with: cargo test --test advisor_integration_tests

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use crop_advisor_rust::{
    AdvisorError, CropAdvisor, FarmRecord, FarmStore, GrowthStage, MemoryFarmStore,
    MoistureBucket, MotorReading, MotorStatus, NotificationKind, ReferenceData, SamplingStrategy,
    SoilInput, SoilOption, SoilSignature,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn coastal_signature() -> SoilSignature {
    SoilSignature {
        red: 118,
        green: 96,
        blue: 74,
        ph: 6.6,
        ec: 0.38,
        moisture: MoistureBucket::Moderate,
    }
}

fn farm_record(selected_crop: Option<&str>, start: NaiveDate) -> FarmRecord {
    FarmRecord {
        farmer_id: "farmer-1".to_string(),
        location: "Jaffna".to_string(),
        land_size_acres: 2.0,
        soil_option: SoilOption::Sensor,
        soil_type: "Coastal Alluvial".to_string(),
        sensor_reading: Some(coastal_signature()),
        start_date: start,
        water_available: 5000.0,
        selected_crop: selected_crop.map(|c| c.to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(),
    }
}

// =========================================================================
// Section 1: Soil classification
// =========================================================================

#[test]
fn test_classify_exact_table_match() {
    let advisor = CropAdvisor::builtin();
    let label = advisor.classify_soil(&coastal_signature()).unwrap();
    assert_eq!(label, "Coastal Alluvial");
}

#[test]
fn test_classify_window_edges() {
    let advisor = CropAdvisor::builtin();

    // Channel tolerance at its limit, pH and EC near theirs, still a match.
    let mut reading = coastal_signature();
    reading.red += 5;
    reading.ph += 0.15;
    reading.ec -= 0.04;
    assert_eq!(advisor.classify_soil(&reading).unwrap(), "Coastal Alluvial");
}

#[test]
fn test_classify_falls_back_to_model_outside_windows() {
    let advisor = CropAdvisor::builtin();

    // Outside every stored window, but clearly in the Black Clay cluster.
    let reading = SoilSignature {
        red: 70,
        green: 60,
        blue: 52,
        ph: 7.5,
        ec: 0.55,
        moisture: MoistureBucket::Moderate,
    };
    assert_eq!(advisor.classify_soil(&reading).unwrap(), "Black Clay");
}

// =========================================================================
// Section 2: Recommendation flow
// =========================================================================

#[test]
fn test_recommend_manual_soil_type() {
    let advisor = CropAdvisor::builtin();
    let set = advisor
        .recommend(
            &SoilInput::Manual("Coastal Alluvial".to_string()),
            2.0,
            date(2024, 1, 1),
        )
        .unwrap();

    assert_eq!(set.soil_type, "Coastal Alluvial");
    let crops: Vec<&str> = set
        .recommendations
        .iter()
        .map(|r| r.crop.as_str())
        .collect();
    assert_eq!(crops, ["Tomato", "Brinjal", "Rice"]);

    for rec in &set.recommendations {
        assert_relative_eq!(rec.estimated_cost, rec.water_requirement * 10.0);
        assert!(rec.market_trend >= 0.0 && rec.market_trend <= 1.0);
        assert!(!rec.image_url.is_empty());
    }
}

#[test]
fn test_recommend_subtyped_soil_resolves_main_type() {
    let advisor = CropAdvisor::builtin();
    let set = advisor
        .recommend(
            &SoilInput::Manual("Laterite - Gravelly".to_string()),
            1.0,
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(set.recommendations.len(), 3);
}

#[test]
fn test_recommend_unknown_soil_is_no_suitable_crop() {
    let advisor = CropAdvisor::builtin();
    let result = advisor.recommend(
        &SoilInput::Manual("Chalk".to_string()),
        1.0,
        date(2024, 1, 1),
    );
    assert!(matches!(result, Err(AdvisorError::NoSuitableCrop(_))));
}

#[test]
fn test_recommendation_count_bounds_across_all_soils() {
    let advisor = CropAdvisor::builtin();
    for soil in [
        "Coastal Alluvial",
        "Red Loam",
        "Laterite",
        "Black Clay",
        "Sandy Loam",
    ] {
        let set = advisor
            .recommend(&SoilInput::Manual(soil.to_string()), 1.0, date(2024, 1, 1))
            .unwrap();
        assert!(!set.recommendations.is_empty());
        assert!(set.recommendations.len() <= 3, "soil {}", soil);
    }
}

#[test]
fn test_seeded_sampling_reproducible_end_to_end() {
    let run = |seed| {
        CropAdvisor::builtin()
            .with_sampling(SamplingStrategy::Seeded(seed))
            .recommend(
                &SoilInput::Manual("Coastal Alluvial".to_string()),
                1.0,
                date(2024, 1, 1),
            )
            .unwrap()
            .recommendations
            .iter()
            .map(|r| r.crop.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}

// =========================================================================
// Section 3: Schedule generation
// =========================================================================

#[test]
fn test_water_schedule_shape_and_scenario() {
    let advisor = CropAdvisor::builtin();
    let schedule = advisor
        .schedule("Tomato", "Coastal Alluvial", 2.0, date(2024, 1, 1), 5000.0)
        .unwrap();

    assert_eq!(schedule.water.len(), 7);
    assert_eq!(schedule.water[0].date, date(2024, 1, 1));

    // Tomato water requirement 600 × 2 acres × 1.0 soil multiplier.
    let expected = 1200.0;
    for (day, entry) in schedule.water.iter().enumerate() {
        assert_eq!(entry.date, date(2024, 1, 1) + Duration::days(day as i64));
        assert_relative_eq!(entry.water_quantity, expected);
    }
}

#[test]
fn test_nutrient_schedule_shape_and_scenario() {
    let advisor = CropAdvisor::builtin();
    let schedule = advisor
        .schedule("Tomato", "Coastal Alluvial", 2.0, date(2024, 1, 1), 5000.0)
        .unwrap();

    assert_eq!(schedule.nutrient.len(), 4);
    for (week, entry) in schedule.nutrient.iter().enumerate() {
        assert_eq!(
            entry.week_start,
            date(2024, 1, 1) + Duration::weeks(week as i64)
        );
        // 25% of nutrient_per_acre (50) × land size (2).
        assert_relative_eq!(entry.nutrient_quantity, 25.0);
    }
}

#[test]
fn test_schedule_unknown_crop() {
    let advisor = CropAdvisor::builtin();
    let result = advisor.schedule("Quinoa", "Coastal Alluvial", 1.0, date(2024, 1, 1), 0.0);
    assert!(matches!(result, Err(AdvisorError::UnknownCrop(_))));
}

// =========================================================================
// Section 4: Growth stage and moisture buckets
// =========================================================================

#[test]
fn test_growth_stage_reaches_and_keeps_harvesting() {
    assert_eq!(GrowthStage::from_elapsed_days(90), GrowthStage::Harvesting);
    for days in [91, 120, 365, 10_000] {
        assert_eq!(GrowthStage::from_elapsed_days(days), GrowthStage::Harvesting);
    }
}

#[test]
fn test_moisture_bucket_boundaries() {
    let cases = [
        (24.9, MoistureBucket::Low),
        (25.0, MoistureBucket::Moderate),
        (49.9, MoistureBucket::Moderate),
        (50.0, MoistureBucket::High),
        (74.9, MoistureBucket::High),
        (75.0, MoistureBucket::VeryHigh),
    ];
    for (reading, expected) in cases {
        assert_eq!(MoistureBucket::from_percent(reading), expected);
    }
}

// =========================================================================
// Section 5: Monitoring
// =========================================================================

#[test]
fn test_monitor_midseason_scenario() {
    let advisor = CropAdvisor::builtin();
    let record = farm_record(Some("Tomato"), date(2024, 1, 1));

    // Day 45: vegetative growth at 50%, low moisture raises a warning.
    let report = advisor
        .monitor(
            "farmer-1",
            Some(&record),
            date(2024, 2, 15),
            Some(10.0),
            Some(MotorReading {
                running: true,
                minutes_since_on: 10.0,
            }),
        )
        .unwrap();

    assert_eq!(report.stage, GrowthStage::VegetativeGrowth);
    assert_eq!(report.progress, 50);
    assert_eq!(report.moisture, MoistureBucket::Low);
    assert_eq!(report.motor_status, MotorStatus::On);
    assert_relative_eq!(report.water_supplied, 400.0);
    assert!(report
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Warning && n.message.contains("low")));
}

#[test]
fn test_monitor_without_record_is_404_equivalent() {
    let advisor = CropAdvisor::builtin();
    let result = advisor.monitor("farmer-9", None, date(2024, 2, 1), Some(40.0), None);
    assert!(matches!(result, Err(AdvisorError::NoFarmRecord(_))));
}

#[test]
fn test_monitor_degrades_on_telemetry_loss() {
    let advisor = CropAdvisor::builtin();
    let record = farm_record(Some("Tomato"), date(2024, 1, 1));
    let report = advisor
        .monitor("farmer-1", Some(&record), date(2024, 1, 20), None, None)
        .unwrap();

    assert_eq!(report.moisture, MoistureBucket::Unknown);
    assert_eq!(report.motor_status, MotorStatus::Off);
    assert_relative_eq!(report.water_supplied, 0.0);
    // Not harvesting yet, so the no-watering notice fires.
    assert!(report
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Info));
}

// =========================================================================
// Section 6: Farm store recency
// =========================================================================

#[test]
fn test_store_latest_record_drives_monitoring() {
    let advisor = CropAdvisor::builtin();
    let mut store = MemoryFarmStore::new();

    let mut old = farm_record(Some("Rice"), date(2023, 6, 1));
    old.created_at = Utc.with_ymd_and_hms(2023, 6, 1, 6, 0, 0).unwrap();
    store.put(old);

    let mut current = farm_record(None, date(2024, 1, 1));
    current.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
    store.put(current);

    store.set_selected_crop("farmer-1", "Tomato");

    let latest = store.latest_for("farmer-1").unwrap();
    assert_eq!(latest.selected_crop.as_deref(), Some("Tomato"));
    assert_eq!(latest.start_date, date(2024, 1, 1));

    let report = advisor
        .monitor(
            "farmer-1",
            Some(&latest),
            date(2024, 2, 15),
            Some(55.0),
            None,
        )
        .unwrap();
    assert_eq!(report.stage, GrowthStage::VegetativeGrowth);
}

// =========================================================================
// Section 7: CSV loading
// =========================================================================

#[test]
fn test_csv_loading_parses_typed_tables() {
    let dir = std::env::temp_dir().join(format!("crop_advisor_csv_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    std::fs::write(
        dir.join("soil_signatures.csv"),
        "red,green,blue,ph,ec,moisture,soil_type\n\
         118,96,74,6.6,0.38,Moderate,Coastal Alluvial\n\
         62,54,48,7.8,0.62,High,Black Clay\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("crop_suitability.csv"),
        "soil_type,crops\nCoastal Alluvial,Tomato|Rice\nBlack Clay,Rice\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("crop_profiles.csv"),
        "crop,nutrient_per_acre,base_water_per_acre_per_day,is_vegetable\n\
         Tomato,50.0,600.0,true\nRice,70.0,1200.0,false\n",
    )
    .unwrap();

    let data = ReferenceData::load(&dir).unwrap();
    assert_eq!(data.soil_table().len(), 2);
    assert_eq!(
        data.soil_table().lookup(&coastal_signature()),
        Some("Coastal Alluvial")
    );
    assert_eq!(
        data.crops_for_soil("Coastal Alluvial").unwrap(),
        ["Tomato", "Rice"]
    );
    assert!(data.profile("Rice").is_some());
    assert!(!data.is_vegetable("Rice"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_advisor_loads_shipped_data_dir() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let advisor = CropAdvisor::load(&dir).unwrap();
    let set = advisor
        .recommend(
            &SoilInput::Manual("Coastal Alluvial".to_string()),
            2.0,
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(set.recommendations.len(), 3);
}
