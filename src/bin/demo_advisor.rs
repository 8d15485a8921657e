//! Advisor walkthrough
//!
//! Runs the full flow once against the builtin reference data: classify a
//! sensor reading, build recommendations, save a farm record, pick a crop,
//! generate the schedules, and produce a monitoring report.
//!
//! Run with: cargo run --bin demo_advisor

use chrono::Utc;
use crop_advisor_rust::{
    CropAdvisor, FarmRecord, FarmStore, MemoryFarmStore, MoistureBucket, MotorReading,
    SoilInput, SoilOption, SoilSignature,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisor_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Crop Advisor Walkthrough");
    println!("========================\n");

    let advisor = CropAdvisor::builtin();
    let mut store = MemoryFarmStore::new();

    // A sensor reading just inside the Coastal Alluvial windows.
    let reading = SoilSignature {
        red: 120,
        green: 94,
        blue: 76,
        ph: 6.5,
        ec: 0.40,
        moisture: MoistureBucket::Moderate,
    };

    let start_date = Utc::now().date_naive();
    let land_size_acres = 2.0;

    println!("## Recommendation\n");
    let set = advisor.recommend(&SoilInput::Sensor(reading.clone()), land_size_acres, start_date)?;
    println!("Resolved soil type: {}", set.soil_type);
    println!("{}\n", serde_json::to_string_pretty(&set.recommendations)?);

    // Persist the request the way a boundary layer would.
    store.put(FarmRecord {
        farmer_id: "farmer-1".to_string(),
        location: "Jaffna".to_string(),
        land_size_acres,
        soil_option: SoilOption::Sensor,
        soil_type: set.soil_type.clone(),
        sensor_reading: Some(reading),
        start_date,
        water_available: 5000.0,
        selected_crop: None,
        created_at: Utc::now(),
    });

    let chosen = set.recommendations[0].crop.clone();
    store.set_selected_crop("farmer-1", &chosen);
    println!("Selected crop: {}\n", chosen);

    println!("## Schedule\n");
    let schedule = advisor.schedule(&chosen, &set.soil_type, land_size_acres, start_date, 5000.0)?;
    println!(
        "Water schedule ({} days, {:.0} L/day):",
        schedule.water.len(),
        schedule.water[0].water_quantity
    );
    for entry in &schedule.water {
        println!("  {} {}: {:.0} L", entry.date, entry.time, entry.water_quantity);
    }
    println!("\nNutrient schedule:");
    for entry in &schedule.nutrient {
        println!(
            "  week of {}: {:.1} kg {}",
            entry.week_start, entry.nutrient_quantity, entry.fertilizer
        );
    }
    println!("\nPesticide advice: {}", schedule.pesticide.product);
    println!("  {}\n", schedule.pesticide.notes);

    println!("## Monitoring\n");
    let record = store.latest_for("farmer-1");
    let report = advisor.monitor(
        "farmer-1",
        record.as_ref(),
        start_date,
        Some(18.5),
        Some(MotorReading {
            running: true,
            minutes_since_on: 20.0,
        }),
    )?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
