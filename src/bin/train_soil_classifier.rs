//! Soil classifier training report
//!
//! Trains the Gaussian naive Bayes model on the soil signature table and
//! reports per-row predictions plus resubstitution accuracy. Reads CSVs from
//! DATA_DIR when set, otherwise uses the builtin dataset.
//!
//! Run with: cargo run --bin train_soil_classifier

use crop_advisor_rust::classifier::SoilClassifier;
use crop_advisor_rust::ReferenceData;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    println!("\n{}", "=".repeat(60));
    println!("SOIL CLASSIFIER TRAINING REPORT");
    println!("{}", "=".repeat(60));

    let reference = match std::env::var("DATA_DIR") {
        Ok(dir) => {
            println!("\nLoading reference data from {}", dir);
            ReferenceData::load(Path::new(&dir))?
        }
        Err(_) => {
            println!("\nDATA_DIR not set - using builtin reference data");
            ReferenceData::builtin()
        }
    };

    let table = reference.soil_table();
    println!("Signatures: {}", table.len());

    let train_start = Instant::now();
    let model = SoilClassifier::train(table)?;
    println!(
        "\nTrained {} classes in {:.2} ms",
        model.class_count(),
        train_start.elapsed().as_secs_f64() * 1000.0
    );

    println!("\nPer-row predictions:");
    for row in table.rows() {
        let predicted = model.predict(&row.signature.features());
        let marker = if predicted == row.soil_type { " " } else { "✗" };
        println!("  {} {:24} → {}", marker, row.soil_type, predicted);
    }

    let accuracy = model.resubstitution_accuracy(table);
    println!("\nResubstitution accuracy: {:.1}%", accuracy * 100.0);

    Ok(())
}
