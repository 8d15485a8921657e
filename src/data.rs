//! Reference data loading and management
//!
//! Loads the soil signature, crop suitability, and crop profile tables from
//! CSV using Polars and converts them to typed rows behind FxHashMap indexes.
//! All three tables are loaded once at process start and stay read-only for
//! the lifetime of the process.
//!
//! A builtin dataset backs tests and callers running without data files.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::soil_table::{MoistureBucket, SoilSignature, SoilSignatureRow, SoilTable};

/// Immutable per-crop reference data. Loaded once, never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub crop: String,
    /// Nutrient quantity per acre over a full application cycle.
    pub nutrient_per_acre: f64,
    /// Base daily water requirement per acre, in litres.
    pub base_water_per_acre_per_day: f64,
    pub is_vegetable: bool,
}

/// Main data holder for the advisor: soil signatures, the soil-to-crop
/// suitability relation, and per-crop profiles.
pub struct ReferenceData {
    soil_table: SoilTable,
    /// Soil type label → candidate crops, in table priority order.
    suitability: FxHashMap<String, Vec<String>>,
    profiles: FxHashMap<String, CropProfile>,
}

impl ReferenceData {
    /// Load all reference tables from a data directory.
    pub fn load(dir: &Path) -> Result<Self> {
        tracing::info!("Loading reference datasets from {}", dir.display());

        let soil_table = load_signatures(&dir.join("soil_signatures.csv"))?;
        let suitability = load_suitability(&dir.join("crop_suitability.csv"))?;
        let profiles = load_profiles(&dir.join("crop_profiles.csv"))?;

        tracing::info!("  Soil signatures: {}", soil_table.len());
        tracing::info!("  Soil types with suitability entries: {}", suitability.len());
        tracing::info!("  Crop profiles: {}", profiles.len());

        Ok(Self {
            soil_table,
            suitability,
            profiles,
        })
    }

    /// Assemble reference data from pre-loaded tables.
    pub fn from_parts(
        soil_table: SoilTable,
        suitability: FxHashMap<String, Vec<String>>,
        profiles: FxHashMap<String, CropProfile>,
    ) -> Self {
        Self {
            soil_table,
            suitability,
            profiles,
        }
    }

    /// The builtin dataset: the same tables the shipped `data/` CSVs carry,
    /// usable without any files on disk.
    pub fn builtin() -> Self {
        let rows = BUILTIN_SIGNATURES
            .iter()
            .map(|&(red, green, blue, ph, ec, moisture, soil_type)| SoilSignatureRow {
                signature: SoilSignature {
                    red,
                    green,
                    blue,
                    ph,
                    ec,
                    moisture,
                },
                soil_type: soil_type.to_string(),
            })
            .collect();

        let mut suitability = FxHashMap::default();
        for &(soil_type, crops) in BUILTIN_SUITABILITY {
            suitability.insert(
                soil_type.to_string(),
                crops.iter().map(|crop| crop.to_string()).collect(),
            );
        }

        let mut profiles = FxHashMap::default();
        for &(crop, nutrient_per_acre, base_water, is_vegetable) in BUILTIN_PROFILES {
            profiles.insert(
                crop.to_string(),
                CropProfile {
                    crop: crop.to_string(),
                    nutrient_per_acre,
                    base_water_per_acre_per_day: base_water,
                    is_vegetable,
                },
            );
        }

        Self {
            soil_table: SoilTable::new(rows),
            suitability,
            profiles,
        }
    }

    pub fn soil_table(&self) -> &SoilTable {
        &self.soil_table
    }

    /// Candidate crops for a soil type label, in table priority order.
    pub fn crops_for_soil(&self, soil_type: &str) -> Option<&[String]> {
        self.suitability.get(soil_type).map(|crops| crops.as_slice())
    }

    pub fn profile(&self, crop: &str) -> Option<&CropProfile> {
        self.profiles.get(crop)
    }

    pub fn is_vegetable(&self, crop: &str) -> bool {
        self.profile(crop).map_or(false, |profile| profile.is_vegetable)
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

/// Builtin soil signatures: (red, green, blue, pH, EC, moisture) → soil type.
const BUILTIN_SIGNATURES: &[(u8, u8, u8, f64, f64, MoistureBucket, &str)] = &[
    (118, 96, 74, 6.6, 0.38, MoistureBucket::Moderate, "Coastal Alluvial"),
    (112, 92, 70, 6.9, 0.44, MoistureBucket::High, "Coastal Alluvial"),
    (152, 82, 58, 5.6, 0.22, MoistureBucket::Low, "Red Loam"),
    (158, 88, 66, 5.9, 0.27, MoistureBucket::Moderate, "Red Loam"),
    (138, 70, 48, 5.2, 0.18, MoistureBucket::Low, "Laterite - Gravelly"),
    (130, 66, 44, 5.0, 0.16, MoistureBucket::Moderate, "Laterite - Plateau"),
    (62, 54, 48, 7.8, 0.62, MoistureBucket::High, "Black Clay"),
    (58, 50, 44, 8.1, 0.70, MoistureBucket::VeryHigh, "Black Clay"),
    (188, 168, 138, 6.2, 0.12, MoistureBucket::Low, "Sandy Loam"),
];

/// Builtin suitability relation. Subtyped laterite labels resolve through
/// their main type.
const BUILTIN_SUITABILITY: &[(&str, &[&str])] = &[
    ("Coastal Alluvial", &["Tomato", "Rice", "Wheat", "Brinjal", "Okra"]),
    ("Red Loam", &["Tomato", "Okra", "Pumpkin", "Maize"]),
    ("Laterite", &["Okra", "Pumpkin", "Groundnut"]),
    ("Black Clay", &["Rice", "Brinjal", "Wheat"]),
    ("Sandy Loam", &["Pumpkin", "Okra", "Groundnut"]),
];

/// Builtin crop profiles: (crop, nutrient/acre, base water/acre/day, vegetable).
const BUILTIN_PROFILES: &[(&str, f64, f64, bool)] = &[
    ("Tomato", 50.0, 600.0, true),
    ("Rice", 70.0, 1200.0, false),
    ("Wheat", 60.0, 500.0, false),
    ("Brinjal", 45.0, 550.0, true),
    ("Okra", 40.0, 500.0, true),
    ("Pumpkin", 35.0, 450.0, true),
    ("Maize", 55.0, 650.0, false),
    ("Groundnut", 30.0, 400.0, false),
];

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {}", path.display()))
}

/// Load the soil signature table from CSV.
fn load_signatures(path: &Path) -> Result<SoilTable> {
    let df = read_csv(path)?;

    let red = int_column(&df, "red")?;
    let green = int_column(&df, "green")?;
    let blue = int_column(&df, "blue")?;
    let ph = float_column(&df, "ph")?;
    let ec = float_column(&df, "ec")?;
    let moisture = str_column(&df, "moisture")?;
    let soil_type = str_column(&df, "soil_type")?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let (Some(r), Some(g), Some(b), Some(ph), Some(ec), Some(bucket), Some(label)) = (
            red.get(idx),
            green.get(idx),
            blue.get(idx),
            ph.get(idx),
            ec.get(idx),
            moisture.get(idx),
            soil_type.get(idx),
        ) else {
            anyhow::bail!("Soil signature row {} has missing values", idx);
        };

        let moisture = MoistureBucket::parse(bucket)
            .with_context(|| format!("Unknown moisture bucket '{}' in row {}", bucket, idx))?;

        rows.push(SoilSignatureRow {
            signature: SoilSignature {
                red: channel(r)?,
                green: channel(g)?,
                blue: channel(b)?,
                ph,
                ec,
                moisture,
            },
            soil_type: label.to_string(),
        });
    }

    Ok(SoilTable::new(rows))
}

/// Load the suitability relation: soil type → pipe-separated crop list.
fn load_suitability(path: &Path) -> Result<FxHashMap<String, Vec<String>>> {
    let df = read_csv(path)?;

    let soil_type = str_column(&df, "soil_type")?;
    let crop_list = str_column(&df, "crops")?;

    let mut map = FxHashMap::default();
    for idx in 0..df.height() {
        if let (Some(label), Some(crops)) = (soil_type.get(idx), crop_list.get(idx)) {
            let crops: Vec<String> = crops
                .split('|')
                .filter(|crop| !crop.is_empty())
                .map(|crop| crop.to_string())
                .collect();

            if !crops.is_empty() {
                map.insert(label.to_string(), crops);
            }
        }
    }

    Ok(map)
}

/// Load per-crop profiles from CSV.
fn load_profiles(path: &Path) -> Result<FxHashMap<String, CropProfile>> {
    let df = read_csv(path)?;

    let crop = str_column(&df, "crop")?;
    let nutrient = float_column(&df, "nutrient_per_acre")?;
    let base_water = float_column(&df, "base_water_per_acre_per_day")?;
    let is_vegetable = df
        .column("is_vegetable")
        .with_context(|| "Column 'is_vegetable' not found")?
        .bool()
        .with_context(|| "Column 'is_vegetable' is not boolean")?;

    let mut map = FxHashMap::default();
    for idx in 0..df.height() {
        let (Some(name), Some(nutrient), Some(water), Some(vegetable)) = (
            crop.get(idx),
            nutrient.get(idx),
            base_water.get(idx),
            is_vegetable.get(idx),
        ) else {
            anyhow::bail!("Crop profile row {} has missing values", idx);
        };

        map.insert(
            name.to_string(),
            CropProfile {
                crop: name.to_string(),
                nutrient_per_acre: nutrient,
                base_water_per_acre_per_day: water,
                is_vegetable: vegetable,
            },
        );
    }

    Ok(map)
}

fn channel(value: i64) -> Result<u8> {
    u8::try_from(value).with_context(|| format!("Color channel value {} outside 0-255", value))
}

fn int_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Int64Chunked> {
    df.column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .i64()
        .with_context(|| format!("Column '{}' is not integer type", name))
}

fn float_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
    df.column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .f64()
        .with_context(|| format!("Column '{}' is not float type", name))
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    df.column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))
}
