//! Soil Reference Table
//!
//! Matches sensor signatures against the stored soil rows using tolerance
//! windows on the color channels, pH, and electrical conductivity, plus an
//! exact match on the moisture bucket. Lookup is a bounded scan over the
//! table; the first row whose windows all contain the reading wins. A miss
//! is `None`, not an error; the classifier handles unmatched readings.

use serde::{Deserialize, Serialize};

/// Tolerance half-window on each 0-255 color channel.
pub const CHANNEL_TOLERANCE: i16 = 5;
/// Tolerance half-window on pH.
pub const PH_TOLERANCE: f64 = 0.2;
/// Tolerance half-window on electrical conductivity.
pub const EC_TOLERANCE: f64 = 0.05;

/// Separator between a main soil type and its subtype in stored labels,
/// e.g. `"Laterite - Gravelly"`.
pub const SUBTYPE_SEPARATOR: &str = " - ";

/// Moisture bucket of a soil reading.
///
/// Reference rows store one of the four measured buckets; `Unknown` is the
/// monitoring sentinel for a failed telemetry read and never matches a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoistureBucket {
    Low,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl MoistureBucket {
    /// Bucket a raw moisture percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent < 25.0 {
            MoistureBucket::Low
        } else if percent < 50.0 {
            MoistureBucket::Moderate
        } else if percent < 75.0 {
            MoistureBucket::High
        } else {
            MoistureBucket::VeryHigh
        }
    }

    /// Bucket an optional telemetry reading. A failed read is `Unknown`,
    /// never a guessed bucket.
    pub fn from_reading(reading: Option<f64>) -> Self {
        match reading {
            Some(percent) => Self::from_percent(percent),
            None => MoistureBucket::Unknown,
        }
    }

    /// Parse a bucket name as stored in the reference CSV.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Low" => Some(MoistureBucket::Low),
            "Moderate" => Some(MoistureBucket::Moderate),
            "High" => Some(MoistureBucket::High),
            "VeryHigh" => Some(MoistureBucket::VeryHigh),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureBucket::Low => "Low",
            MoistureBucket::Moderate => "Moderate",
            MoistureBucket::High => "High",
            MoistureBucket::VeryHigh => "VeryHigh",
            MoistureBucket::Unknown => "Unknown",
        }
    }
}

/// A soil sample as read from the color/pH/EC sensor head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSignature {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub ph: f64,
    pub ec: f64,
    pub moisture: MoistureBucket,
}

impl SoilSignature {
    /// Numeric feature vector for the classifier: `[r, g, b, pH, EC]`.
    pub fn features(&self) -> [f64; 5] {
        [
            self.red as f64,
            self.green as f64,
            self.blue as f64,
            self.ph,
            self.ec,
        ]
    }
}

/// One stored reference row: a signature and the soil type it maps to.
/// Every stored signature maps to exactly one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSignatureRow {
    pub signature: SoilSignature,
    pub soil_type: String,
}

/// The static signature-to-label lookup table. Never mutated at request time.
pub struct SoilTable {
    rows: Vec<SoilSignatureRow>,
}

impl SoilTable {
    pub fn new(rows: Vec<SoilSignatureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SoilSignatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the soil type for a signature, if any stored row's tolerance
    /// windows contain it and the moisture bucket matches exactly.
    pub fn lookup(&self, signature: &SoilSignature) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| matches_row(&row.signature, signature))
            .map(|row| row.soil_type.as_str())
    }
}

/// Main soil type of a label: the portion before the subtype separator.
/// Labels without a subtype are returned unchanged.
pub fn main_soil_type(label: &str) -> &str {
    match label.split_once(SUBTYPE_SEPARATOR) {
        Some((main, _subtype)) => main,
        None => label,
    }
}

fn matches_row(stored: &SoilSignature, reading: &SoilSignature) -> bool {
    within_channel(stored.red, reading.red)
        && within_channel(stored.green, reading.green)
        && within_channel(stored.blue, reading.blue)
        && (stored.ph - reading.ph).abs() <= PH_TOLERANCE
        && (stored.ec - reading.ec).abs() <= EC_TOLERANCE
        && stored.moisture == reading.moisture
}

fn within_channel(stored: u8, reading: u8) -> bool {
    (stored as i16 - reading as i16).abs() <= CHANNEL_TOLERANCE
}
