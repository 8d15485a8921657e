//! Soil Classifier Adapter
//!
//! Wraps a Gaussian naive Bayes model trained once at load time on the soil
//! reference table (features `[r, g, b, pH, EC]` → soil type label). The
//! adapter's contract is a stable numeric-vector-in, label-out `predict`;
//! when training fails the advisor reports sensor-mode requests as
//! `ClassifierUnavailable` instead of guessing.
//!
//! Features are standardized with global per-feature mean/scale before the
//! per-class statistics are computed, so the color channels (0-255) do not
//! drown out pH and EC.

use anyhow::{bail, Result};
use libm::log;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::soil_table::SoilTable;

/// Length of the classifier feature vector: `[r, g, b, pH, EC]`.
pub const FEATURE_COUNT: usize = 5;

/// Floor applied to per-class variances of standardized features.
const VARIANCE_FLOOR: f64 = 1e-3;

const LOG_TWO_PI: f64 = 1.837_877_066_409_345_3;

#[derive(Debug)]
struct ClassStats {
    label: String,
    log_prior: f64,
    mean: [f64; FEATURE_COUNT],
    var: [f64; FEATURE_COUNT],
}

/// Gaussian naive Bayes over standardized soil features.
pub struct SoilClassifier {
    feature_mean: [f64; FEATURE_COUNT],
    feature_scale: [f64; FEATURE_COUNT],
    classes: Vec<ClassStats>,
}

impl SoilClassifier {
    /// Train on the soil reference table. Fails when the table has no rows
    /// to learn from.
    pub fn train(table: &SoilTable) -> Result<Self> {
        let rows = table.rows();
        if rows.is_empty() {
            bail!("soil reference table has no signature rows to train on");
        }

        let n = rows.len() as f64;

        // Global standardization parameters.
        let mut feature_mean = [0.0; FEATURE_COUNT];
        for row in rows {
            let features = row.signature.features();
            for (mean, value) in feature_mean.iter_mut().zip(features) {
                *mean += value / n;
            }
        }
        let mut feature_scale = [0.0; FEATURE_COUNT];
        for row in rows {
            let features = row.signature.features();
            for i in 0..FEATURE_COUNT {
                let diff = features[i] - feature_mean[i];
                feature_scale[i] += diff * diff / n;
            }
        }
        for scale in feature_scale.iter_mut() {
            *scale = scale.sqrt().max(1e-6);
        }

        // Per-label statistics on standardized features.
        let mut by_label: FxHashMap<&str, Vec<[f64; FEATURE_COUNT]>> = FxHashMap::default();
        for row in rows {
            let standardized =
                standardize(&row.signature.features(), &feature_mean, &feature_scale);
            by_label
                .entry(row.soil_type.as_str())
                .or_default()
                .push(standardized);
        }

        let mut classes: Vec<ClassStats> = by_label
            .into_iter()
            .map(|(label, samples)| {
                let count = samples.len() as f64;
                let mut mean = [0.0; FEATURE_COUNT];
                for sample in &samples {
                    for i in 0..FEATURE_COUNT {
                        mean[i] += sample[i] / count;
                    }
                }
                let mut var = [VARIANCE_FLOOR; FEATURE_COUNT];
                for sample in &samples {
                    for i in 0..FEATURE_COUNT {
                        let diff = sample[i] - mean[i];
                        var[i] += diff * diff / count;
                    }
                }
                ClassStats {
                    label: label.to_string(),
                    log_prior: log(count / n),
                    mean,
                    var,
                }
            })
            .collect();

        // Stable class order keeps prediction ties deterministic.
        classes.sort_by(|a, b| a.label.cmp(&b.label));

        Ok(Self {
            feature_mean,
            feature_scale,
            classes,
        })
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Predict the soil type label for a raw feature vector `[r, g, b, pH, EC]`.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> &str {
        let x = standardize(features, &self.feature_mean, &self.feature_scale);

        let mut best: Option<(&str, f64)> = None;
        for class in &self.classes {
            let mut score = class.log_prior;
            for i in 0..FEATURE_COUNT {
                score += log_density(x[i], class.mean[i], class.var[i]);
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((class.label.as_str(), score));
            }
        }

        // train() rejects empty tables, so at least one class always exists.
        best.map(|(label, _)| label).unwrap_or_default()
    }

    /// Fraction of reference rows the trained model maps back to their own
    /// label. A sanity figure reported by the training binary.
    pub fn resubstitution_accuracy(&self, table: &SoilTable) -> f64 {
        if table.is_empty() {
            return 0.0;
        }
        let hits = table
            .rows()
            .par_iter()
            .filter(|row| self.predict(&row.signature.features()) == row.soil_type)
            .count();
        hits as f64 / table.len() as f64
    }
}

fn standardize(
    features: &[f64; FEATURE_COUNT],
    mean: &[f64; FEATURE_COUNT],
    scale: &[f64; FEATURE_COUNT],
) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for i in 0..FEATURE_COUNT {
        out[i] = (features[i] - mean[i]) / scale[i];
    }
    out
}

fn log_density(x: f64, mean: f64, var: f64) -> f64 {
    let diff = x - mean;
    -0.5 * (LOG_TWO_PI + log(var) + diff * diff / var)
}
