//! Crop Suitability Resolver
//!
//! Resolves a soil type label to at most three candidate crops. The query
//! tries the exact label first; labels carrying a subtype fall back to their
//! main type when the exact query has nothing. Candidates are then
//! prioritized: two vegetables, one other crop, remaining vegetables as
//! filler.
//!
//! The pick used for the non-vegetable slot and the filler is an explicit,
//! injectable strategy (deterministic first-listed by default, or a seeded
//! uniform draw), so nothing in the resolver depends on ambient randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::data::ReferenceData;
use crate::error::AdvisorError;
use crate::soil_table::main_soil_type;

/// Upper bound on the crops returned for one soil type.
pub const MAX_SELECTED_CROPS: usize = 3;

/// Vegetable slots filled before any other crop is considered.
const PREFERRED_VEGETABLE_SLOTS: usize = 2;

/// How the resolver picks among equally eligible candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// Always take the first candidate in table order.
    #[default]
    FirstListed,
    /// Uniform pick driven by a caller-supplied seed. Equal seeds give
    /// equal selections.
    Seeded(u64),
}

pub type CropSelection = SmallVec<[String; MAX_SELECTED_CROPS]>;

/// Candidate crops for a soil type, prioritized and capped at three.
pub fn suitable_crops(
    reference: &ReferenceData,
    soil_type: &str,
    strategy: SamplingStrategy,
) -> Result<CropSelection, AdvisorError> {
    let exact = reference.crops_for_soil(soil_type).unwrap_or(&[]);

    let candidates = if !exact.is_empty() {
        exact
    } else {
        // A subtype that does not narrow results resolves through its main type.
        let main = main_soil_type(soil_type);
        if main != soil_type {
            reference.crops_for_soil(main).unwrap_or(&[])
        } else {
            &[]
        }
    };

    if candidates.is_empty() {
        return Err(AdvisorError::NoSuitableCrop(soil_type.to_string()));
    }

    Ok(prioritize(reference, candidates, strategy))
}

fn prioritize(
    reference: &ReferenceData,
    candidates: &[String],
    strategy: SamplingStrategy,
) -> CropSelection {
    let mut rng = match strategy {
        SamplingStrategy::FirstListed => None,
        SamplingStrategy::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
    };

    let (mut vegetables, mut others): (Vec<&String>, Vec<&String>) = candidates
        .iter()
        .partition(|crop| reference.is_vegetable(crop));

    let mut selected = CropSelection::new();

    // Two highest-priority vegetables, in table order.
    while selected.len() < PREFERRED_VEGETABLE_SLOTS && !vegetables.is_empty() {
        selected.push(vegetables.remove(0).clone());
    }

    // Exactly one non-vegetable when one exists.
    if selected.len() < MAX_SELECTED_CROPS && !others.is_empty() {
        let idx = pick(&mut rng, others.len());
        selected.push(others.remove(idx).clone());
    }

    // Fill from remaining vegetables, then remaining others, until three
    // crops or the pool runs dry.
    while selected.len() < MAX_SELECTED_CROPS && !vegetables.is_empty() {
        let idx = pick(&mut rng, vegetables.len());
        selected.push(vegetables.remove(idx).clone());
    }
    while selected.len() < MAX_SELECTED_CROPS && !others.is_empty() {
        let idx = pick(&mut rng, others.len());
        selected.push(others.remove(idx).clone());
    }

    selected
}

fn pick(rng: &mut Option<StdRng>, len: usize) -> usize {
    match rng {
        Some(rng) => rng.gen_range(0..len),
        None => 0,
    }
}
