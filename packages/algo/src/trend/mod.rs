//! Trend Synthesizer
//!
//! Fabricates a multi-phase progression for each category from nothing but
//! its final percentage. The winner climbs toward its value, every other
//! category eases toward its own from a capped start.
//!
//! - top category: `start = max(20, final - 25)`
//! - other categories: `start = min(35, final + 10)`
//! - phase `i`: `round(start + (final - start) * i / (phases - 1))`

use serde::Serialize;

use crate::sanitize::{prepare_result, PreparedPrediction};
use crate::types::{
    Category, PredictionEntry, PredictionResult, Series, TopSelection, CATEGORY_COUNT,
    OTHER_START_CAP, OTHER_START_RISE, PHASE_COUNT, TOP_START_DROP, TOP_START_FLOOR,
};

/// Synthesized series together with the inputs that produced them
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedTrend {
    pub series: [Series; CATEGORY_COUNT],
    pub finals: [f64; CATEGORY_COUNT],
    pub top: TopSelection,
    pub used_fallback: bool,
}

impl SynthesizedTrend {
    pub fn top_index(&self) -> usize {
        self.top.index()
    }
}

/// Start value of a category's series
pub fn start_value(final_value: f64, is_top: bool) -> f64 {
    if is_top {
        TOP_START_FLOOR.max(final_value - TOP_START_DROP)
    } else {
        OTHER_START_CAP.min(final_value + OTHER_START_RISE)
    }
}

/// Linear interpolation from `start` to `end`, rounded per phase.
///
/// The first value is always `round(start)` and the last `round(end)`; the
/// sequence is monotone in the direction of `end - start`.
pub fn interpolate(start: f64, end: f64, phase_count: usize) -> Vec<i32> {
    match phase_count {
        0 => Vec::new(),
        1 => vec![round_value(end)],
        _ => {
            let last = phase_count - 1;
            (0..phase_count)
                .map(|i| {
                    if i == last {
                        return round_value(end);
                    }
                    let progress = i as f64 / last as f64;
                    round_value(start + (end - start) * progress)
                })
                .collect()
        }
    }
}

/// Synthesize one series per category. `entries` must be in fixed category
/// order; `top_index` past the last category emphasizes nothing.
pub fn synthesize(
    entries: &[PredictionEntry; CATEGORY_COUNT],
    top_index: usize,
) -> [Series; CATEGORY_COUNT] {
    synthesize_with_phases(entries, top_index, PHASE_COUNT)
}

pub fn synthesize_with_phases(
    entries: &[PredictionEntry; CATEGORY_COUNT],
    top_index: usize,
    phase_count: usize,
) -> [Series; CATEGORY_COUNT] {
    std::array::from_fn(|idx| {
        let entry = &entries[idx];
        let start = start_value(entry.percentage, idx == top_index);
        let category = Category::from_index(idx).unwrap_or(entry.category);
        Series::from_values(category, interpolate(start, entry.percentage, phase_count))
    })
}

/// Prepare a service result and synthesize its series
pub fn synthesize_prediction(result: &PredictionResult) -> SynthesizedTrend {
    synthesize_prepared(&prepare_result(result))
}

pub fn synthesize_prepared(prepared: &PreparedPrediction) -> SynthesizedTrend {
    let entries = prepared.entries();
    SynthesizedTrend {
        series: synthesize(&entries, prepared.top.index()),
        finals: prepared.finals,
        top: prepared.top,
        used_fallback: prepared.used_fallback,
    }
}

// Values are non-negative here, so half-away-from-zero matches half-up.
fn round_value(value: f64) -> i32 {
    value.round() as i32
}
