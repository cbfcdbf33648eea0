//! Input Preparation
//!
//! Turns whatever the prediction service returned into the fixed-shape input
//! the synthesizer expects.
//!
//! Functions:
//! - Percentage sanitization
//! - Top category resolution
//! - Uniform fallback for malformed result sets

use crate::types::{
    Category, PredictionEntry, PredictionResult, TopSelection, CATEGORY_COUNT, MAX_PERCENT,
    MIN_PERCENT, UNIFORM_FALLBACK_PERCENT,
};

/// Fixed-order final percentages plus the resolved top category
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreparedPrediction {
    pub finals: [f64; CATEGORY_COUNT],
    pub top: TopSelection,
    /// True when the uniform distribution replaced the supplied entries
    pub used_fallback: bool,
}

impl PreparedPrediction {
    /// Entries in fixed category order, flagged according to `top`
    pub fn entries(&self) -> [PredictionEntry; CATEGORY_COUNT] {
        let top_index = self.top.index();
        Category::ALL.map(|category| {
            PredictionEntry::new(
                category,
                self.finals[category.index()],
                category.index() == top_index,
            )
        })
    }
}

/// 清理百分比，确保数值有效
pub fn sanitize_percentage(value: f64) -> f64 {
    if value.is_nan() || value.is_infinite() {
        UNIFORM_FALLBACK_PERCENT
    } else {
        value.clamp(MIN_PERCENT, MAX_PERCENT)
    }
}

/// First flagged entry wins; no flag at all is an explicit defaulted state
pub fn resolve_top(entries: &[PredictionEntry]) -> TopSelection {
    entries
        .iter()
        .find(|entry| entry.is_top)
        .map(|entry| TopSelection::Flagged(entry.category))
        .unwrap_or(TopSelection::Defaulted)
}

/// Like [`resolve_top`]. The result's named category only stands in when no
/// entries were supplied at all; an unflagged entry set always defaults to
/// the first category.
pub fn resolve_result_top(result: &PredictionResult) -> TopSelection {
    match resolve_top(&result.predictions) {
        TopSelection::Defaulted if result.has_no_entries() => result
            .predicted_category
            .map(TopSelection::Named)
            .unwrap_or(TopSelection::Defaulted),
        top => top,
    }
}

/// Place entries in fixed category order. `None` unless every category
/// appears exactly once.
pub fn order_entries(entries: &[PredictionEntry]) -> Option<[f64; CATEGORY_COUNT]> {
    if entries.len() != CATEGORY_COUNT {
        return None;
    }

    let mut slots: [Option<f64>; CATEGORY_COUNT] = [None; CATEGORY_COUNT];
    for entry in entries {
        let slot = &mut slots[entry.category.index()];
        if slot.is_some() {
            return None;
        }
        *slot = Some(sanitize_percentage(entry.percentage));
    }

    let mut finals = [0.0; CATEGORY_COUNT];
    for (final_value, slot) in finals.iter_mut().zip(slots) {
        *final_value = slot?;
    }
    Some(finals)
}

/// Prepare a bare entry list
pub fn prepare(entries: &[PredictionEntry]) -> PreparedPrediction {
    build(order_entries(entries), resolve_top(entries))
}

/// Prepare a full service result. Any entry rejected while parsing makes the
/// whole set malformed.
pub fn prepare_result(result: &PredictionResult) -> PreparedPrediction {
    let finals = if result.rejected_entries == 0 {
        order_entries(&result.predictions)
    } else {
        None
    };
    build(finals, resolve_result_top(result))
}

fn build(finals: Option<[f64; CATEGORY_COUNT]>, top: TopSelection) -> PreparedPrediction {
    match finals {
        Some(finals) => PreparedPrediction {
            finals,
            top,
            used_fallback: false,
        },
        None => PreparedPrediction {
            finals: [UNIFORM_FALLBACK_PERCENT; CATEGORY_COUNT],
            top,
            used_fallback: true,
        },
    }
}
