//! Ranked bars: one row per scored category, in the order the service ranked
//! them, with the best match highlighted.

use serde::Serialize;

use crate::sanitize::{resolve_result_top, sanitize_percentage};
use crate::types::{Category, PredictionResult, MAX_PERCENT};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedBar {
    pub rank: usize,
    pub category: Category,
    pub label: &'static str,
    pub percentage: f64,
    /// Bar fill in [0, 1]
    pub fill: f64,
    pub best_match: bool,
}

pub fn ranked_bars(result: &PredictionResult) -> Vec<RankedBar> {
    let top = resolve_result_top(result);

    result
        .predictions
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let percentage = sanitize_percentage(entry.percentage);
            RankedBar {
                rank: i + 1,
                category: entry.category,
                label: entry.category.label(),
                percentage,
                fill: percentage / MAX_PERCENT,
                best_match: !top.is_defaulted() && entry.category == top.category(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PredictionEntry;

    #[test]
    fn test_bars_keep_service_order() {
        let result = PredictionResult::new(
            Some(Category::Auditory),
            vec![
                PredictionEntry::new(Category::Auditory, 55.0, true),
                PredictionEntry::new(Category::Visual, 25.0, false),
                PredictionEntry::new(Category::ReadingWriting, 15.0, false),
                PredictionEntry::new(Category::Kinesthetic, 5.0, false),
            ],
        );
        let bars = ranked_bars(&result);
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].category, Category::Auditory);
        assert_eq!(bars[0].rank, 1);
        assert!(bars[0].best_match);
        assert!(bars[1..].iter().all(|b| !b.best_match));
        assert_eq!(bars[0].fill, 0.55);
    }

    #[test]
    fn test_unflagged_bars_have_no_best_match() {
        let result = PredictionResult::new(
            Some(Category::Visual),
            vec![
                PredictionEntry::new(Category::Visual, 40.0, false),
                PredictionEntry::new(Category::Auditory, 30.0, false),
            ],
        );
        assert!(ranked_bars(&result).iter().all(|b| !b.best_match));
    }

    #[test]
    fn test_bars_clamp_fill() {
        let result =
            PredictionResult::new(None, vec![PredictionEntry::new(Category::Visual, 130.0, false)]);
        let bars = ranked_bars(&result);
        assert_eq!(bars[0].fill, 1.0);
        assert!(!bars[0].best_match);
    }
}
