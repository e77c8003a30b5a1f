use std::fmt;

use serde::Serialize;

use super::model::{LongScoreRow, MAX_SCORE};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// FilterRange – the slider value
// ---------------------------------------------------------------------------

/// Inclusive score range `low..=high` within `0..=100`.
///
/// Fields are private so a constructed range always satisfies
/// `low <= high <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FilterRange {
    low: u8,
    high: u8,
}

impl FilterRange {
    pub fn new(low: u8, high: u8) -> Result<Self> {
        if low > high {
            return Err(DashboardError::InvalidRange { low, high });
        }
        if high > MAX_SCORE {
            return Err(DashboardError::format(format!(
                "range bound {high} is outside 0..=100"
            )));
        }
        Ok(FilterRange { low, high })
    }

    /// The whole score domain, `0..=100`.
    pub fn full() -> Self {
        FilterRange {
            low: 0,
            high: MAX_SCORE,
        }
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, score: u8) -> bool {
        self.low <= score && score <= self.high
    }
}

impl Default for FilterRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for FilterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the long rows whose score lies within `range`, in input order.
pub fn filter_rows<'a>(
    rows: &'a [LongScoreRow],
    range: &FilterRange,
) -> Result<Vec<&'a LongScoreRow>> {
    // Re-checked here for ranges built inside the crate without `new`.
    if range.low > range.high {
        return Err(DashboardError::InvalidRange {
            low: range.low,
            high: range.high,
        });
    }
    Ok(rows.iter().filter(|r| range.contains(r.score)).collect())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::tests::demographics;
    use crate::data::model::{LongScoreRow, Subject};

    fn rows_with_scores(scores: &[u8]) -> Vec<LongScoreRow> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| LongScoreRow {
                record_index: i / 4,
                demographics: demographics("female", "group A", "high school"),
                subject: Subject::ALL[i % 4],
                score,
            })
            .collect()
    }

    #[test]
    fn new_rejects_inverted_range() {
        assert!(matches!(
            FilterRange::new(70, 50),
            Err(DashboardError::InvalidRange { low: 70, high: 50 })
        ));
    }

    #[test]
    fn new_rejects_bound_above_100() {
        assert!(FilterRange::new(0, 101).is_err());
    }

    #[test]
    fn filter_rows_rejects_inverted_range() {
        let inverted = FilterRange { low: 60, high: 40 };
        assert!(matches!(
            filter_rows(&[], &inverted),
            Err(DashboardError::InvalidRange { .. })
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        let rows = rows_with_scores(&[49, 50, 51, 69, 70, 71]);
        let range = FilterRange::new(50, 70).unwrap();
        let kept: Vec<u8> = filter_rows(&rows, &range)
            .unwrap()
            .iter()
            .map(|r| r.score)
            .collect();
        assert_eq!(kept, vec![50, 51, 69, 70]);
    }

    #[test]
    fn full_range_keeps_everything() {
        let rows = rows_with_scores(&[0, 13, 57, 100]);
        assert_eq!(filter_rows(&rows, &FilterRange::full()).unwrap().len(), 4);
    }

    #[test]
    fn degenerate_range_keeps_exact_score() {
        let rows = rows_with_scores(&[64, 65, 65, 66, 65]);
        let range = FilterRange::new(65, 65).unwrap();
        let kept = filter_rows(&rows, &range).unwrap();
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.score == 65));
    }

    #[test]
    fn display_matches_caption_format() {
        assert_eq!(FilterRange::new(50, 70).unwrap().to_string(), "(50, 70)");
    }

    proptest! {
        #[test]
        fn filtered_and_excluded_partition_by_range(
            scores in prop::collection::vec(0u8..=100, 0..64),
            a in 0u8..=100,
            b in 0u8..=100,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let range = FilterRange::new(low, high).unwrap();
            let rows = rows_with_scores(&scores);
            let kept = filter_rows(&rows, &range).unwrap();

            prop_assert!(kept.iter().all(|r| low <= r.score && r.score <= high));
            let excluded = scores.iter().filter(|&&s| s < low || s > high).count();
            prop_assert_eq!(kept.len() + excluded, rows.len());
        }
    }
}
