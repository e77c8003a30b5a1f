use super::filter::FilterRange;
use super::model::StudentRecord;
use crate::error::{DashboardError, Result};

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in percent (0–100). The rank is `p / 100 * (n - 1)` on the sorted
/// sample. Returns `None` for an empty sample.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }
    let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        Some(sorted[lower])
    } else {
        let frac = rank - lower as f64;
        Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
    }
}

/// Slider default: first and third quartile of the average score, floored.
pub fn default_range(records: &[StudentRecord]) -> Result<FilterRange> {
    let averages: Vec<f64> = records.iter().map(|r| r.average as f64).collect();
    let p25 = percentile(&averages, 25.0).ok_or(DashboardError::EmptyDataset)?;
    let p75 = percentile(&averages, 75.0).ok_or(DashboardError::EmptyDataset)?;
    // Both quartiles lie within the sample's [min, max] ⊆ [0, 100].
    FilterRange::new(p25.floor() as u8, p75.floor() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn percentile_empty() {
        assert_eq!(percentile(&[], 25.0), None);
    }

    #[test]
    fn percentile_single() {
        assert_eq!(percentile(&[42.0], 25.0), Some(42.0));
        assert_eq!(percentile(&[42.0], 75.0), Some(42.0));
    }

    #[test]
    fn percentile_interpolates() {
        // Sorted [40, 60, 80]: p25 → rank 0.5 → 50, p75 → rank 1.5 → 70
        let vals = [80.0, 40.0, 60.0];
        assert!((percentile(&vals, 25.0).unwrap() - 50.0).abs() < 1e-10);
        assert!((percentile(&vals, 75.0).unwrap() - 70.0).abs() < 1e-10);
    }

    #[test]
    fn percentile_extremes_are_min_max() {
        let vals = [3.0, 9.0, 1.0, 7.0];
        assert_eq!(percentile(&vals, 0.0), Some(1.0));
        assert_eq!(percentile(&vals, 100.0), Some(9.0));
    }

    #[test]
    fn default_range_three_records() {
        let records = vec![
            record("female", "group A", "high school", 40),
            record("female", "group A", "high school", 60),
            record("female", "group A", "high school", 80),
        ];
        let range = default_range(&records).unwrap();
        assert_eq!((range.low(), range.high()), (50, 70));
    }

    #[test]
    fn default_range_floors_fractional_quartiles() {
        // Sorted [50, 61, 70, 99]: rank 0.75 → 58.25, rank 2.25 → 77.25
        let records = vec![
            record("male", "group A", "high school", 70),
            record("male", "group A", "high school", 50),
            record("male", "group A", "high school", 99),
            record("male", "group A", "high school", 61),
        ];
        let range = default_range(&records).unwrap();
        assert_eq!((range.low(), range.high()), (58, 77));
    }

    #[test]
    fn default_range_empty_fails() {
        assert!(matches!(default_range(&[]), Err(DashboardError::EmptyDataset)));
    }
}
