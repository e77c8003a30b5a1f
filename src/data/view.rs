use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::filter::{FilterRange, filter_rows};
use super::model::{Attribute, LongScoreRow, Subject};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Presentation datasets handed to the renderer
// ---------------------------------------------------------------------------

/// How the categorical breakdowns count the filtered population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CountMode {
    /// Each student counted once if any of their scores is in range.
    #[default]
    Students,
    /// Each in-range score row counted, so one student may count up to four times.
    ScoreRows,
}

/// Count per distinct score for one subject, ascending by score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectSeries {
    pub subject: Subject,
    pub counts: Vec<(u8, usize)>,
}

impl SubjectSeries {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramDataset {
    /// The filtered long rows, in load order.
    pub rows: Vec<LongScoreRow>,
    /// One series per subject, in [`Subject::ALL`] order.
    pub series: Vec<SubjectSeries>,
}

impl HistogramDataset {
    fn from_rows(rows: Vec<LongScoreRow>) -> Self {
        let mut per_subject: BTreeMap<Subject, BTreeMap<u8, usize>> = BTreeMap::new();
        for row in &rows {
            *per_subject
                .entry(row.subject)
                .or_default()
                .entry(row.score)
                .or_default() += 1;
        }
        let series = Subject::ALL
            .iter()
            .map(|&subject| SubjectSeries {
                subject,
                counts: per_subject
                    .remove(&subject)
                    .map(|m| m.into_iter().collect())
                    .unwrap_or_default(),
            })
            .collect();
        HistogramDataset { rows, series }
    }

    /// Total number of rows across all subjects.
    pub fn total(&self) -> usize {
        self.series.iter().map(SubjectSeries::total).sum()
    }
}

/// `(category, count)` pairs for one attribute, in the attribute's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub attribute: Attribute,
    pub caption: String,
    pub counts: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Everything the renderer needs for one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedView {
    pub range: FilterRange,
    pub count_mode: CountMode,
    pub histogram: HistogramDataset,
    pub ethnicity: CategoryCounts,
    pub parental_education: CategoryCounts,
    pub gender: CategoryCounts,
}

impl ProjectedView {
    /// The three breakdowns in display order.
    pub fn categories(&self) -> [&CategoryCounts; 3] {
        [&self.ethnicity, &self.parental_education, &self.gender]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter the long rows by `range` and derive the histogram and the three
/// categorical breakdowns, counting each student once.
pub fn filter_and_project(rows: &[LongScoreRow], range: &FilterRange) -> Result<ProjectedView> {
    filter_and_project_with(rows, range, CountMode::default())
}

pub fn filter_and_project_with(
    rows: &[LongScoreRow],
    range: &FilterRange,
    mode: CountMode,
) -> Result<ProjectedView> {
    let filtered = filter_rows(rows, range)?;

    let ethnicity = category_counts(&filtered, Attribute::Ethnicity, mode, range);
    let parental_education = category_counts(&filtered, Attribute::ParentalEducation, mode, range);
    let gender = category_counts(&filtered, Attribute::Gender, mode, range);
    let histogram = HistogramDataset::from_rows(filtered.into_iter().cloned().collect());

    Ok(ProjectedView {
        range: *range,
        count_mode: mode,
        histogram,
        ethnicity,
        parental_education,
        gender,
    })
}

/// Tally the values of `attribute` over already-filtered rows.
pub fn category_counts(
    filtered: &[&LongScoreRow],
    attribute: Attribute,
    mode: CountMode,
    range: &FilterRange,
) -> CategoryCounts {
    let mut seen: HashSet<usize> = HashSet::new();
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for row in filtered {
        if mode == CountMode::Students && !seen.insert(row.record_index) {
            continue;
        }
        *tally.entry(attribute.value(&row.demographics)).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = tally
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect();
    counts.sort_by(|a, b| attribute.compare(&a.0, &b.0));

    CategoryCounts {
        attribute,
        caption: caption(attribute, range),
        counts,
    }
}

/// Chart caption, e.g. `Gender in Score Range (50, 70)`.
pub fn caption(attribute: Attribute, range: &FilterRange) -> String {
    format!("{} in Score Range {range}", attribute.title())
}
