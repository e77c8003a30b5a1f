use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::filter::FilterRange;
use super::{reshape, stats};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Column names – part of the input contract
// ---------------------------------------------------------------------------

pub const COL_GENDER: &str = "Gender";
pub const COL_ETHNICITY: &str = "Ethnicity";
pub const COL_PARENTAL_EDUCATION: &str = "Parental Level of Education";
pub const COL_LUNCH: &str = "Lunch";
pub const COL_TEST_PREPARATION: &str = "Test preparation course";
pub const COL_MATH: &str = "Math Score";
pub const COL_READING: &str = "Reading Score";
pub const COL_WRITING: &str = "Writing Score";
pub const COL_AVERAGE: &str = "Average Score";

/// Highest score any subject can carry.
pub const MAX_SCORE: u8 = 100;

/// Natural ordering of the parental education levels found in the dataset.
pub const PARENTAL_EDUCATION_LEVELS: [&str; 6] = [
    "some high school",
    "high school",
    "some college",
    "associate's degree",
    "bachelor's degree",
    "master's degree",
];

// ---------------------------------------------------------------------------
// Subject – the label column of the long format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Subject {
    Math,
    Reading,
    Writing,
    Average,
}

impl Subject {
    /// Emission order used by the reshape; keeps snapshots stable.
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::Reading,
        Subject::Writing,
        Subject::Average,
    ];

    /// Name of the wide-format column holding this subject's score.
    pub fn column(self) -> &'static str {
        match self {
            Subject::Math => COL_MATH,
            Subject::Reading => COL_READING,
            Subject::Writing => COL_WRITING,
            Subject::Average => COL_AVERAGE,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the wide-format dataset
// ---------------------------------------------------------------------------

/// The non-score columns of a record, copied verbatim into every long row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Demographics {
    pub gender: String,
    pub ethnicity: String,
    pub parental_education: String,
    pub lunch: String,
    pub test_preparation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub demographics: Demographics,
    pub math: u8,
    pub reading: u8,
    pub writing: u8,
    pub average: u8,
}

impl StudentRecord {
    /// Build a record, rejecting blank category values, scores above 100 and
    /// averages that are not the rounded mean of the three subject scores.
    pub fn new(
        demographics: Demographics,
        math: u8,
        reading: u8,
        writing: u8,
        average: u8,
    ) -> Result<Self> {
        for (column, value) in [
            (COL_GENDER, &demographics.gender),
            (COL_ETHNICITY, &demographics.ethnicity),
            (COL_PARENTAL_EDUCATION, &demographics.parental_education),
            (COL_LUNCH, &demographics.lunch),
            (COL_TEST_PREPARATION, &demographics.test_preparation),
        ] {
            if value.trim().is_empty() {
                return Err(DashboardError::format(format!("{column} is empty")));
            }
        }
        for (subject, score) in [
            (Subject::Math, math),
            (Subject::Reading, reading),
            (Subject::Writing, writing),
            (Subject::Average, average),
        ] {
            if score > MAX_SCORE {
                return Err(DashboardError::format(format!(
                    "{subject} {score} is outside 0..=100"
                )));
            }
        }
        if !average_is_consistent(math, reading, writing, average) {
            return Err(DashboardError::format(format!(
                "{COL_AVERAGE} {average} does not match scores ({math}, {reading}, {writing})"
            )));
        }
        Ok(StudentRecord {
            demographics,
            math,
            reading,
            writing,
            average,
        })
    }

    pub fn score(&self, subject: Subject) -> u8 {
        match subject {
            Subject::Math => self.math,
            Subject::Reading => self.reading,
            Subject::Writing => self.writing,
            Subject::Average => self.average,
        }
    }
}

/// Mean of the three subject scores rounded to the nearest integer.
///
/// A sum of three integers leaves a remainder of 0, 1 or 2 thirds, so there
/// is never a tie to break.
pub fn rounded_average(math: u8, reading: u8, writing: u8) -> u8 {
    let sum = math as u16 + reading as u16 + writing as u16;
    ((sum + 1) / 3) as u8
}

pub fn average_is_consistent(math: u8, reading: u8, writing: u8, average: u8) -> bool {
    rounded_average(math, reading, writing) == average
}

// ---------------------------------------------------------------------------
// LongScoreRow – one (record, subject) pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongScoreRow {
    /// Index of the source record in [`StudentDataset::records`].
    pub record_index: usize,
    pub demographics: Demographics,
    pub subject: Subject,
    pub score: u8,
}

// ---------------------------------------------------------------------------
// Attribute – selector for the categorical breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    Ethnicity,
    ParentalEducation,
    Gender,
}

impl Attribute {
    /// Display order of the three breakdowns.
    pub const ALL: [Attribute; 3] = [
        Attribute::Ethnicity,
        Attribute::ParentalEducation,
        Attribute::Gender,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Attribute::Ethnicity => COL_ETHNICITY,
            Attribute::ParentalEducation => COL_PARENTAL_EDUCATION,
            Attribute::Gender => COL_GENDER,
        }
    }

    pub fn value(self, demographics: &Demographics) -> &str {
        match self {
            Attribute::Ethnicity => &demographics.ethnicity,
            Attribute::ParentalEducation => &demographics.parental_education,
            Attribute::Gender => &demographics.gender,
        }
    }

    /// Category ordering: level order for parental education (unknown
    /// levels last), plain lexicographic otherwise.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Attribute::ParentalEducation => {
                let rank = |v: &str| {
                    PARENTAL_EDUCATION_LEVELS
                        .iter()
                        .position(|level| *level == v)
                        .unwrap_or(PARENTAL_EDUCATION_LEVELS.len())
                };
                rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
            }
            Attribute::Ethnicity | Attribute::Gender => a.cmp(b),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

// ---------------------------------------------------------------------------
// StudentDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Records, their long-format view and the default slider range.
/// Built once per load and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct StudentDataset {
    pub records: Vec<StudentRecord>,
    pub long_rows: Vec<LongScoreRow>,
    pub default_range: FilterRange,
}

impl StudentDataset {
    /// Reshape the records and compute the default range.
    pub fn from_records(records: Vec<StudentRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }
        let default_range = stats::default_range(&records)?;
        let long_rows = reshape::melt(&records);
        Ok(StudentDataset {
            records,
            long_rows,
            default_range,
        })
    }

    /// Number of student records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn demographics(gender: &str, ethnicity: &str, education: &str) -> Demographics {
        Demographics {
            gender: gender.to_string(),
            ethnicity: ethnicity.to_string(),
            parental_education: education.to_string(),
            lunch: "standard".to_string(),
            test_preparation: "none".to_string(),
        }
    }

    /// Record whose three subject scores all equal `average`.
    pub(crate) fn record(
        gender: &str,
        ethnicity: &str,
        education: &str,
        average: u8,
    ) -> StudentRecord {
        StudentRecord::new(
            demographics(gender, ethnicity, education),
            average,
            average,
            average,
            average,
        )
        .unwrap()
    }

    #[test]
    fn average_must_be_rounded_mean() {
        // 70 + 71 + 71 = 212, mean 70.67 → 71
        assert!(average_is_consistent(70, 71, 71, 71));
        assert!(!average_is_consistent(70, 71, 71, 70));
        assert!(!average_is_consistent(70, 71, 71, 72));
        // 70 + 70 + 71 = 211, mean 70.33 → 70
        assert!(average_is_consistent(70, 70, 71, 70));
        assert!(!average_is_consistent(70, 70, 71, 71));
        assert!(average_is_consistent(0, 0, 0, 0));
        assert!(average_is_consistent(100, 100, 100, 100));
    }

    #[test]
    fn record_rejects_ceiling_of_lower_third() {
        let demo = demographics("female", "group A", "high school");
        let err = StudentRecord::new(demo.clone(), 70, 70, 71, 71).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
        assert_eq!(StudentRecord::new(demo, 70, 70, 71, 70).unwrap().average, 70);
    }

    #[test]
    fn record_rejects_out_of_range_score() {
        let demo = demographics("female", "group A", "high school");
        let err = StudentRecord::new(demo, 101, 90, 90, 94).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
    }

    #[test]
    fn record_rejects_blank_category() {
        let demo = demographics("female", "", "high school");
        let err = StudentRecord::new(demo, 60, 60, 60, 60).unwrap_err();
        match err {
            DashboardError::DataFormat(msg) => assert!(msg.contains("Ethnicity")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn record_rejects_inconsistent_average() {
        let demo = demographics("male", "group B", "high school");
        let err = StudentRecord::new(demo, 50, 60, 70, 80).unwrap_err();
        assert!(matches!(err, DashboardError::DataFormat(_)));
    }

    #[test]
    fn parental_education_sorts_by_level() {
        let mut levels = vec![
            "master's degree",
            "unknown",
            "high school",
            "associate's degree",
            "some high school",
        ];
        levels.sort_by(|a, b| Attribute::ParentalEducation.compare(a, b));
        assert_eq!(
            levels,
            vec![
                "some high school",
                "high school",
                "associate's degree",
                "master's degree",
                "unknown",
            ]
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            StudentDataset::from_records(Vec::new()),
            Err(DashboardError::EmptyDataset)
        ));
    }

    #[test]
    fn dataset_bundles_long_rows_and_default_range() {
        let ds = StudentDataset::from_records(vec![
            record("female", "group A", "high school", 40),
            record("male", "group B", "some college", 60),
            record("female", "group C", "master's degree", 80),
        ])
        .unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.long_rows.len(), 12);
        assert_eq!((ds.default_range.low(), ds.default_range.high()), (50, 70));
    }
}
