use super::model::{LongScoreRow, StudentRecord, Subject};

// ---------------------------------------------------------------------------
// Wide → long reshape
// ---------------------------------------------------------------------------

/// Melt the four score columns into one row per (record, subject).
///
/// Rows for a record are emitted contiguously in [`Subject::ALL`] order, so
/// the output is identical across runs for the same input.
pub fn melt(records: &[StudentRecord]) -> Vec<LongScoreRow> {
    let mut rows = Vec::with_capacity(records.len() * Subject::ALL.len());
    for (record_index, record) in records.iter().enumerate() {
        for subject in Subject::ALL {
            rows.push(LongScoreRow {
                record_index,
                demographics: record.demographics.clone(),
                subject,
                score: record.score(subject),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::demographics;

    #[test]
    fn each_record_yields_four_rows_in_label_order() {
        let records = vec![
            StudentRecord::new(demographics("female", "group B", "high school"), 72, 72, 74, 73)
                .unwrap(),
            StudentRecord::new(demographics("male", "group A", "some college"), 47, 57, 44, 49)
                .unwrap(),
        ];
        let rows = melt(&records);

        assert_eq!(rows.len(), 8);
        let labels: Vec<Subject> = rows[..4].iter().map(|r| r.subject).collect();
        assert_eq!(labels, Subject::ALL.to_vec());

        let scores: Vec<u8> = rows.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![72, 72, 74, 73, 47, 57, 44, 49]);

        assert!(rows[4..].iter().all(|r| r.record_index == 1));
        assert!(rows[4..].iter().all(|r| r.demographics == records[1].demographics));
    }

    #[test]
    fn melt_is_stable_across_runs() {
        let records = vec![
            StudentRecord::new(demographics("female", "group C", "master's degree"), 90, 95, 93, 93)
                .unwrap(),
        ];
        assert_eq!(melt(&records), melt(&records));
    }
}
