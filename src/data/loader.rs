use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{
    COL_AVERAGE, COL_ETHNICITY, COL_GENDER, COL_LUNCH, COL_MATH, COL_PARENTAL_EDUCATION,
    COL_READING, COL_TEST_PREPARATION, COL_WRITING, Demographics, MAX_SCORE, StudentDataset,
    StudentRecord,
};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a student dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the exact column names (recommended)
/// * `.parquet` – same column names; text columns as strings, scores as
///   integers (or integral floats)
pub fn load_file(path: &Path) -> Result<StudentDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => read_csv(File::open(path)?)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(DashboardError::format(format!(
                "Unsupported file extension: .{other}"
            )));
        }
    };
    log::debug!(
        "{}: {} records, {} long rows",
        path.display(),
        dataset.len(),
        dataset.long_rows.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Positions of the nine required columns in the source header.
struct ColumnIndex {
    gender: usize,
    ethnicity: usize,
    parental_education: usize,
    lunch: usize,
    test_preparation: usize,
    math: usize,
    reading: usize,
    writing: usize,
    average: usize,
}

impl ColumnIndex {
    /// Locate every required column; reports all missing names at once.
    fn locate<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let mut missing = Vec::new();
        let mut find = |name: &'static str| {
            headers.iter().position(|h| *h == name).unwrap_or_else(|| {
                missing.push(name);
                usize::MAX
            })
        };

        let index = ColumnIndex {
            gender: find(COL_GENDER),
            ethnicity: find(COL_ETHNICITY),
            parental_education: find(COL_PARENTAL_EDUCATION),
            lunch: find(COL_LUNCH),
            test_preparation: find(COL_TEST_PREPARATION),
            math: find(COL_MATH),
            reading: find(COL_READING),
            writing: find(COL_WRITING),
            average: find(COL_AVERAGE),
        };

        if !missing.is_empty() {
            return Err(DashboardError::format(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }
        Ok(index)
    }
}

// ---------------------------------------------------------------------------
// Score validation shared by both loaders
// ---------------------------------------------------------------------------

fn score_from_i64(value: i64, row: usize, col: &str) -> Result<u8> {
    if !(0..=MAX_SCORE as i64).contains(&value) {
        return Err(DashboardError::format(format!(
            "row {row}, {col}: {value} is outside 0..=100"
        )));
    }
    Ok(value as u8)
}

fn score_from_f64(value: f64, row: usize, col: &str) -> Result<u8> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(DashboardError::format(format!(
            "row {row}, {col}: {value} is not an integer"
        )));
    }
    score_from_i64(value as i64, row, col)
}

fn score_from_text(text: &str, row: usize, col: &str) -> Result<u8> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return score_from_i64(v, row, col);
    }
    match text.parse::<f64>() {
        Ok(v) => score_from_f64(v, row, col),
        Err(_) => Err(DashboardError::format(format!(
            "row {row}, {col}: '{text}' is not an integer"
        ))),
    }
}

fn build_record(row: usize, demographics: Demographics, scores: [u8; 4]) -> Result<StudentRecord> {
    let [math, reading, writing, average] = scores;
    StudentRecord::new(demographics, math, reading, writing, average).map_err(|e| match e {
        DashboardError::DataFormat(msg) => DashboardError::DataFormat(format!("row {row}: {msg}")),
        other => other,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a CSV stream with the student schema.
/// Extra columns are ignored and column order is free.
pub fn read_csv<R: Read>(source: R) -> Result<StudentDataset> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = ColumnIndex::locate(reader.headers()?.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let demographics = Demographics {
            gender: field(columns.gender).to_string(),
            ethnicity: field(columns.ethnicity).to_string(),
            parental_education: field(columns.parental_education).to_string(),
            lunch: field(columns.lunch).to_string(),
            test_preparation: field(columns.test_preparation).to_string(),
        };
        let scores = [
            score_from_text(field(columns.math), row_no, COL_MATH)?,
            score_from_text(field(columns.reading), row_no, COL_READING)?,
            score_from_text(field(columns.writing), row_no, COL_WRITING)?,
            score_from_text(field(columns.average), row_no, COL_AVERAGE)?,
        ];
        records.push(build_record(row_no, demographics, scores)?);
    }

    StudentDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the student schema.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), including
/// categorical (dictionary-encoded) text columns.
fn load_parquet(path: &Path) -> Result<StudentDataset> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let columns = ColumnIndex::locate(field_names(&schema))?;
        let offset = records.len();

        let text = |idx: usize, name: &str| text_column(batch.column(idx), name, offset);
        let score = |idx: usize, name: &str| score_column(batch.column(idx), name, offset);

        let gender = text(columns.gender, COL_GENDER)?;
        let ethnicity = text(columns.ethnicity, COL_ETHNICITY)?;
        let parental_education = text(columns.parental_education, COL_PARENTAL_EDUCATION)?;
        let lunch = text(columns.lunch, COL_LUNCH)?;
        let test_preparation = text(columns.test_preparation, COL_TEST_PREPARATION)?;
        let math = score(columns.math, COL_MATH)?;
        let reading = score(columns.reading, COL_READING)?;
        let writing = score(columns.writing, COL_WRITING)?;
        let average = score(columns.average, COL_AVERAGE)?;

        for i in 0..batch.num_rows() {
            let demographics = Demographics {
                gender: gender[i].clone(),
                ethnicity: ethnicity[i].clone(),
                parental_education: parental_education[i].clone(),
                lunch: lunch[i].clone(),
                test_preparation: test_preparation[i].clone(),
            };
            let scores = [math[i], reading[i], writing[i], average[i]];
            records.push(build_record(offset + i, demographics, scores)?);
        }
    }

    StudentDataset::from_records(records)
}

// -- Parquet / Arrow helpers --

fn field_names(schema: &Schema) -> Vec<&str> {
    schema.fields().iter().map(|f| f.name().as_str()).collect()
}

/// Read a whole text column; nulls are rejected.
fn text_column(col: &ArrayRef, name: &str, offset: usize) -> Result<Vec<String>> {
    let utf8 = match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Dictionary(_, _) => {
            cast(col, &DataType::Utf8)?
        }
        other => {
            return Err(DashboardError::format(format!(
                "column '{name}' has type {other:?}, expected text"
            )));
        }
    };
    let strings = utf8.as_string::<i32>();
    (0..strings.len())
        .map(|i| {
            if strings.is_null(i) {
                Err(DashboardError::format(format!(
                    "row {}, {name}: missing value",
                    offset + i
                )))
            } else {
                Ok(strings.value(i).trim().to_string())
            }
        })
        .collect()
}

/// Read a whole score column; accepts any integer type or integral floats.
fn score_column(col: &ArrayRef, name: &str, offset: usize) -> Result<Vec<u8>> {
    let floats = match col.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => cast(col, &DataType::Float64)?,
        other => {
            return Err(DashboardError::format(format!(
                "column '{name}' has type {other:?}, expected integer scores"
            )));
        }
    };
    let values = floats.as_primitive::<Float64Type>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                Err(DashboardError::format(format!(
                    "row {}, {name}: missing value",
                    offset + i
                )))
            } else {
                score_from_f64(values.value(i), offset + i, name)
            }
        })
        .collect()
}
