use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use student_dashboard::data::model::{
    COL_AVERAGE, COL_ETHNICITY, COL_GENDER, COL_LUNCH, COL_MATH, COL_PARENTAL_EDUCATION,
    COL_READING, COL_TEST_PREPARATION, COL_WRITING, PARENTAL_EDUCATION_LEVELS,
};

const N_STUDENTS: usize = 1000;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn clamp_score(v: f64) -> i64 {
    v.round().clamp(0.0, 100.0) as i64
}

/// One synthetic student in wide format.
struct Row {
    gender: &'static str,
    ethnicity: &'static str,
    education: &'static str,
    lunch: &'static str,
    prep: &'static str,
    math: i64,
    reading: i64,
    writing: i64,
    average: i64,
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    let genders = ["female", "male"];
    let ethnicities = ["group A", "group B", "group C", "group D", "group E"];
    let lunches = ["standard", "free/reduced"];
    let preps = ["none", "completed"];

    (0..n)
        .map(|_| {
            let gender = rng.pick(&genders);
            let ethnicity = rng.pick(&ethnicities);
            let education = rng.pick(&PARENTAL_EDUCATION_LEVELS);
            let lunch = rng.pick(&lunches);
            let prep = rng.pick(&preps);

            let mut ability = rng.gauss(66.0, 13.0);
            if lunch == "standard" {
                ability += 4.0;
            }
            if prep == "completed" {
                ability += 5.0;
            }
            let verbal_bias = if gender == "female" { 4.0 } else { -4.0 };

            let math = clamp_score(rng.gauss(ability - verbal_bias, 6.0));
            let reading = clamp_score(rng.gauss(ability + verbal_bias, 6.0));
            let writing = clamp_score(rng.gauss(ability + verbal_bias, 6.0));
            let average = ((math + reading + writing) as f64 / 3.0).round() as i64;

            Row {
                gender,
                ethnicity,
                education,
                lunch,
                prep,
                math,
                reading,
                writing,
                average,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        COL_GENDER,
        COL_ETHNICITY,
        COL_PARENTAL_EDUCATION,
        COL_LUNCH,
        COL_TEST_PREPARATION,
        COL_MATH,
        COL_READING,
        COL_WRITING,
        COL_AVERAGE,
    ])?;
    for r in rows {
        writer.write_record([
            r.gender.to_string(),
            r.ethnicity.to_string(),
            r.education.to_string(),
            r.lunch.to_string(),
            r.prep.to_string(),
            r.math.to_string(),
            r.reading.to_string(),
            r.writing.to_string(),
            r.average.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text = |f: fn(&Row) -> &'static str| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let ints = |f: fn(&Row) -> i64| Int64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_GENDER, DataType::Utf8, false),
        Field::new(COL_ETHNICITY, DataType::Utf8, false),
        Field::new(COL_PARENTAL_EDUCATION, DataType::Utf8, false),
        Field::new(COL_LUNCH, DataType::Utf8, false),
        Field::new(COL_TEST_PREPARATION, DataType::Utf8, false),
        Field::new(COL_MATH, DataType::Int64, false),
        Field::new(COL_READING, DataType::Int64, false),
        Field::new(COL_WRITING, DataType::Int64, false),
        Field::new(COL_AVERAGE, DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|r| r.gender)),
            Arc::new(text(|r| r.ethnicity)),
            Arc::new(text(|r| r.education)),
            Arc::new(text(|r| r.lunch)),
            Arc::new(text(|r| r.prep)),
            Arc::new(ints(|r| r.math)),
            Arc::new(ints(|r| r.reading)),
            Arc::new(ints(|r| r.writing)),
            Arc::new(ints(|r| r.average)),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, N_STUDENTS);

    let csv_path = "StudentsPerformance.csv";
    let parquet_path = "StudentsPerformance.parquet";
    write_csv(&rows, csv_path)?;
    write_parquet(&rows, parquet_path)?;

    println!("Wrote {} students to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
