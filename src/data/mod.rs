/// Data layer: core types, loading, reshaping and the range pipeline.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<StudentRecord>
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ StudentDataset │  records, long rows (reshape), default range (stats)
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive score range → filtered long rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  histogram series + three category breakdowns
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
pub mod stats;
pub mod view;
