use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy shared by the loader and the view pipeline
// ---------------------------------------------------------------------------

/// Every failure that aborts a load or a render pass.
///
/// The UI never retries: it shows the message in place of the charts and
/// waits for the next user action.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Missing columns, non-integer or out-of-range scores, inconsistent averages.
    #[error("data format error: {0}")]
    DataFormat(String),

    #[error("dataset contains no student records")]
    EmptyDataset,

    #[error("invalid score range: low {low} is greater than high {high}")]
    InvalidRange { low: u8, high: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DashboardError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        DashboardError::DataFormat(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
