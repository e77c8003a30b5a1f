//! Student performance dashboard: loads exam scores, reshapes them into a
//! long format and derives the histogram and demographic breakdowns for an
//! inclusive score range.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::{DashboardError, Result};
