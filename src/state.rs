use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::color::ColorMap;
use crate::data::filter::FilterRange;
use crate::data::loader::load_file;
use crate::data::model::{Attribute, StudentDataset};
use crate::data::view::{CountMode, ProjectedView, filter_and_project_with};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<StudentDataset>,

    /// Current slider value, passed explicitly to the pipeline.
    pub range: FilterRange,

    /// How the pie charts count students.
    pub count_mode: CountMode,

    /// Output of the last successful pipeline run.
    pub view: Option<ProjectedView>,

    /// One colour map per breakdown, built from the full dataset so colours
    /// do not shift as the range changes.
    pub color_maps: HashMap<Attribute, ColorMap>,

    /// Status / error message shown in place of the charts.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the range to its quartiles and
    /// recompute the view.
    pub fn set_dataset(&mut self, dataset: StudentDataset) {
        self.range = dataset.default_range;
        self.color_maps = Attribute::ALL
            .iter()
            .map(|&attr| {
                let mut categories: Vec<&str> = dataset
                    .records
                    .iter()
                    .map(|r| attr.value(&r.demographics))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                categories.sort_by(|a, b| attr.compare(a, b));
                (attr, ColorMap::new(categories.into_iter()))
            })
            .collect();

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Load a dataset from disk; on failure keep the previous dataset and
    /// show the error.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} student records from {} (default range {})",
                    dataset.len(),
                    path.display(),
                    dataset.default_range
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
            }
        }
    }

    /// Apply a new slider value.  An inverted range clears the charts and
    /// shows the error instead.
    pub fn set_range(&mut self, low: u8, high: u8) {
        match FilterRange::new(low, high) {
            Ok(range) => {
                if range != self.range {
                    log::debug!("score range changed to {range}");
                }
                self.range = range;
                self.refresh();
            }
            Err(e) => {
                log::error!("rejected score range: {e}");
                self.view = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_count_mode(&mut self, mode: CountMode) {
        self.count_mode = mode;
        self.refresh();
    }

    /// Re-run the whole filter → project pipeline for the current inputs.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            return;
        };
        match filter_and_project_with(&ds.long_rows, &self.range, self.count_mode) {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("render pass failed: {e}");
                self.view = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Colour map for a breakdown; `None` until a dataset is loaded.
    pub fn color_map(&self, attribute: Attribute) -> Option<&ColorMap> {
        self.color_maps.get(&attribute)
    }
}
