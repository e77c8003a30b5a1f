use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Attribute, MAX_SCORE};
use crate::data::view::{CountMode, ProjectedView};
use crate::state::AppState;
use crate::ui::{pie, plot};

const PAGE_TITLE: &str = "High School Student Test Performance With Correlated Demographic Data";
const ATTRIBUTION: &str = "Dataset provided by http://roycekimmons.com/tools/generated_data/exams";

const HISTOGRAM_HEIGHT: f32 = 300.0;
const PIE_SIZE: f32 = 220.0;

// ---------------------------------------------------------------------------
// Left side panel – range control
// ---------------------------------------------------------------------------

/// Render the score range control and count-mode switch.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Score range");
    ui.separator();

    let Some(default_range) = state.dataset.as_ref().map(|ds| ds.default_range) else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label("Select a range of test score values");

    let mut low = state.range.low();
    let mut high = state.range.high();
    let low_changed = ui
        .add(egui::Slider::new(&mut low, 0..=MAX_SCORE).step_by(1.0).text("low"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, 0..=MAX_SCORE).step_by(1.0).text("high"))
        .changed();

    // Keep the pair ordered: the handle being dragged pushes the other one.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_range(low, high);
    }

    if ui
        .button(format!("Reset to quartiles {default_range}"))
        .clicked()
    {
        state.set_range(default_range.low(), default_range.high());
    }

    ui.add_space(8.0);
    ui.strong("Count pie charts by");
    let mut mode = state.count_mode;
    ui.radio_value(&mut mode, CountMode::Students, "Students");
    ui.radio_value(&mut mode, CountMode::ScoreRows, "Score rows");
    if mode != state.count_mode {
        state.set_count_mode(mode);
    }

    if let Some(ds) = &state.dataset {
        ui.separator();
        ui.label(format!("{} students", ds.len()));
        if let Some(view) = &state.view {
            ui.label(format!("{} scores in range", view.histogram.rows.len()));
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel – histogram and the three pies
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(PAGE_TITLE);
    ui.label(ATTRIBUTION);
    ui.separator();

    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {
                ui.heading("Open a student dataset to begin  (File → Open…)");
            }
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            plot::score_histogram(ui, &view.histogram, HISTOGRAM_HEIGHT);
            ui.separator();
            ui.columns(Attribute::ALL.len(), |columns| {
                for (col, counts) in columns.iter_mut().zip(view.categories()) {
                    pie::category_pie(col, counts, state.color_map(counts.attribute), PIE_SIZE);
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.view.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export view…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} students loaded, range {}",
                ds.len(),
                state.range
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open student performance data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .set_file_name("student_view.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export_view(view, &path) {
            Ok(()) => log::info!("Exported view for range {} to {}", view.range, path.display()),
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write the view as pretty JSON.
pub fn export_view(view: &ProjectedView, path: &Path) -> Result<()> {
    let json = view.to_json().context("serializing view")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterRange;
    use crate::data::model::StudentDataset;
    use crate::data::model::tests::record;
    use crate::data::view::filter_and_project;

    #[test]
    fn export_writes_json() {
        let ds = StudentDataset::from_records(vec![
            record("female", "group A", "high school", 55),
            record("male", "group B", "some college", 65),
        ])
        .unwrap();
        let view = filter_and_project(&ds.long_rows, &FilterRange::new(50, 70).unwrap()).unwrap();

        let path = std::env::temp_dir().join(format!(
            "student-dashboard-export-{}.json",
            std::process::id()
        ));
        export_view(&view, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(written, view.to_json().unwrap());
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["range"]["low"], 50);
        assert_eq!(parsed["gender"]["caption"], "Gender in Score Range (50, 70)");
    }
}
