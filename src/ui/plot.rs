use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::subject_color;
use crate::data::model::Subject;
use crate::data::view::HistogramDataset;

// ---------------------------------------------------------------------------
// Score histogram (top of the central panel)
// ---------------------------------------------------------------------------

/// Width of one score bucket on the x axis.
const BUCKET_WIDTH: f64 = 1.0;

/// Render grouped bars, one series per subject, for the filtered rows.
pub fn score_histogram(ui: &mut Ui, histogram: &HistogramDataset, height: f32) {
    let n_subjects = Subject::ALL.len() as f64;
    let bar_width = BUCKET_WIDTH / n_subjects;

    let charts: Vec<BarChart> = histogram
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            // Spread the subjects side by side within each score bucket.
            let offset = (i as f64 - (n_subjects - 1.0) / 2.0) * bar_width;
            let bars: Vec<Bar> = series
                .counts
                .iter()
                .map(|&(score, count)| {
                    Bar::new(score as f64 + offset, count as f64)
                        .width(bar_width)
                        .name(format!("{}: {score}", series.subject))
                })
                .collect();
            BarChart::new(bars)
                .name(series.subject.to_string())
                .color(subject_color(series.subject))
        })
        .collect();

    Plot::new("score_histogram")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Test Score (out of 100)")
        .y_axis_label("Count of Students")
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
