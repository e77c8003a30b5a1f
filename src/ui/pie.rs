use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::view::CategoryCounts;

// ---------------------------------------------------------------------------
// Pie chart for one categorical breakdown
// ---------------------------------------------------------------------------

/// Arc segments per full turn; each wedge is drawn as a triangle fan.
const SEGMENTS_PER_TURN: f32 = 128.0;

/// Fraction of the total per category, in category order.
pub fn shares(counts: &CategoryCounts) -> Vec<f32> {
    let total = counts.total();
    if total == 0 {
        return vec![0.0; counts.counts.len()];
    }
    counts
        .counts
        .iter()
        .map(|(_, n)| *n as f32 / total as f32)
        .collect()
}

/// Caption, pie, legend and a count table for one breakdown.
pub fn category_pie(
    ui: &mut Ui,
    counts: &CategoryCounts,
    colors: Option<&ColorMap>,
    size: f32,
) {
    ui.strong(&counts.caption);

    let color_of = |label: &str| {
        colors
            .map(|c| c.color_for(label))
            .unwrap_or(Color32::LIGHT_BLUE)
    };

    if counts.total() == 0 {
        ui.label("No students in this range.");
        return;
    }

    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.45;

    let mut start = -TAU / 4.0;
    for ((label, _), share) in counts.counts.iter().zip(shares(counts)) {
        let sweep = share * TAU;
        let color = color_of(label);
        let steps = ((sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
        for step in 0..steps {
            let a0 = start + sweep * step as f32 / steps as f32;
            let a1 = start + sweep * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, point_on(center, radius, a0), point_on(center, radius, a1)],
                color,
                Stroke::NONE,
            ));
        }
        start += sweep;
    }

    ui.push_id(counts.attribute, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .column(Column::auto())
            .header(18.0, |mut header| {
                header.col(|_ui| {});
                header.col(|ui| {
                    ui.strong(counts.attribute.title());
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
                header.col(|ui| {
                    ui.strong("%");
                });
            })
            .body(|mut body| {
                for ((label, n), share) in counts.counts.iter().zip(shares(counts)) {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new("■").color(color_of(label)));
                        });
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(n.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}", share * 100.0));
                        });
                    });
                }
            });
    });
}

fn point_on(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * egui::vec2(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Attribute;

    fn counts(values: &[(&str, usize)]) -> CategoryCounts {
        CategoryCounts {
            attribute: Attribute::Gender,
            caption: "Gender in Score Range (0, 100)".to_string(),
            counts: values.iter().map(|(v, n)| (v.to_string(), *n)).collect(),
        }
    }

    #[test]
    fn shares_sum_to_one() {
        let s = shares(&counts(&[("female", 3), ("male", 1)]));
        assert_eq!(s, vec![0.75, 0.25]);
    }

    #[test]
    fn shares_of_empty_breakdown() {
        assert!(shares(&counts(&[])).is_empty());
    }
}
