use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Per-year trend (bottom panel)
// ---------------------------------------------------------------------------

/// Line of the per-year mean of the active indicator, with a vertical marker
/// on the selected year. Years whose mean is missing leave a gap.
pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    let Some(indicator) = &state.indicator else {
        return;
    };

    let points: PlotPoints = state
        .summaries
        .iter()
        .filter_map(|summary| summary.mean(indicator).map(|m| [summary.year as f64, m]))
        .collect();

    Plot::new("trend_plot")
        .x_axis_label("Year")
        .y_axis_label(format!("Mean {indicator}"))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("World mean")
                    .color(Color32::from_rgb(0x3f, 0xa9, 0xf5))
                    .width(1.5),
            );

            if let Some(year) = state.trend_highlight {
                plot_ui.vline(
                    VLine::new(year as f64)
                        .name("Selected year")
                        .color(Color32::LIGHT_RED)
                        .width(1.0),
                );
            }
        });
}
