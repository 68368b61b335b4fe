use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Country ranking (central panel)
// ---------------------------------------------------------------------------

/// Bar chart of the top countries for the selected year, bars coloured by
/// value on the shared sequential scale. Hovering a bar shows its country.
pub fn ranking_chart(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view rankings  (File → Open…)");
        });
        return;
    }

    let year = state
        .selection
        .as_ref()
        .map(|c| c.current_year().to_string())
        .unwrap_or_default();
    let indicator = state.indicator.clone().unwrap_or_default();

    let bars: Vec<Bar> = state
        .ranking
        .iter()
        .enumerate()
        .map(|(i, ranked)| {
            let color = state
                .color_scale
                .as_ref()
                .map(|scale| scale.color_for(Some(ranked.value)))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, ranked.value)
                .name(&ranked.country)
                .fill(color)
                .width(0.8)
        })
        .collect();

    // Short country labels on the x axis, as much as fits.
    let labels: Vec<String> = state
        .ranking
        .iter()
        .map(|r| {
            let name = &r.country;
            if name.chars().count() > 8 {
                let short: String = name.chars().take(8).collect();
                format!("{short}…")
            } else {
                name.clone()
            }
        })
        .collect();

    Plot::new("ranking_plot")
        .y_axis_label(indicator)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as i64;
            if (mark.value - idx as f64).abs() > 1e-6 {
                return String::new();
            }
            usize::try_from(idx)
                .ok()
                .and_then(|i| labels.get(i).cloned())
                .unwrap_or_default()
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Top countries, {year}")));
        });
}
