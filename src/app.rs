use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, ranking, trend};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct EconoLensApp {
    pub state: AppState,
}

impl eframe::App for EconoLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: indicator, year slider, filter ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: per-year trend ----
        egui::TopBottomPanel::bottom("trend_panel")
            .default_height(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                trend::trend_chart(ui, &self.state);
            });

        // ---- Central panel: country ranking ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ranking::ranking_chart(ui, &self.state);
        });
    }
}
