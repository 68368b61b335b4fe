use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the left control panel: indicator selector, year slider, country
/// filter. The slider is the sole writer of the year selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let indicators = dataset.indicators.clone();

    // ---- Indicator selector ----
    ui.strong("Indicator");
    let current_indicator = state.indicator.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("indicator")
        .selected_text(&current_indicator)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &indicators {
                if ui
                    .selectable_label(current_indicator == *name, name)
                    .clicked()
                {
                    state.set_indicator(name.clone());
                }
            }
        });
    ui.separator();

    // ---- Year slider ----
    if let Some(controller) = &state.selection {
        let years = controller.valid_years().to_vec();
        let current_year = controller.current_year();

        ui.strong("Year");
        ui.label(RichText::new(current_year.to_string()).heading());

        let mut idx = years
            .iter()
            .position(|&y| y == current_year)
            .unwrap_or(years.len() - 1);
        let formatter_years = years.clone();
        let slider = egui::Slider::new(&mut idx, 0..=years.len() - 1)
            .show_value(false)
            .custom_formatter(move |v, _| {
                let i = (v.round() as usize).min(formatter_years.len() - 1);
                formatter_years[i].to_string()
            });

        if ui.add(slider).changed() {
            state.select_year(years[idx]);
        }
        ui.separator();
    }

    // ---- Country filter ----
    ui.strong("Country filter");
    let mut query = state.country_query.clone();
    let response = ui.text_edit_singleline(&mut query);
    if response.changed() {
        state.set_country_query(query);
    }
    if ui.small_button("Reset").clicked() {
        state.reset_country_query();
    }
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations, {} countries, {} years",
                ds.len(),
                ds.countries.len(),
                ds.years.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open indicator data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} observations with indicators {:?}",
                    dataset.len(),
                    dataset.indicators
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
