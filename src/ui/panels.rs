use eframe::egui::{self, RichText, Ui};

use crate::data::filter::{MAX_COST_RANGE, MAX_COST_STEP, MIN_RATING_RANGE, MIN_RATING_STEP, TOP_N_RANGE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.data.is_empty() {
        ui.label("No restaurants survived cleaning.");
        return;
    }

    // ---- Location ----
    ui.strong("Location");
    let width = ui.available_width();
    egui::ComboBox::from_id_salt("location")
        .selected_text(state.query.location.as_str())
        .width(width)
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for location in &state.data.locations {
                ui.selectable_value(&mut state.query.location, location.clone(), location.as_str());
            }
        });
    ui.add_space(8.0);

    // ---- Cost / rating / count ----
    ui.strong("Max cost (for two)");
    ui.add(
        egui::Slider::new(&mut state.query.max_cost, MAX_COST_RANGE)
            .step_by(f64::from(MAX_COST_STEP)),
    );
    ui.add_space(8.0);

    ui.strong("Min rating");
    ui.add(
        egui::Slider::new(&mut state.query.min_rating, MIN_RATING_RANGE)
            .step_by(MIN_RATING_STEP)
            .fixed_decimals(1),
    );
    ui.add_space(8.0);

    ui.strong("Top N restaurants");
    ui.add(
        egui::DragValue::new(&mut state.query.top_n)
            .range(TOP_N_RANGE)
            .speed(0.1),
    );
    ui.add_space(12.0);

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui
            .button(RichText::new("Show Recommendations").strong())
            .clicked()
        {
            state.show_recommendations();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();

        let data = &state.data;
        ui.label(format!(
            "{} restaurants in {} locations ({} of {} rows kept)",
            data.len(),
            data.locations.len(),
            data.cleaned.len(),
            data.rows_read
        ));

        ui.separator();
        ui.label(RichText::new(data.source.display().to_string()).weak());
    });
}
