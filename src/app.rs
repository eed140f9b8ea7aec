use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::RestaurantData;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RestaurantFinderApp {
    pub state: AppState,
}

impl RestaurantFinderApp {
    pub fn new(data: RestaurantData) -> Self {
        Self {
            state: AppState::new(data),
        }
    }
}

impl eframe::App for RestaurantFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: results + insights ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    table::recommendations_section(ui, &self.state);
                    ui.add_space(8.0);
                    ui.separator();
                    charts::insights_section(ui, &self.state);
                });
        });
    }
}
