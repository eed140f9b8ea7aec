use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{format_number, Restaurant};
use crate::state::AppState;

const WARNING: Color32 = Color32::from_rgb(230, 160, 0);
const SUCCESS: Color32 = Color32::from_rgb(60, 170, 90);

/// Render the recommendation outcome: hint, "no matches" warning, or table.
pub fn recommendations_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Restaurant Finder");

    let Some(recs) = &state.recommendations else {
        ui.label("Pick a location and press \"Show Recommendations\".");
        return;
    };

    if recs.rows.is_empty() {
        ui.label(RichText::new("No matching restaurants found.").color(WARNING));
        return;
    }

    ui.label(
        RichText::new(format!(
            "Top {} restaurants in {}",
            recs.query.top_n, recs.query.location
        ))
        .color(SUCCESS),
    );
    ui.add_space(4.0);
    recommendations_table(ui, &recs.rows);
}

fn recommendations_table(ui: &mut Ui, rows: &[Restaurant]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::auto().at_least(24.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(200.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(120.0))
        .header(22.0, |mut header| {
            for title in ["#", "Name", "Cuisines", "Rate", "Cost for two", "Type"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (rank, r) in rows.iter().enumerate() {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(rank.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.name.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.cuisines_label());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", r.rate));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_number(r.approx_cost_for_two));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.rest_type_label());
                    });
                });
            }
        });
}
