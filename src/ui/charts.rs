use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::ColorMap;
use crate::data::insights::{CuisineShare, COST_BUCKETS, SHARE_SLICES, TOP_CUISINES};
use crate::data::model::format_number;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 220.0;
const BAR_COLOR: Color32 = Color32::from_rgb(90, 140, 220);

// ---------------------------------------------------------------------------
// Insights section (central panel, below the results)
// ---------------------------------------------------------------------------

/// Render the four insight charts in a 2×2 grid.
pub fn insights_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Insights");
    ui.add_space(4.0);

    ui.columns(2, |columns: &mut [Ui]| {
        columns[0].strong("Top 10 Cuisines");
        top_cuisines_chart(&mut columns[0], state);
        columns[1].strong("Rating Distribution");
        rating_chart(&mut columns[1], state);
    });

    ui.add_space(12.0);

    ui.columns(2, |columns: &mut [Ui]| {
        columns[0].strong("Cost Distribution (Top 20 Values)");
        cost_chart(&mut columns[0], state);
        columns[1].strong("Cuisine Share (Top 5)");
        let shares = state.data.insights.cuisine_share(SHARE_SLICES);
        cuisine_pie(&mut columns[1], &shares, &state.cuisine_colors);
    });
}

fn static_plot(id: &str) -> Plot {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Count")
}

fn top_cuisines_chart(ui: &mut Ui, state: &AppState) {
    let top = state.data.insights.top_cuisines(TOP_CUISINES);
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(state.cuisine_colors.color_for(label))
                .width(0.7)
        })
        .collect();

    static_plot("top_cuisines")
        .x_axis_label("Rank")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));

    for (i, (label, count)) in top.iter().enumerate() {
        ui.label(
            RichText::new(format!("{}. {label} ({count})", i + 1))
                .small()
                .color(state.cuisine_colors.color_for(label)),
        );
    }
}

fn rating_chart(ui: &mut Ui, state: &AppState) {
    let distribution = &state.data.insights.rating_distribution;
    let ratings: Vec<f64> = distribution.iter().map(|(v, _)| *v).collect();
    let width = bar_width(&ratings, 0.08);
    let bars: Vec<Bar> = distribution
        .iter()
        .map(|(rating, count)| {
            Bar::new(*rating, *count as f64)
                .name(format!("{rating:.1}"))
                .width(width)
        })
        .collect();

    static_plot("rating_distribution")
        .x_axis_label("Rating")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR))
        });
}

fn cost_chart(ui: &mut Ui, state: &AppState) {
    let cheapest = state.data.insights.cheapest_costs(COST_BUCKETS);
    let costs: Vec<f64> = cheapest.iter().map(|(v, _)| *v).collect();
    let width = bar_width(&costs, 40.0);
    let bars: Vec<Bar> = cheapest
        .iter()
        .map(|(cost, count)| {
            Bar::new(*cost, *count as f64)
                .name(format_number(*cost))
                .width(width)
        })
        .collect();

    static_plot("cost_distribution")
        .x_axis_label("Cost for two")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR))
        });
}

/// 80% of the narrowest gap between neighbouring sorted values, so bars on a
/// numeric axis never overlap.
fn bar_width(sorted_values: &[f64], fallback: f64) -> f64 {
    sorted_values
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .fold(None, |min: Option<f64>, gap| Some(min.map_or(gap, |m| m.min(gap))))
        .map_or(fallback, |gap| gap * 0.8)
}

// ---------------------------------------------------------------------------
// Pie chart (painted directly; egui_plot has no pie primitive)
// ---------------------------------------------------------------------------

/// Largest angle drawn as a single convex polygon.
const MAX_WEDGE: f32 = FRAC_PI_2;
/// Arc segments per full turn.
const ARC_SEGMENTS: f32 = 96.0;

fn cuisine_pie(ui: &mut Ui, shares: &[CuisineShare], colors: &ColorMap) {
    if shares.is_empty() {
        ui.label("No cuisine data.");
        return;
    }

    let side = ui.available_width().min(CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.45;

    // Counter-clockwise from twelve o'clock.
    let mut start = FRAC_PI_2;
    for share in shares {
        let sweep = share.fraction as f32 * TAU;
        let color = colors.color_for(&share.label);
        for polygon in wedge_polygons(center, radius, start, sweep) {
            painter.add(Shape::convex_polygon(
                polygon,
                color,
                Stroke::new(1.0, Color32::WHITE),
            ));
        }

        let label_at = center + polar(radius * 0.65, start + sweep / 2.0);
        painter.text(
            label_at,
            Align2::CENTER_CENTER,
            format!("{:.1}%", share.fraction * 100.0),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
        start += sweep;
    }

    for share in shares {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(colors.color_for(&share.label)));
            ui.label(RichText::new(format!("{} ({})", share.label, share.count)).small());
        });
    }
}

/// Offset of a point at `radius` and `angle` (radians, counter-clockwise,
/// screen y pointing down).
fn polar(radius: f32, angle: f32) -> Vec2 {
    egui::vec2(radius * angle.cos(), -radius * angle.sin())
}

/// Split one pie slice into convex polygons no wider than [`MAX_WEDGE`].
fn wedge_polygons(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Vec<Pos2>> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;
    let steps = ((piece_sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;

    (0..pieces)
        .map(|p| {
            let from = start + p as f32 * piece_sweep;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for s in 0..=steps {
                let angle = from + piece_sweep * s as f32 / steps as f32;
                points.push(center + polar(radius, angle));
            }
            points
        })
        .collect()
}
