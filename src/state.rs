use crate::color::ColorMap;
use crate::data::filter::RecommendQuery;
use crate::data::insights::TOP_CUISINES;
use crate::data::model::{Restaurant, RestaurantData};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Results of the last "Show Recommendations" press.
#[derive(Debug, Clone)]
pub struct Recommendations {
    /// Query as it was when the button was pressed.
    pub query: RecommendQuery,
    pub rows: Vec<Restaurant>,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never replaced.
    pub data: RestaurantData,

    /// Current values of the filter controls.
    pub query: RecommendQuery,

    /// Last computed recommendations (None until the user asks).
    pub recommendations: Option<Recommendations>,

    /// Colours for the most frequent cuisines, shared by bar and pie charts.
    pub cuisine_colors: ColorMap,
}

impl AppState {
    pub fn new(data: RestaurantData) -> Self {
        let query = RecommendQuery::for_dataset(&data);
        let cuisine_colors = ColorMap::new(
            data.insights
                .top_cuisines(TOP_CUISINES)
                .iter()
                .map(|(label, _)| label.as_str()),
        );
        Self {
            data,
            query,
            recommendations: None,
            cuisine_colors,
        }
    }

    /// Run the current query and remember its results.
    pub fn show_recommendations(&mut self) {
        let query = self.query.clamped();
        let rows: Vec<Restaurant> = query.run(&self.data).into_iter().cloned().collect();
        log::debug!(
            "{} matches for {:?} (max cost {}, min rating {:.1}, top {})",
            rows.len(),
            query.location,
            query.max_cost,
            query.min_rating,
            query.top_n
        );
        self.recommendations = Some(Recommendations { query, rows });
    }
}
