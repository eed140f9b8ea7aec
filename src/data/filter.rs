use std::ops::RangeInclusive;

use serde::Serialize;

use super::model::{Restaurant, RestaurantData};

pub const MAX_COST_RANGE: RangeInclusive<u32> = 100..=2000;
pub const MAX_COST_STEP: u32 = 50;
pub const DEFAULT_MAX_COST: u32 = 500;

pub const MIN_RATING_RANGE: RangeInclusive<f64> = 1.0..=5.0;
pub const MIN_RATING_STEP: f64 = 0.1;
pub const DEFAULT_MIN_RATING: f64 = 4.0;

pub const TOP_N_RANGE: RangeInclusive<usize> = 1..=20;
pub const DEFAULT_TOP_N: usize = 5;

// ---------------------------------------------------------------------------
// Recommender
// ---------------------------------------------------------------------------

/// Return the best-rated restaurants in `location` that cost at most
/// `max_cost` and are rated at least `min_rating`, capped at `top_n`.
///
/// * Location matching is case-insensitive exact equality.
/// * Both bounds are inclusive.
/// * Results are ordered by rating, highest first; equal ratings keep their
///   order in `records`.
/// * No match is an empty vector, not an error.
pub fn recommend<'a>(
    records: &'a [Restaurant],
    location: &str,
    max_cost: f64,
    min_rating: f64,
    top_n: usize,
) -> Vec<&'a Restaurant> {
    let wanted = location.to_lowercase();

    let mut matches: Vec<&Restaurant> = records
        .iter()
        .filter(|r| {
            r.location.to_lowercase() == wanted
                && r.approx_cost_for_two <= max_cost
                && r.rate >= min_rating
        })
        .collect();

    // `sort_by` is stable.
    matches.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    matches.truncate(top_n);
    matches
}

// ---------------------------------------------------------------------------
// Query state shared by the UI and the CLI
// ---------------------------------------------------------------------------

/// The four recommender inputs, with the defaults of the filter controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendQuery {
    pub location: String,
    pub max_cost: u32,
    pub min_rating: f64,
    pub top_n: usize,
}

impl RecommendQuery {
    /// Default query for a dataset: first location in sorted order.
    pub fn for_dataset(data: &RestaurantData) -> Self {
        RecommendQuery {
            location: data.locations.first().cloned().unwrap_or_default(),
            max_cost: DEFAULT_MAX_COST,
            min_rating: DEFAULT_MIN_RATING,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Copy of the query with every numeric input forced into its range.
    pub fn clamped(&self) -> Self {
        RecommendQuery {
            location: self.location.clone(),
            max_cost: self
                .max_cost
                .clamp(*MAX_COST_RANGE.start(), *MAX_COST_RANGE.end()),
            min_rating: self
                .min_rating
                .clamp(*MIN_RATING_RANGE.start(), *MIN_RATING_RANGE.end()),
            top_n: self.top_n.clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end()),
        }
    }

    /// Run the query against the deduplicated view.
    pub fn run<'a>(&self, data: &'a RestaurantData) -> Vec<&'a Restaurant> {
        recommend(
            &data.deduplicated,
            &self.location,
            f64::from(self.max_cost),
            self.min_rating,
            self.top_n,
        )
    }
}
