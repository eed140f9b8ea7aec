use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use super::insights::Insights;

// ---------------------------------------------------------------------------
// Restaurant – one cleaned row of the source CSV
// ---------------------------------------------------------------------------

/// A single restaurant after rating/cost normalisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub name: String,
    /// Never empty once cleaned.
    pub location: String,
    /// Comma-separated cuisine labels, kept as one opaque string.
    pub cuisines: Option<String>,
    /// Rating in `[1.0, 5.0]`.
    pub rate: f64,
    /// Approximate cost for two people, `>= 0`.
    pub approx_cost_for_two: f64,
    pub rest_type: Option<String>,
}

impl Restaurant {
    /// Cuisines for display, `-` when the source field was empty.
    pub fn cuisines_label(&self) -> &str {
        self.cuisines.as_deref().unwrap_or("-")
    }

    /// Restaurant type for display, `-` when the source field was empty.
    pub fn rest_type_label(&self) -> &str {
        self.rest_type.as_deref().unwrap_or("-")
    }
}

/// Format a cleaned number without a trailing `.0` for whole values
/// (`1200.0` → `1200`, `4.1` → `4.1`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// RestaurantData – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable result of one load/clean pass.
///
/// Two views are derived from the same pass and kept apart on purpose:
/// `cleaned` keeps every surviving row and feeds the aggregate charts,
/// `deduplicated` keeps the first row per `(name, location)` and feeds the
/// recommender.
#[derive(Debug, Clone)]
pub struct RestaurantData {
    /// File the data was loaded from.
    pub source: PathBuf,
    /// Raw data rows read from the file (header excluded).
    pub rows_read: usize,
    /// Rows with a valid rating, cost and location, in file order.
    pub cleaned: Vec<Restaurant>,
    /// First occurrence of each `(name, location)` pair, in file order.
    pub deduplicated: Vec<Restaurant>,
    /// Sorted distinct locations of the deduplicated view.
    pub locations: Vec<String>,
    /// Frequency tables over `cleaned`.
    pub insights: Insights,
}

impl RestaurantData {
    /// Build both views and the pre-computed tables from cleaned rows.
    pub fn from_cleaned(source: PathBuf, rows_read: usize, cleaned: Vec<Restaurant>) -> Self {
        let deduplicated = deduplicate(&cleaned);
        let locations: Vec<String> = deduplicated
            .iter()
            .map(|r| r.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let insights = Insights::from_records(&cleaned);

        RestaurantData {
            source,
            rows_read,
            cleaned,
            deduplicated,
            locations,
            insights,
        }
    }

    /// Number of restaurants available to the recommender.
    pub fn len(&self) -> usize {
        self.deduplicated.len()
    }

    /// Whether no restaurant survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.deduplicated.is_empty()
    }
}

/// Keep the first record for each exact `(name, location)` pair.
fn deduplicate(records: &[Restaurant]) -> Vec<Restaurant> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| seen.insert((r.name.as_str(), r.location.as_str())))
        .cloned()
        .collect()
}
