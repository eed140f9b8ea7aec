use std::collections::HashMap;

use serde::Serialize;

use super::model::Restaurant;

/// Bars shown in the "Top 10 Cuisines" chart.
pub const TOP_CUISINES: usize = 10;
/// Cheapest distinct cost values shown in the cost chart.
pub const COST_BUCKETS: usize = 20;
/// Slices in the cuisine share pie.
pub const SHARE_SLICES: usize = 5;

// ---------------------------------------------------------------------------
// Frequency tables over the cleaned (non-deduplicated) rows
// ---------------------------------------------------------------------------

/// Aggregate tables behind the insight charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Cuisine string → count, most frequent first; ties keep first appearance.
    pub cuisine_counts: Vec<(String, usize)>,
    /// Rating → count, ascending by rating.
    pub rating_distribution: Vec<(f64, usize)>,
    /// Cost for two → count, ascending by cost.
    pub cost_distribution: Vec<(f64, usize)>,
}

/// One slice of the cuisine share pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineShare {
    pub label: String,
    pub count: usize,
    /// Fraction of the pie total, in `[0, 1]`.
    pub fraction: f64,
}

impl Insights {
    pub fn from_records(records: &[Restaurant]) -> Self {
        Insights {
            cuisine_counts: cuisine_counts(records),
            rating_distribution: value_counts(records.iter().map(|r| r.rate)),
            cost_distribution: value_counts(records.iter().map(|r| r.approx_cost_for_two)),
        }
    }

    /// The `n` most frequent cuisine strings.
    pub fn top_cuisines(&self, n: usize) -> &[(String, usize)] {
        &self.cuisine_counts[..n.min(self.cuisine_counts.len())]
    }

    /// The `n` cheapest distinct cost values with their counts.
    pub fn cheapest_costs(&self, n: usize) -> &[(f64, usize)] {
        &self.cost_distribution[..n.min(self.cost_distribution.len())]
    }

    /// Share of each of the `n` most frequent cuisines relative to their
    /// combined count.
    pub fn cuisine_share(&self, n: usize) -> Vec<CuisineShare> {
        let top = self.top_cuisines(n);
        let total: usize = top.iter().map(|(_, count)| count).sum();
        if total == 0 {
            return Vec::new();
        }
        top.iter()
            .map(|(label, count)| CuisineShare {
                label: label.clone(),
                count: *count,
                fraction: *count as f64 / total as f64,
            })
            .collect()
    }
}

fn cuisine_counts(records: &[Restaurant]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for cuisine in records.iter().filter_map(|r| r.cuisines.as_deref()) {
        match slot.get(cuisine) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(cuisine, counts.len());
                counts.push((cuisine.to_string(), 1));
            }
        }
    }

    // Stable: equal counts stay in first-appearance order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Count equal values, ascending by value.
fn value_counts(values: impl Iterator<Item = f64>) -> Vec<(f64, usize)> {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(f64::total_cmp);

    let mut out: Vec<(f64, usize)> = Vec::new();
    for v in sorted {
        match out.last_mut() {
            Some((last, count)) if *last == v => *count += 1,
            _ => out.push((v, 1)),
        }
    }
    out
}
