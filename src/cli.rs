use std::fmt::Display;
use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::data::filter::{
    RecommendQuery, DEFAULT_MAX_COST, DEFAULT_MIN_RATING, DEFAULT_TOP_N, MAX_COST_RANGE,
    MIN_RATING_RANGE, TOP_N_RANGE,
};
use crate::data::insights::{CuisineShare, Insights, COST_BUCKETS, SHARE_SLICES, TOP_CUISINES};
use crate::data::model::{format_number, Restaurant, RestaurantData};

pub const DEFAULT_DATA_PATH: &str = "zomato_sample.csv";

const NO_MATCHES: &str = "No matching restaurants found.";

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "restaurant-finder")]
#[command(about = "Find top-rated restaurants by location, cost and rating")]
#[command(version)]
pub struct Cli {
    /// Restaurant CSV (comma separated, Latin-1)
    #[arg(short, long, default_value = DEFAULT_DATA_PATH, env = "RESTAURANT_FINDER_DATA")]
    pub data: PathBuf,

    /// Print results instead of opening the window
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the best-rated matches for a location
    Recommend(RecommendArgs),
    /// Print the frequency tables behind the charts
    Insights {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Location to search (case-insensitive)
    #[arg(short, long)]
    pub location: String,

    /// Maximum cost for two (100-2000)
    #[arg(long, default_value_t = DEFAULT_MAX_COST, value_parser = parse_max_cost)]
    pub max_cost: u32,

    /// Minimum rating (1.0-5.0)
    #[arg(long, default_value_t = DEFAULT_MIN_RATING, value_parser = parse_min_rating)]
    pub min_rating: f64,

    /// Number of restaurants to list (1-20)
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top_n: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl RecommendArgs {
    pub fn query(&self) -> RecommendQuery {
        RecommendQuery {
            location: self.location.clone(),
            max_cost: self.max_cost,
            min_rating: self.min_rating,
            top_n: self.top_n,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

fn parse_in_range<T>(raw: &str, range: RangeInclusive<T>) -> Result<T, String>
where
    T: FromStr + PartialOrd + Display,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{value} is outside {}..={}",
            range.start(),
            range.end()
        ))
    }
}

fn parse_max_cost(raw: &str) -> Result<u32, String> {
    parse_in_range(raw, MAX_COST_RANGE)
}

fn parse_min_rating(raw: &str) -> Result<f64, String> {
    parse_in_range(raw, MIN_RATING_RANGE)
}

fn parse_top_n(raw: &str) -> Result<usize, String> {
    parse_in_range(raw, TOP_N_RANGE)
}

// ---------------------------------------------------------------------------
// Headless commands
// ---------------------------------------------------------------------------

/// Run a headless command and print its output to stdout.
pub fn run(command: &Command, data: &RestaurantData) -> Result<()> {
    let output = match command {
        Command::Recommend(args) => {
            let query = args.query();
            let rows = query.run(data);
            let wanted = query.location.to_lowercase();
            if !data.locations.iter().any(|l| l.to_lowercase() == wanted) {
                log::warn!("Location {:?} does not occur in the dataset", query.location);
            }
            render_recommendations(&query, &rows, args.format)?
        }
        Command::Insights { format } => render_insights(&data.insights, *format)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("writing to stdout")?;
    Ok(())
}

#[derive(Serialize)]
struct RecommendationReport<'a> {
    query: &'a RecommendQuery,
    results: &'a [&'a Restaurant],
}

#[derive(Serialize)]
struct InsightsReport<'a> {
    top_cuisines: &'a [(String, usize)],
    rating_distribution: &'a [(f64, usize)],
    cost_distribution: &'a [(f64, usize)],
    cuisine_share: Vec<CuisineShare>,
}

pub fn render_recommendations(
    query: &RecommendQuery,
    rows: &[&Restaurant],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let report = RecommendationReport {
                query,
                results: rows,
            };
            serde_json::to_string_pretty(&report).context("serialising recommendations")
        }
        OutputFormat::Table if rows.is_empty() => Ok(NO_MATCHES.to_string()),
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .enumerate()
                .map(|(rank, r)| {
                    vec![
                        rank.to_string(),
                        r.name.clone(),
                        r.cuisines_label().to_string(),
                        format!("{:.1}", r.rate),
                        format_number(r.approx_cost_for_two),
                        r.rest_type_label().to_string(),
                    ]
                })
                .collect();
            Ok(format!(
                "Top {} restaurants in {}\n{}",
                query.top_n,
                query.location,
                text_table(
                    &["#", "name", "cuisines", "rate", "approx_cost_for_two", "rest_type"],
                    &cells
                )
            ))
        }
    }
}

pub fn render_insights(insights: &Insights, format: OutputFormat) -> Result<String> {
    let top_cuisines = insights.top_cuisines(TOP_CUISINES);
    let cheapest = insights.cheapest_costs(COST_BUCKETS);
    let shares = insights.cuisine_share(SHARE_SLICES);

    match format {
        OutputFormat::Json => {
            let report = InsightsReport {
                top_cuisines,
                rating_distribution: &insights.rating_distribution,
                cost_distribution: cheapest,
                cuisine_share: shares,
            };
            serde_json::to_string_pretty(&report).context("serialising insights")
        }
        OutputFormat::Table => {
            let cuisines: Vec<Vec<String>> = top_cuisines
                .iter()
                .map(|(label, count)| vec![label.clone(), count.to_string()])
                .collect();
            let ratings: Vec<Vec<String>> = insights
                .rating_distribution
                .iter()
                .map(|(rate, count)| vec![format!("{rate:.1}"), count.to_string()])
                .collect();
            let costs: Vec<Vec<String>> = cheapest
                .iter()
                .map(|(cost, count)| vec![format_number(*cost), count.to_string()])
                .collect();
            let share: Vec<Vec<String>> = shares
                .iter()
                .map(|s| vec![s.label.clone(), format!("{:.1}%", s.fraction * 100.0)])
                .collect();

            Ok([
                ("Top 10 Cuisines", text_table(&["cuisines", "count"], &cuisines)),
                ("Rating Distribution", text_table(&["rate", "count"], &ratings)),
                (
                    "Cost Distribution (Top 20 Values)",
                    text_table(&["approx_cost_for_two", "count"], &costs),
                ),
                ("Cuisine Share (Top 5)", text_table(&["cuisines", "share"], &share)),
            ]
            .iter()
            .map(|(title, table)| format!("{title}\n{table}"))
            .collect::<Vec<_>>()
            .join("\n"))
        }
    }
}

/// Left-aligned plain-text table with a dashed rule under the header.
fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![
        line(headers.to_vec()),
        line(rules.iter().map(String::as_str).collect()),
    ];
    out.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    out.push(String::new());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;

    use super::*;
    use crate::data::model::tests::restaurant;

    fn data() -> RestaurantData {
        let rows = vec![
            restaurant("A", "X", 4.5, 400.0),
            restaurant("B", "X", 4.8, 450.0),
            restaurant("C", "X", 3.9, 300.0),
        ];
        RestaurantData::from_cleaned(PathBuf::from("mem.csv"), 3, rows)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn recommend_defaults_follow_the_filter_controls() {
        let cli = Cli::try_parse_from(["restaurant-finder", "recommend", "--location", "X"]).unwrap();
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_PATH));
        let Some(Command::Recommend(args)) = cli.command else {
            panic!("expected recommend subcommand");
        };
        let query = args.query();
        assert_eq!(query.max_cost, 500);
        assert_eq!(query.min_rating, 4.0);
        assert_eq!(query.top_n, 5);
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for bad in [
            ["--max-cost", "50"],
            ["--max-cost", "2500"],
            ["--min-rating", "5.5"],
            ["--min-rating", "good"],
            ["--top-n", "0"],
            ["--top-n", "21"],
        ] {
            let args = ["restaurant-finder", "recommend", "-l", "X", bad[0], bad[1]];
            assert!(Cli::try_parse_from(args).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn no_subcommand_means_gui() {
        let cli = Cli::try_parse_from(["restaurant-finder", "--data", "other.csv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data, PathBuf::from("other.csv"));
    }

    #[test]
    fn table_lists_matches_in_rank_order() {
        let data = data();
        let query = RecommendQuery {
            location: "x".into(),
            max_cost: 500,
            min_rating: 4.0,
            top_n: 5,
        };
        let rows = query.run(&data);
        let out = render_recommendations(&query, &rows, OutputFormat::Table).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Top 5 restaurants in x");
        assert!(lines[1].starts_with("#  name"));
        assert!(lines[3].starts_with("0  B"));
        assert!(lines[4].starts_with("1  A"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_table_reports_no_matches() {
        let query = RecommendQuery {
            location: "Nowhere".into(),
            max_cost: 500,
            min_rating: 4.0,
            top_n: 5,
        };
        let out = render_recommendations(&query, &[], OutputFormat::Table).unwrap();
        assert_eq!(out, NO_MATCHES);
    }

    #[test]
    fn json_report_carries_query_and_results() {
        let data = data();
        let query = RecommendQuery {
            location: "X".into(),
            max_cost: 500,
            min_rating: 4.0,
            top_n: 1,
        };
        let rows = query.run(&data);
        let out = render_recommendations(&query, &rows, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["query"]["top_n"], 1);
        assert_eq!(value["results"].as_array().unwrap().len(), 1);
        assert_eq!(value["results"][0]["name"], "B");
        assert_eq!(value["results"][0]["approx_cost_for_two"], 450.0);
    }

    #[test]
    fn insights_table_has_every_section() {
        let out = render_insights(&data().insights, OutputFormat::Table).unwrap();
        for title in [
            "Top 10 Cuisines",
            "Rating Distribution",
            "Cost Distribution (Top 20 Values)",
            "Cuisine Share (Top 5)",
        ] {
            assert!(out.contains(title), "missing {title}");
        }
        assert!(out.contains("100.0%"));
    }

    #[test]
    fn insights_json_is_valid() {
        let out = render_insights(&data().insights, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["top_cuisines"][0][0], "North Indian");
        assert_eq!(value["top_cuisines"][0][1], 3);
        assert_eq!(value["cuisine_share"][0]["fraction"], 1.0);
    }
}
