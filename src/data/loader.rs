use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use csv::ByteRecord;
use thiserror::Error;

use super::model::{Restaurant, RestaurantData};

pub const NAME_COLUMN: &str = "name";
pub const LOCATION_COLUMN: &str = "location";
pub const CUISINES_COLUMN: &str = "cuisines";
pub const RATE_COLUMN: &str = "rate";
pub const COST_COLUMN: &str = "approx_cost(for two people)";
pub const REST_TYPE_COLUMN: &str = "rest_type";

/// Rating tokens meaning "not rated yet".
pub const UNRATED_SENTINELS: [&str; 2] = ["NEW", "-"];

/// Cell values read as "no value", on top of the empty cell.
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ratings outside this range are treated as malformed.
pub const RATING_RANGE: RangeInclusive<f64> = 1.0..=5.0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to turn the input file into a [`RestaurantData`].
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse '{}' as CSV: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("'{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("'{}' line {line}: {found} fields, header has {expected}", path.display())]
    TooManyFields {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the restaurant CSV at `path`.
///
/// The file is decoded as Latin-1. Rows with a missing/unrated/unparseable
/// rating, an unparseable cost or an empty location are dropped silently.
/// Short rows read as missing trailing cells; a row longer than the header
/// fails the whole load.
pub fn load_and_clean(path: &Path) -> Result<RestaurantData, DataSourceError> {
    if !path.exists() {
        return Err(DataSourceError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Same as [`load_and_clean`] over any reader; `source` is only used for
/// error messages and bookkeeping.
pub fn load_from_reader<R: Read>(reader: R, source: &Path) -> Result<RestaurantData, DataSourceError> {
    let csv_error = |err: csv::Error| DataSourceError::Csv {
        path: source.to_path_buf(),
        source: err,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .map(decode_latin1)
        .collect();
    let columns = Columns::locate(&headers, source)?;

    let mut tally = CleanTally::default();
    let mut cleaned = Vec::new();
    let mut record = ByteRecord::new();

    while reader.read_byte_record(&mut record).map_err(csv_error)? {
        if record.len() > headers.len() {
            return Err(DataSourceError::TooManyFields {
                path: source.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                found: record.len(),
                expected: headers.len(),
            });
        }
        tally.read += 1;
        if let Some(restaurant) = clean_row(&record, &columns, &mut tally) {
            cleaned.push(restaurant);
        }
    }

    log::debug!(
        "{}: {} rows read, {} unrated, {} bad rating, {} bad cost, {} without location",
        source.display(),
        tally.read,
        tally.unrated,
        tally.bad_rating,
        tally.bad_cost,
        tally.no_location
    );

    let data = RestaurantData::from_cleaned(source.to_path_buf(), tally.read, cleaned);
    log::info!(
        "Loaded {} rows from {}: {} cleaned, {} after de-duplication, {} locations",
        data.rows_read,
        source.display(),
        data.cleaned.len(),
        data.deduplicated.len(),
        data.locations.len()
    );
    Ok(data)
}

// ---------------------------------------------------------------------------
// Field normalisation
// ---------------------------------------------------------------------------

/// How a raw rating cell was interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingField {
    /// Empty cell.
    Missing,
    /// One of [`UNRATED_SENTINELS`].
    Unrated,
    /// Text that is neither a sentinel nor a number within [`RATING_RANGE`].
    Unparseable,
    Value(f64),
}

/// Interpret a raw rating cell such as `"4.1/5"`, `"3.9 /5"`, `"NEW"` or `"-"`.
pub fn parse_rating(raw: &str) -> RatingField {
    if raw.is_empty() {
        return RatingField::Missing;
    }
    if UNRATED_SENTINELS.contains(&raw) {
        return RatingField::Unrated;
    }
    let head = raw.split_once('/').map_or(raw, |(head, _)| head);
    match head.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && RATING_RANGE.contains(&v) => RatingField::Value(v),
        _ => RatingField::Unparseable,
    }
}

/// Parse a raw cost cell, dropping thousands separators (`"1,200"` → `1200`).
pub fn parse_cost(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|&c| c != ',').collect();
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Whether a decoded cell stands for "no value".
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

/// Header positions of the columns the cleaner reads.
struct Columns {
    name: usize,
    location: usize,
    cuisines: usize,
    rate: usize,
    cost: usize,
    rest_type: usize,
}

impl Columns {
    fn locate(headers: &[String], source: &Path) -> Result<Self, DataSourceError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| DataSourceError::MissingColumn {
                    path: source.to_path_buf(),
                    column,
                })
        };
        Ok(Columns {
            name: find(NAME_COLUMN)?,
            location: find(LOCATION_COLUMN)?,
            cuisines: find(CUISINES_COLUMN)?,
            rate: find(RATE_COLUMN)?,
            cost: find(COST_COLUMN)?,
            rest_type: find(REST_TYPE_COLUMN)?,
        })
    }
}

#[derive(Debug, Default)]
struct CleanTally {
    read: usize,
    unrated: usize,
    bad_rating: usize,
    bad_cost: usize,
    no_location: usize,
}

fn clean_row(record: &ByteRecord, columns: &Columns, tally: &mut CleanTally) -> Option<Restaurant> {
    // Absent trailing cells and missing-value tokens all read as "".
    let field = |idx: usize| {
        record
            .get(idx)
            .map(decode_latin1)
            .filter(|cell| !is_missing(cell))
            .unwrap_or_default()
    };
    let optional = |idx: usize| Some(field(idx)).filter(|s| !s.is_empty());

    let rate = match parse_rating(&field(columns.rate)) {
        RatingField::Value(v) => v,
        RatingField::Missing | RatingField::Unrated => {
            tally.unrated += 1;
            return None;
        }
        RatingField::Unparseable => {
            tally.bad_rating += 1;
            return None;
        }
    };

    let Some(approx_cost_for_two) = parse_cost(&field(columns.cost)) else {
        tally.bad_cost += 1;
        return None;
    };

    let location = field(columns.location);
    if location.trim().is_empty() {
        tally.no_location += 1;
        return None;
    }

    Some(Restaurant {
        name: field(columns.name),
        location,
        cuisines: optional(columns.cuisines),
        rate,
        approx_cost_for_two,
        rest_type: optional(columns.rest_type),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;

    use super::*;

    const HEADER: &str = "name,online_order,location,rest_type,cuisines,approx_cost(for two people),rate\n";

    fn load_str(csv: &str) -> RestaurantData {
        load_from_reader(csv.as_bytes(), Path::new("test.csv")).unwrap()
    }

    #[test]
    fn rating_sentinels_and_fractions() {
        assert_eq!(parse_rating("NEW"), RatingField::Unrated);
        assert_eq!(parse_rating("-"), RatingField::Unrated);
        assert_eq!(parse_rating(""), RatingField::Missing);
        assert_eq!(parse_rating("4.1/5"), RatingField::Value(4.1));
        assert_eq!(parse_rating("3.9 /5"), RatingField::Value(3.9));
        assert_eq!(parse_rating(" 4.0 "), RatingField::Value(4.0));
        assert_eq!(parse_rating("new"), RatingField::Unparseable);
        assert_eq!(parse_rating("n/a"), RatingField::Unparseable);
        assert_eq!(parse_rating("NaN"), RatingField::Unparseable);
        assert_eq!(parse_rating("7.5/5"), RatingField::Unparseable);
    }

    #[test]
    fn cost_strips_thousands_separators() {
        assert_eq!(parse_cost("1,200"), Some(1200.0));
        assert_eq!(parse_cost("450"), Some(450.0));
        assert_eq!(parse_cost("1,00,000"), Some(100000.0));
        assert_eq!(parse_cost(""), None);
        assert_eq!(parse_cost("about 300"), None);
        assert_eq!(parse_cost("-50"), None);
    }

    #[test]
    fn cleaning_drops_malformed_rows() {
        let csv = format!(
            "{HEADER}\
             Onesta,Yes,Banashankari,Casual Dining,\"Pizza, Cafe\",600,4.1/5\n\
             Fresh Start,No,Banashankari,Cafe,Cafe,\"1,200\",NEW\n\
             Dash,No,Banashankari,Cafe,Cafe,300,-\n\
             Blank Rating,No,Banashankari,Cafe,Cafe,300,\n\
             Bad Rating,No,Banashankari,Cafe,Cafe,300,unknown\n\
             Bad Cost,No,Banashankari,Cafe,Cafe,cheap,4.0/5\n\
             No Location,No,,Cafe,Cafe,300,4.0/5\n\
             Big Spender,Yes,Indiranagar,Fine Dining,,\"1,200\",4.6 /5\n"
        );
        let data = load_str(&csv);

        assert_eq!(data.rows_read, 8);
        let names: Vec<&str> = data.cleaned.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Onesta", "Big Spender"]);

        let onesta = &data.cleaned[0];
        assert_eq!(onesta.rate, 4.1);
        assert_eq!(onesta.approx_cost_for_two, 600.0);
        assert_eq!(onesta.cuisines.as_deref(), Some("Pizza, Cafe"));

        let big = &data.cleaned[1];
        assert_eq!(big.approx_cost_for_two, 1200.0);
        assert_eq!(big.rate, 4.6);
        assert_eq!(big.cuisines, None);
    }

    #[test]
    fn cleaned_rows_satisfy_invariants() {
        let csv = format!(
            "{HEADER}\
             A,Yes,BTM,Cafe,Cafe,300,1.0/5\n\
             B,Yes,BTM,Cafe,Cafe,0,5.0/5\n\
             C,Yes, ,Cafe,Cafe,300,4.0/5\n\
             D,Yes,BTM,Cafe,Cafe,300,0.5/5\n\
             A,Yes,BTM,Cafe,Cafe,900,2.0/5\n"
        );
        let data = load_str(&csv);

        for r in &data.cleaned {
            assert!(RATING_RANGE.contains(&r.rate));
            assert!(r.approx_cost_for_two >= 0.0);
            assert!(!r.location.trim().is_empty());
        }
        assert_eq!(data.cleaned.len(), 3);
        assert_eq!(data.deduplicated.len(), 2);

        let pairs: HashSet<(&str, &str)> = data
            .deduplicated
            .iter()
            .map(|r| (r.name.as_str(), r.location.as_str()))
            .collect();
        assert_eq!(pairs.len(), data.deduplicated.len());
    }

    #[test]
    fn insights_use_the_non_deduplicated_rows() {
        let csv = format!(
            "{HEADER}\
             A,Yes,BTM,Cafe,Cafe,300,4.0/5\n\
             A,Yes,BTM,Cafe,Cafe,300,4.0/5\n\
             B,Yes,BTM,Cafe,Bakery,300,4.0/5\n"
        );
        let data = load_str(&csv);

        assert_eq!(data.deduplicated.len(), 2);
        assert_eq!(data.insights.cuisine_counts[0], ("Cafe".to_string(), 2));
        assert_eq!(data.insights.rating_distribution, vec![(4.0, 3)]);
    }

    #[test]
    fn decodes_latin1_bytes() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"Caf\xe9 Noir,Yes,Jayanagar,Caf\xe9,French,800,4.3/5\n");
        let data = load_from_reader(bytes.as_slice(), Path::new("latin1.csv")).unwrap();

        assert_eq!(data.cleaned[0].name, "Café Noir");
        assert_eq!(data.cleaned[0].rest_type.as_deref(), Some("Café"));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "name,location,cuisines,rate,rest_type\nA,BTM,Cafe,4.0/5,Cafe\n";
        let err = load_from_reader(csv.as_bytes(), Path::new("short.csv")).unwrap_err();
        match err {
            DataSourceError::MissingColumn { column, .. } => assert_eq!(column, COST_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let csv = format!(
            "{HEADER}\
             A,Yes,BTM\n\
             B,Yes,BTM,Cafe,Cafe,300\n\
             C,Yes,BTM,Cafe,Cafe,300,4.2/5\n"
        );
        let data = load_str(&csv);

        assert_eq!(data.rows_read, 3);
        let names: Vec<&str> = data.cleaned.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn long_rows_fail_the_whole_load() {
        let csv = format!(
            "{HEADER}\
             C,Yes,BTM,Cafe,Cafe,300,4.2/5\n\
             D,Yes,BTM,Cafe,Cafe,300,4.2/5,extra\n"
        );
        let err = load_from_reader(csv.as_bytes(), Path::new("long.csv")).unwrap_err();
        match err {
            DataSourceError::TooManyFields {
                line,
                found,
                expected,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(found, 8);
                assert_eq!(expected, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_value_tokens_read_as_empty_cells() {
        let csv = format!(
            "{HEADER}\
             A,Yes,NA,Cafe,Cafe,300,4.2/5\n\
             B,Yes,BTM,NULL,None,300,4.2/5\n\
             C,Yes,BTM,Cafe,Cafe,N/A,4.2/5\n\
             D,Yes,BTM,Cafe,Cafe,300,nan\n\
             NA,Yes,HSR,Cafe,Cafe,300,4.0/5\n"
        );
        let data = load_str(&csv);

        let names: Vec<&str> = data.cleaned.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", ""]);
        assert_eq!(data.cleaned[0].cuisines, None);
        assert_eq!(data.cleaned[0].rest_type, None);
        assert_eq!(data.locations, vec!["BTM".to_string(), "HSR".to_string()]);
        assert_eq!(data.insights.cuisine_counts, vec![("Cafe".to_string(), 1)]);
        assert!(is_missing("None"));
        assert!(!is_missing("none"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zomato_sample.csv");
        let err = load_and_clean(&path).unwrap_err();
        assert!(matches!(err, DataSourceError::NotFound { .. }));
        assert!(err.to_string().contains("zomato_sample.csv"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zomato_sample.csv");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            "{HEADER}Onesta,Yes,Banashankari,Casual Dining,Pizza,600,4.1/5\n"
        )
        .unwrap();
        drop(file);

        let data = load_and_clean(&path).unwrap();
        assert_eq!(data.source, path);
        assert_eq!(data.len(), 1);
        assert_eq!(data.locations, vec!["Banashankari".to_string()]);
    }
}
