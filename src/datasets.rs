//! Typed loaders for the four World Cup datasets.
//!
//! Each loader validates the file's headers against the column names the
//! aggregations rely on, then parses rows by column index. Failures surface
//! as [`LoadError`]: a missing file, a missing column, or a malformed row.
//! Value ranges are not validated beyond what the aggregations need.

use std::{
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use encoding_rs::Encoding;
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::{io_utils, manifest::DatasetPaths};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset file {path:?} is missing")]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Dataset {path:?} is missing required column(s): {}", missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },
    #[error("Dataset {path:?}, row {row}: {reason}")]
    Row {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    #[error("Reading dataset {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// One tournament per row: hosts, placements, and turnout figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub year: u16,
    pub host: String,
    pub winner: String,
    pub runners_up: String,
    pub third: String,
    pub fourth: String,
    pub attendance: u64,
    pub qualified_teams: u32,
    pub matches_played: u32,
}

/// One team's goal tally in one match. The raw `goals` cell is kept
/// unparsed; the goal-total aggregation coerces it per row and skips
/// malformed cells without failing the load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalEvent {
    pub team: String,
    pub goals: String,
}

/// One top-scorer candidate for one tournament year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerRecord {
    pub year: u16,
    pub name: String,
    pub goals: u32,
    pub country: String,
}

/// Precomputed per-country summary consumed by the choropleth and the
/// map-click lookup. `world_cup_locations` is a comma-separated year list
/// in the source data and stays a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummaryRecord {
    pub country: String,
    pub matches_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub home_wins: i64,
    pub world_cups_won: i64,
    pub world_cup_locations: String,
    pub shootout_wins: i64,
}

/// Read options shared by all four loaders.
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// The four datasets, loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub matches: Vec<MatchRecord>,
    pub goal_events: Vec<GoalEvent>,
    pub top_scorers: Vec<ScorerRecord>,
    pub country_summaries: Vec<CountrySummaryRecord>,
}

impl DashboardData {
    pub fn load(paths: &DatasetPaths, options: &LoadOptions) -> Result<Self, LoadError> {
        let matches = load_matches(&paths.winners, options)?;
        let goal_events = load_goal_events(&paths.goal_events, options)?;
        let top_scorers = load_top_scorers(&paths.top_scorers, options)?;
        let country_summaries = load_country_summaries(&paths.country_summary, options)?;
        info!(
            "Loaded {} tournament(s), {} goal event(s), {} scorer row(s), {} country summaries",
            matches.len(),
            goal_events.len(),
            top_scorers.len(),
            country_summaries.len()
        );
        Ok(Self {
            matches,
            goal_events,
            top_scorers,
            country_summaries,
        })
    }
}

pub fn load_matches(path: &Path, options: &LoadOptions) -> Result<Vec<MatchRecord>, LoadError> {
    const REQUIRED: &[&str] = &[
        "Year",
        "Country",
        "Winner",
        "RunnersUp",
        "Third",
        "Fourth",
        "Attendance",
        "QualifiedTeams",
        "MatchesPlayed",
    ];
    read_rows(path, options, REQUIRED, |row| {
        Ok(MatchRecord {
            year: row.parse("Year")?,
            host: row.text("Country"),
            winner: row.text("Winner"),
            runners_up: row.text("RunnersUp"),
            third: row.text("Third"),
            fourth: row.text("Fourth"),
            attendance: row.parse("Attendance")?,
            qualified_teams: row.parse("QualifiedTeams")?,
            matches_played: row.parse("MatchesPlayed")?,
        })
    })
}

pub fn load_goal_events(path: &Path, options: &LoadOptions) -> Result<Vec<GoalEvent>, LoadError> {
    const REQUIRED: &[&str] = &["team", "goals"];
    read_rows(path, options, REQUIRED, |row| {
        Ok(GoalEvent {
            team: row.text("team"),
            goals: row.text("goals"),
        })
    })
}

pub fn load_top_scorers(
    path: &Path,
    options: &LoadOptions,
) -> Result<Vec<ScorerRecord>, LoadError> {
    const REQUIRED: &[&str] = &["Year", "Name", "Goals", "Country"];
    read_rows(path, options, REQUIRED, |row| {
        Ok(ScorerRecord {
            year: row.parse("Year")?,
            name: row.text("Name"),
            goals: row.parse("Goals")?,
            country: row.text("Country"),
        })
    })
}

pub fn load_country_summaries(
    path: &Path,
    options: &LoadOptions,
) -> Result<Vec<CountrySummaryRecord>, LoadError> {
    const REQUIRED: &[&str] = &[
        "Country",
        "Matches Played",
        "Wins",
        "Losses",
        "Home Wins",
        "World Cups Won",
        "World Cup Locations",
        "Shootout Wins",
    ];
    read_rows(path, options, REQUIRED, |row| {
        Ok(CountrySummaryRecord {
            country: row.text("Country"),
            matches_played: row.parse("Matches Played")?,
            wins: row.parse("Wins")?,
            losses: row.parse("Losses")?,
            home_wins: row.parse("Home Wins")?,
            world_cups_won: row.parse("World Cups Won")?,
            world_cup_locations: row.text("World Cup Locations"),
            shootout_wins: row.parse("Shootout Wins")?,
        })
    })
}

/// A decoded row paired with the column indices resolved from the header.
struct RowView<'a> {
    fields: &'a [String],
    required: &'a [&'a str],
    indices: &'a [usize],
}

impl RowView<'_> {
    fn index_of(&self, column: &str) -> usize {
        let position = self
            .required
            .iter()
            .position(|name| *name == column)
            .expect("column must be listed in REQUIRED");
        self.indices[position]
    }

    fn text(&self, column: &str) -> String {
        self.fields
            .get(self.index_of(column))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn parse<T>(&self, column: &str) -> Result<T, String>
    where
        T: FromStr,
    {
        let raw = self.text(column);
        raw.parse().map_err(|_| {
            format!("Column '{column}': failed to parse '{raw}' as a number")
        })
    }
}

fn read_rows<T, F>(
    path: &Path,
    options: &LoadOptions,
    required: &[&str],
    mut build: F,
) -> Result<Vec<T>, LoadError>
where
    F: FnMut(&RowView<'_>) -> Result<T, String>,
{
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let mut reader = open_dataset(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, options.encoding).map_err(|source| {
        LoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let indices = required_indices(path, &headers, required)?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        // Header row is row 1; data starts at row 2.
        let row_number = row_idx + 2;
        let record = record.map_err(|err| LoadError::Row {
            path: path.to_path_buf(),
            row: row_number,
            reason: err.to_string(),
        })?;
        let fields =
            io_utils::decode_record(&record, options.encoding).map_err(|source| {
                LoadError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        let view = RowView {
            fields: &fields,
            required,
            indices: &indices,
        };
        let row = build(&view).map_err(|reason| LoadError::Row {
            path: path.to_path_buf(),
            row: row_number,
            reason,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn open_dataset(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<std::io::BufReader<std::fs::File>>, LoadError> {
    io_utils::open_csv_reader_from_path(path, delimiter).map_err(|source| {
        let not_found = source
            .downcast_ref::<io::Error>()
            .is_some_and(|err| err.kind() == io::ErrorKind::NotFound);
        if not_found {
            LoadError::MissingFile {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, source.to_string()),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn required_indices(
    path: &Path,
    headers: &[String],
    required: &[&str],
) -> Result<Vec<usize>, LoadError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match headers.iter().position(|header| header.trim() == *name) {
            Some(idx) => indices.push(idx),
            None => missing.push((*name).to_string()),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(LoadError::Schema {
            path: path.to_path_buf(),
            missing,
        })
    }
}
