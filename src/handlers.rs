//! The interaction boundary consumed by a dashboard layer.
//!
//! [`DashboardContext::initialize`] is the single startup step: it loads
//! all four datasets (failing on the first load error) and precomputes the
//! tables that several interactions share. Everything after that point is a
//! pure handler taking the current control state and returning a chart spec
//! or text fragment. Handlers never mutate the context, so a hosting
//! framework may call them from wherever it dispatches events.

use std::fmt;

use crate::{
    aggregate::{self, GoalTotal, SummaryRow, TopScorer, TrendMetric, WinCount},
    assets,
    chart::{self, ChartSpec, MapMetric},
    datasets::{CountrySummaryRecord, DashboardData, LoadError, LoadOptions},
    manifest::DatasetPaths,
};

#[derive(Debug)]
pub struct DashboardContext {
    data: DashboardData,
    win_counts: Vec<WinCount>,
    top_scorers: Vec<TopScorer>,
}

impl DashboardContext {
    /// Loads every dataset and precomputes the shared tables. Any missing
    /// file, missing column, or malformed row fails the whole
    /// initialization; no handler runs against partial data.
    pub fn initialize(paths: &DatasetPaths, options: &LoadOptions) -> Result<Self, LoadError> {
        Ok(Self::from_data(DashboardData::load(paths, options)?))
    }

    /// Builds a context from already-loaded tables.
    pub fn from_data(data: DashboardData) -> Self {
        let win_counts = aggregate::win_counts(&data.matches);
        let top_scorers = aggregate::top_scorers_per_year(&data.top_scorers);
        Self {
            data,
            win_counts,
            top_scorers,
        }
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn win_counts(&self) -> &[WinCount] {
        &self.win_counts
    }

    pub fn top_scorers(&self) -> &[TopScorer] {
        &self.top_scorers
    }
}

/// Result of a map click.
#[derive(Debug, Clone, PartialEq)]
pub enum CountryDetail<'a> {
    /// No region has been clicked yet.
    Prompt,
    /// The clicked region has no row in the summary table.
    NoData { country: String },
    Summary(&'a CountrySummaryRecord),
}

impl fmt::Display for CountryDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryDetail::Prompt => f.write_str("Click on a country to see the summary."),
            CountryDetail::NoData { country } => {
                write!(f, "No data available for {country}.")
            }
            CountryDetail::Summary(row) => {
                writeln!(f, "Matches Played: {}", row.matches_played)?;
                writeln!(f, "Wins: {}", row.wins)?;
                writeln!(f, "Losses: {}", row.losses)?;
                writeln!(f, "Home Wins: {}", row.home_wins)?;
                writeln!(f, "World Cups Won: {}", row.world_cups_won)?;
                writeln!(f, "World Cup Locations: {}", row.world_cup_locations)?;
                write!(f, "Shootout Wins: {}", row.shootout_wins)
            }
        }
    }
}

/// Result of clicking a scorer point on the scatter chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortraitLookup {
    /// No point has been clicked yet.
    Prompt,
    /// The clicked scorer has no portrait resource.
    NoImage { scorer: String },
    Portrait {
        scorer: String,
        resource: &'static str,
    },
}

impl fmt::Display for PortraitLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortraitLookup::Prompt => f.write_str("Click on a point to see the player's photo."),
            PortraitLookup::NoImage { scorer } => {
                write!(f, "No image available for {scorer}.")
            }
            PortraitLookup::Portrait { resource, .. } => f.write_str(resource),
        }
    }
}

/// The four chart specs refreshed together by the year filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendCharts {
    pub attendance: ChartSpec,
    pub final_positions: ChartSpec,
    pub matches_played: ChartSpec,
    pub qualified_teams: ChartSpec,
}

/// Metric dropdown changed: rebuild the choropleth.
pub fn select_metric(ctx: &DashboardContext, metric: MapMetric) -> ChartSpec {
    chart::choropleth(&ctx.data.country_summaries, metric)
}

/// Map region clicked (or not yet clicked): summary text for the country.
pub fn map_click<'a>(ctx: &'a DashboardContext, country: Option<&str>) -> CountryDetail<'a> {
    match country {
        None => CountryDetail::Prompt,
        Some(name) => match aggregate::country_summary(&ctx.data.country_summaries, name) {
            Some(row) => CountryDetail::Summary(row),
            None => CountryDetail::NoData {
                country: name.to_string(),
            },
        },
    }
}

/// Trigger-only: the win-count bar chart.
pub fn win_count_chart(ctx: &DashboardContext) -> ChartSpec {
    chart::win_count_bar(&ctx.win_counts)
}

/// Trigger-only: the top-scorer scatter chart.
pub fn top_scorer_chart(ctx: &DashboardContext) -> ChartSpec {
    chart::top_scorer_scatter(&ctx.top_scorers)
}

/// Scatter point clicked (or not yet clicked): portrait resource lookup.
pub fn scorer_click(scorer: Option<&str>) -> PortraitLookup {
    match scorer {
        None => PortraitLookup::Prompt,
        Some(name) => match assets::portrait(name) {
            Some(resource) => PortraitLookup::Portrait {
                scorer: name.to_string(),
                resource,
            },
            None => PortraitLookup::NoImage {
                scorer: name.to_string(),
            },
        },
    }
}

/// Year multi-select changed: rebuild all four trend charts against the
/// selected years. An empty selection means no filtering.
pub fn filter_years(ctx: &DashboardContext, years: &[u16]) -> TrendCharts {
    let matches = &ctx.data.matches;
    TrendCharts {
        attendance: chart::attendance_trend(&aggregate::yearly_series(
            matches,
            TrendMetric::Attendance,
            years,
        )),
        final_positions: chart::final_positions_bar(&aggregate::final_positions(matches, years)),
        matches_played: chart::matches_played_trend(&aggregate::yearly_series(
            matches,
            TrendMetric::MatchesPlayed,
            years,
        )),
        qualified_teams: chart::qualified_teams_trend(&aggregate::yearly_series(
            matches,
            TrendMetric::QualifiedTeams,
            years,
        )),
    }
}

/// Winner and top scorer joined per tournament, recomputed on demand.
pub fn summary_rows(ctx: &DashboardContext) -> Vec<SummaryRow> {
    aggregate::world_cup_summary(&ctx.data.matches, &ctx.top_scorers)
}

/// Goal totals per team, recomputed on demand.
pub fn goal_totals(ctx: &DashboardContext) -> Vec<GoalTotal> {
    aggregate::country_goal_totals(&ctx.data.goal_events)
}
