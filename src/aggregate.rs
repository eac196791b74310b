//! The aggregation engine: pure functions deriving summary tables from the
//! loaded datasets.
//!
//! Every function here is deterministic and synchronous: the same input
//! table yields the same output rows, so the handler layer can recompute on
//! demand without coordination.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::datasets::{CountrySummaryRecord, GoalEvent, MatchRecord, ScorerRecord};

/// Titles won per country, with the home-soil subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinCount {
    pub country: String,
    pub world_cups_won: u32,
    pub won_at_home: u32,
}

/// The top scorer of one tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopScorer {
    pub year: u16,
    pub top_scorer: String,
    pub goals_scored: u32,
    pub country: String,
}

/// Winner and top scorer joined per tournament year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub year: u16,
    pub winner: String,
    pub top_scorer: String,
    pub goals_scored: u32,
}

/// Goals scored across all recorded matches, per team.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalTotal {
    pub team: String,
    pub total_goals: f64,
}

/// One point of a per-year metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub year: u16,
    pub value: u64,
}

/// Tournament placements per country, pivoted into one column per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCounts {
    pub country: String,
    pub winner: u32,
    pub runners_up: u32,
    pub third: u32,
    pub fourth: u32,
}

/// The metric summed by [`yearly_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMetric {
    QualifiedTeams,
    Attendance,
    MatchesPlayed,
}

impl TrendMetric {
    pub fn column(&self) -> &'static str {
        match self {
            TrendMetric::QualifiedTeams => "QualifiedTeams",
            TrendMetric::Attendance => "Attendance",
            TrendMetric::MatchesPlayed => "MatchesPlayed",
        }
    }

    fn value(&self, record: &MatchRecord) -> u64 {
        match self {
            TrendMetric::QualifiedTeams => u64::from(record.qualified_teams),
            TrendMetric::Attendance => record.attendance,
            TrendMetric::MatchesPlayed => u64::from(record.matches_played),
        }
    }
}

/// Counts titles and home-soil titles per winning country in a single pass.
/// Countries keep first-win order among equal counts; the result is sorted
/// non-increasing by total titles.
pub fn win_counts(matches: &[MatchRecord]) -> Vec<WinCount> {
    let mut counts: Vec<WinCount> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for record in matches {
        let slot = *slots.entry(record.winner.clone()).or_insert_with(|| {
            counts.push(WinCount {
                country: record.winner.clone(),
                world_cups_won: 0,
                won_at_home: 0,
            });
            counts.len() - 1
        });
        counts[slot].world_cups_won += 1;
        if record.host == record.winner {
            counts[slot].won_at_home += 1;
        }
    }
    counts.sort_by(|a, b| b.world_cups_won.cmp(&a.world_cups_won));
    counts
}

/// Selects the scorer with the maximum goal count for each year present in
/// the input. Ties on the maximum keep the first row in input order.
pub fn top_scorers_per_year(rows: &[ScorerRecord]) -> Vec<TopScorer> {
    let mut best: BTreeMap<u16, &ScorerRecord> = BTreeMap::new();
    for row in rows {
        let replace = match best.get(&row.year) {
            Some(current) => row.goals > current.goals,
            None => true,
        };
        if replace {
            best.insert(row.year, row);
        }
    }
    best.into_values()
        .map(|row| TopScorer {
            year: row.year,
            top_scorer: row.name.clone(),
            goals_scored: row.goals,
            country: row.country.clone(),
        })
        .collect()
}

/// Inner-joins tournament winners with the per-year top scorers. Rows keep
/// the match table's order; a year absent from either side is dropped.
pub fn world_cup_summary(matches: &[MatchRecord], top_scorers: &[TopScorer]) -> Vec<SummaryRow> {
    let by_year: HashMap<u16, &TopScorer> =
        top_scorers.iter().map(|scorer| (scorer.year, scorer)).collect();
    let mut rows = Vec::new();
    for record in matches {
        match by_year.get(&record.year) {
            Some(scorer) => rows.push(SummaryRow {
                year: record.year,
                winner: record.winner.clone(),
                top_scorer: scorer.top_scorer.clone(),
                goals_scored: scorer.goals_scored,
            }),
            None => debug!(
                "No top scorer recorded for {}; dropping the year from the summary",
                record.year
            ),
        }
    }
    rows
}

/// Sums goal tallies per team, descending. A goal cell that does not coerce
/// to a number skips that row's contribution with a logged warning; the
/// aggregation continues.
pub fn country_goal_totals(events: &[GoalEvent]) -> Vec<GoalTotal> {
    let mut totals: Vec<GoalTotal> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for event in events {
        let goals: f64 = match event.goals.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "Skipping goal event for team '{}': cannot coerce '{}' to a number",
                    event.team, event.goals
                );
                continue;
            }
        };
        let slot = *slots.entry(event.team.clone()).or_insert_with(|| {
            totals.push(GoalTotal {
                team: event.team.clone(),
                total_goals: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].total_goals += goals;
    }
    totals.sort_by(|a, b| b.total_goals.total_cmp(&a.total_goals));
    totals
}

/// Sums one metric per tournament year, ascending by year. An empty `years`
/// slice means no filtering.
pub fn yearly_series(matches: &[MatchRecord], metric: TrendMetric, years: &[u16]) -> Vec<TrendPoint> {
    let mut sums: BTreeMap<u16, u64> = BTreeMap::new();
    for record in matches.iter().filter(|record| selected(years, record.year)) {
        *sums.entry(record.year).or_insert(0) += metric.value(record);
    }
    sums.into_iter()
        .map(|(year, value)| TrendPoint { year, value })
        .collect()
}

/// Reshapes the four placement columns into per-country position counts,
/// one row per country appearing in any placement column, alphabetical.
/// Missing combinations stay at zero.
pub fn final_positions(matches: &[MatchRecord], years: &[u16]) -> Vec<PositionCounts> {
    let mut counts: BTreeMap<&str, [u32; 4]> = BTreeMap::new();
    for record in matches.iter().filter(|record| selected(years, record.year)) {
        let placements = [
            record.winner.as_str(),
            record.runners_up.as_str(),
            record.third.as_str(),
            record.fourth.as_str(),
        ];
        for (position, country) in placements.into_iter().enumerate() {
            counts.entry(country).or_default()[position] += 1;
        }
    }
    counts
        .into_iter()
        .map(|(country, [winner, runners_up, third, fourth])| PositionCounts {
            country: country.to_string(),
            winner,
            runners_up,
            third,
            fourth,
        })
        .collect()
}

/// Pure key lookup into the precomputed country summary table.
pub fn country_summary<'a>(
    summaries: &'a [CountrySummaryRecord],
    country: &str,
) -> Option<&'a CountrySummaryRecord> {
    summaries.iter().find(|row| row.country == country)
}

fn selected(years: &[u16], year: u16) -> bool {
    years.is_empty() || years.contains(&year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(year: u16, host: &str, winner: &str) -> MatchRecord {
        MatchRecord {
            year,
            host: host.to_string(),
            winner: winner.to_string(),
            runners_up: format!("{winner} RunnerUp"),
            third: format!("{winner} Third"),
            fourth: format!("{winner} Fourth"),
            attendance: 1000,
            qualified_teams: 13,
            matches_played: 18,
        }
    }

    fn scorer(year: u16, name: &str, goals: u32, country: &str) -> ScorerRecord {
        ScorerRecord {
            year,
            name: name.to_string(),
            goals,
            country: country.to_string(),
        }
    }

    #[test]
    fn win_counts_track_home_wins_separately() {
        let matches = vec![
            tournament(1930, "Uruguay", "Uruguay"),
            tournament(1934, "Italy", "Italy"),
        ];
        let counts = win_counts(&matches);
        assert_eq!(counts.len(), 2);
        for count in &counts {
            assert_eq!(count.world_cups_won, 1);
            assert_eq!(count.won_at_home, 1);
        }
    }

    #[test]
    fn win_counts_sort_descending_and_default_home_wins_to_zero() {
        let matches = vec![
            tournament(1958, "Sweden", "Brazil"),
            tournament(1962, "Chile", "Brazil"),
            tournament(1966, "England", "England"),
        ];
        let counts = win_counts(&matches);
        assert_eq!(counts[0].country, "Brazil");
        assert_eq!(counts[0].world_cups_won, 2);
        assert_eq!(counts[0].won_at_home, 0);
        assert_eq!(counts[1].country, "England");
        assert_eq!(counts[1].won_at_home, 1);
    }

    #[test]
    fn top_scorer_selection_picks_the_maximum_per_year() {
        let rows = vec![
            scorer(1930, "Guillermo Stábile", 8, "Argentina"),
            scorer(1930, "Bert Patenaude", 3, "USA"),
        ];
        let top = top_scorers_per_year(&rows);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].top_scorer, "Guillermo Stábile");
        assert_eq!(top[0].goals_scored, 8);
        assert_eq!(top[0].country, "Argentina");
    }

    #[test]
    fn top_scorer_ties_keep_the_first_row_in_input_order() {
        let rows = vec![
            scorer(1962, "Garrincha", 4, "Brazil"),
            scorer(1962, "Vavá", 4, "Brazil"),
            scorer(1962, "Leonel Sánchez", 4, "Chile"),
        ];
        let top = top_scorers_per_year(&rows);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].top_scorer, "Garrincha");
    }

    #[test]
    fn single_scorer_years_still_yield_one_row() {
        let rows = vec![scorer(1978, "Mario Alberto Kempes", 6, "Argentina")];
        let top = top_scorers_per_year(&rows);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn summary_join_drops_unmatched_years() {
        let matches = vec![
            tournament(1930, "Uruguay", "Uruguay"),
            tournament(1934, "Italy", "Italy"),
        ];
        let top = top_scorers_per_year(&[scorer(1930, "Guillermo Stábile", 8, "Argentina")]);
        let summary = world_cup_summary(&matches, &top);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].year, 1930);
        assert_eq!(summary[0].winner, "Uruguay");
        assert_eq!(summary[0].top_scorer, "Guillermo Stábile");
    }

    #[test]
    fn goal_totals_skip_malformed_cells_and_sort_descending() {
        let events = vec![
            GoalEvent {
                team: "Brazil".to_string(),
                goals: "2".to_string(),
            },
            GoalEvent {
                team: "Brazil".to_string(),
                goals: "3".to_string(),
            },
            GoalEvent {
                team: "Italy".to_string(),
                goals: "n/a".to_string(),
            },
            GoalEvent {
                team: "Italy".to_string(),
                goals: "4".to_string(),
            },
        ];
        let totals = country_goal_totals(&events);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].team, "Brazil");
        assert_eq!(totals[0].total_goals, 5.0);
        assert_eq!(totals[1].total_goals, 4.0);
    }

    #[test]
    fn yearly_series_filters_and_orders_by_year() {
        let matches = vec![
            tournament(1934, "Italy", "Italy"),
            tournament(1930, "Uruguay", "Uruguay"),
            tournament(1938, "France", "Italy"),
        ];
        let all = yearly_series(&matches, TrendMetric::QualifiedTeams, &[]);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].year, 1930);
        assert_eq!(all[2].year, 1938);

        let filtered = yearly_series(&matches, TrendMetric::Attendance, &[1930, 1934]);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|point| point.value == 1000));
    }

    #[test]
    fn final_positions_pivot_defaults_missing_cells_to_zero() {
        let mut first = tournament(1930, "Uruguay", "Uruguay");
        first.runners_up = "Argentina".to_string();
        first.third = "USA".to_string();
        first.fourth = "Yugoslavia".to_string();
        let mut second = tournament(1950, "Brazil", "Uruguay");
        second.runners_up = "Brazil".to_string();
        second.third = "Sweden".to_string();
        second.fourth = "Spain".to_string();

        let pivot = final_positions(&[first, second], &[]);
        let uruguay = pivot
            .iter()
            .find(|row| row.country == "Uruguay")
            .expect("Uruguay row");
        assert_eq!(uruguay.winner, 2);
        assert_eq!(uruguay.runners_up, 0);
        let argentina = pivot
            .iter()
            .find(|row| row.country == "Argentina")
            .expect("Argentina row");
        assert_eq!(argentina.runners_up, 1);
        assert_eq!(argentina.winner + argentina.third + argentina.fourth, 0);
        // Alphabetical pivot order keeps the chart axis deterministic.
        let names: Vec<&str> = pivot.iter().map(|row| row.country.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn absent_country_lookup_returns_none() {
        let summaries = vec![CountrySummaryRecord {
            country: "Uruguay".to_string(),
            matches_played: 59,
            wins: 24,
            losses: 22,
            home_wins: 4,
            world_cups_won: 2,
            world_cup_locations: "1930".to_string(),
            shootout_wins: 3,
        }];
        assert!(country_summary(&summaries, "Uruguay").is_some());
        assert!(country_summary(&summaries, "Atlantis").is_none());
    }
}
