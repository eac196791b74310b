//! Declarative chart specifications.
//!
//! A [`ChartSpec`] names a mark type, channel encodings, presentation
//! hints, and the embedded data rows; the rendering layer decides what to
//! do with it. Builders are pure: the same aggregated table always yields
//! the same spec.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    aggregate::{PositionCounts, TopScorer, TrendPoint, WinCount},
    datasets::CountrySummaryRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Scatter,
    Line,
    Bar,
    Choropleth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Stack,
}

/// A field-to-channel binding with an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Channel {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            label: None,
        }
    }

    fn labeled(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// The column of the country summary driving the choropleth color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum MapMetric {
    Wins,
    Losses,
    HomeWins,
}

impl MapMetric {
    pub fn column(&self) -> &'static str {
        match self {
            MapMetric::Wins => "Wins",
            MapMetric::Losses => "Losses",
            MapMetric::HomeWins => "Home Wins",
        }
    }

    fn value(&self, row: &CountrySummaryRecord) -> i64 {
        match self {
            MapMetric::Wins => row.wins,
            MapMetric::Losses => row.losses,
            MapMetric::HomeWins => row.home_wins,
        }
    }
}

impl std::fmt::Display for MapMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub mark: Mark,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hover: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<String>,
    pub data: Vec<Value>,
}

impl ChartSpec {
    fn new(title: &str, mark: Mark, data: Vec<Value>) -> Self {
        Self {
            title: title.to_string(),
            mark,
            x: None,
            y: Vec::new(),
            y_title: None,
            color: None,
            text: None,
            hover: Vec::new(),
            locations: None,
            location_mode: None,
            color_scale: None,
            bar_mode: None,
            markers: None,
            marker_size: None,
            text_position: None,
            data,
        }
    }
}

/// World map colored by the selected country-summary metric.
pub fn choropleth(summaries: &[CountrySummaryRecord], metric: MapMetric) -> ChartSpec {
    let data = summaries
        .iter()
        .map(|row| {
            json!({
                "Country": row.country,
                (metric.column()): metric.value(row),
            })
        })
        .collect();
    let mut spec = ChartSpec::new(&format!("Selection: {metric}"), Mark::Choropleth, data);
    spec.locations = Some(Channel::new("Country"));
    spec.location_mode = Some("country names".to_string());
    spec.color = Some(Channel::new(metric.column()));
    spec.color_scale = Some("viridis".to_string());
    spec.hover = vec!["Country".to_string()];
    spec
}

/// Grouped bars of titles won and titles won at home, per country.
pub fn win_count_bar(rows: &[WinCount]) -> ChartSpec {
    let data = rows
        .iter()
        .map(|row| {
            json!({
                "Country": row.country,
                "World_Cups_Won": row.world_cups_won,
                "World_Cups_Won_at_Home": row.won_at_home,
            })
        })
        .collect();
    let mut spec = ChartSpec::new("World Cups Won and Won at Home", Mark::Bar, data);
    spec.x = Some(Channel::labeled("Country", "Country"));
    spec.y = vec![
        Channel::new("World_Cups_Won"),
        Channel::new("World_Cups_Won_at_Home"),
    ];
    spec.y_title = Some("Number of World Cups".to_string());
    spec.bar_mode = Some(BarMode::Group);
    spec
}

/// Scatter of each tournament's top scorer, colored by country, with the
/// scorer's name as point text.
pub fn top_scorer_scatter(rows: &[TopScorer]) -> ChartSpec {
    let data = rows
        .iter()
        .map(|row| {
            json!({
                "Year": row.year,
                "Top_Scorer": row.top_scorer,
                "Goals_Scored": row.goals_scored,
                "Country": row.country,
            })
        })
        .collect();
    let mut spec = ChartSpec::new("Top Scorers and Goals Scored by Year", Mark::Scatter, data);
    spec.x = Some(Channel::labeled("Year", "World Cup Year"));
    spec.y = vec![Channel::labeled("Goals_Scored", "Goals Scored")];
    spec.color = Some(Channel::new("Country"));
    spec.text = Some(Channel::new("Top_Scorer"));
    spec.hover = vec!["Top_Scorer".to_string(), "Country".to_string()];
    spec.marker_size = Some(12);
    spec.text_position = Some("top center".to_string());
    spec
}

/// Qualified teams per tournament year.
pub fn qualified_teams_trend(series: &[TrendPoint]) -> ChartSpec {
    trend_spec("Qualified Teams", Mark::Scatter, "QualifiedTeams", series)
}

/// Total attendance per tournament year, drawn as a marked line.
pub fn attendance_trend(series: &[TrendPoint]) -> ChartSpec {
    let mut spec = trend_spec("Attendance", Mark::Line, "Attendance", series);
    spec.markers = Some(true);
    spec
}

/// Matches played per tournament year.
pub fn matches_played_trend(series: &[TrendPoint]) -> ChartSpec {
    trend_spec("Matches Played", Mark::Scatter, "MatchesPlayed", series)
}

/// Stacked bars of placement counts per country.
pub fn final_positions_bar(rows: &[PositionCounts]) -> ChartSpec {
    let data = rows
        .iter()
        .map(|row| {
            json!({
                "Country": row.country,
                "Winner": row.winner,
                "RunnersUp": row.runners_up,
                "Third": row.third,
                "Fourth": row.fourth,
            })
        })
        .collect();
    let mut spec = ChartSpec::new("Final positions", Mark::Bar, data);
    spec.x = Some(Channel::labeled("Country", "Country"));
    spec.y = vec![
        Channel::new("Winner"),
        Channel::new("RunnersUp"),
        Channel::new("Third"),
        Channel::new("Fourth"),
    ];
    spec.y_title = Some("Quantity".to_string());
    spec.bar_mode = Some(BarMode::Stack);
    spec
}

fn trend_spec(title: &str, mark: Mark, column: &str, series: &[TrendPoint]) -> ChartSpec {
    let data = series
        .iter()
        .map(|point| json!({"Year": point.year, (column): point.value}))
        .collect();
    let mut spec = ChartSpec::new(title, mark, data);
    spec.x = Some(Channel::new("Year"));
    spec.y = vec![Channel::new(column)];
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_row(country: &str, wins: i64, losses: i64, home_wins: i64) -> CountrySummaryRecord {
        CountrySummaryRecord {
            country: country.to_string(),
            matches_played: wins + losses,
            wins,
            losses,
            home_wins,
            world_cups_won: 0,
            world_cup_locations: String::new(),
            shootout_wins: 0,
        }
    }

    #[test]
    fn choropleth_color_follows_the_selected_metric() {
        let summaries = vec![summary_row("Brazil", 76, 19, 10)];
        let wins = choropleth(&summaries, MapMetric::Wins);
        assert_eq!(wins.title, "Selection: Wins");
        assert_eq!(wins.color.as_ref().unwrap().field, "Wins");
        assert_eq!(wins.data[0]["Wins"], 76);

        let home = choropleth(&summaries, MapMetric::HomeWins);
        assert_eq!(home.title, "Selection: Home Wins");
        assert_eq!(home.color.as_ref().unwrap().field, "Home Wins");
        assert_eq!(home.data[0]["Home Wins"], 10);
    }

    #[test]
    fn builders_are_deterministic() {
        let rows = vec![WinCount {
            country: "Italy".to_string(),
            world_cups_won: 4,
            won_at_home: 1,
        }];
        assert_eq!(win_count_bar(&rows), win_count_bar(&rows));
    }

    #[test]
    fn win_count_bar_encodes_both_series_grouped() {
        let rows = vec![WinCount {
            country: "Uruguay".to_string(),
            world_cups_won: 2,
            won_at_home: 1,
        }];
        let spec = win_count_bar(&rows);
        assert_eq!(spec.mark, Mark::Bar);
        assert_eq!(spec.bar_mode, Some(BarMode::Group));
        assert_eq!(spec.y.len(), 2);
        assert_eq!(spec.data[0]["World_Cups_Won_at_Home"], 1);
    }

    #[test]
    fn scatter_spec_carries_text_and_hover_fields() {
        let rows = vec![TopScorer {
            year: 1930,
            top_scorer: "Guillermo Stábile".to_string(),
            goals_scored: 8,
            country: "Argentina".to_string(),
        }];
        let spec = top_scorer_scatter(&rows);
        assert_eq!(spec.text.as_ref().unwrap().field, "Top_Scorer");
        assert_eq!(spec.marker_size, Some(12));
        assert_eq!(spec.data[0]["Top_Scorer"], "Guillermo Stábile");
    }

    #[test]
    fn unused_channels_are_omitted_from_serialized_specs() {
        let spec = attendance_trend(&[TrendPoint {
            year: 1930,
            value: 590_549,
        }]);
        let value = serde_json::to_value(&spec).expect("serialize spec");
        assert_eq!(value["mark"], "line");
        assert_eq!(value["markers"], true);
        assert!(value.get("color").is_none());
        assert!(value.get("bar_mode").is_none());
        assert_eq!(value["data"][0]["Attendance"], 590_549);
    }
}
