use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::chart::MapMetric;

#[derive(Debug, Parser)]
#[command(author, version, about = "Aggregate and chart historical World Cup datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tabulate World Cups won and won at home per country
    Wins(WinsArgs),
    /// Tabulate the top scorer of each tournament year
    Scorers(ScorersArgs),
    /// Tabulate each tournament's winner joined with its top scorer
    Summary(SummaryArgs),
    /// Tabulate total goals scored per country
    Goals(GoalsArgs),
    /// Tabulate per-year turnout metrics and final positions
    Trends(TrendsArgs),
    /// Show the stored summary for one country
    Country(CountryArgs),
    /// Resolve a top scorer's portrait resource
    Portrait(PortraitArgs),
    /// Emit a chart specification as JSON
    Chart(ChartArgs),
}

/// Dataset location and read options shared by data-driven commands.
#[derive(Debug, Args)]
pub struct DataArgs {
    /// Directory containing the conventional dataset file names
    #[arg(short = 'd', long = "data-dir", default_value = ".")]
    pub data_dir: PathBuf,
    /// YAML manifest naming dataset files (overrides --data-dir entries)
    #[arg(short = 'm', long = "manifest")]
    pub manifest: Option<PathBuf>,
    /// Winners/placements dataset (overrides the manifest)
    #[arg(long)]
    pub winners: Option<PathBuf>,
    /// Goal-events dataset (overrides the manifest)
    #[arg(long = "goal-events")]
    pub goal_events: Option<PathBuf>,
    /// Top-scorers dataset (overrides the manifest)
    #[arg(long = "top-scorers")]
    pub top_scorers: Option<PathBuf>,
    /// Country-summary dataset (overrides the manifest)
    #[arg(long = "country-summary")]
    pub country_summary: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct WinsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Args)]
pub struct ScorersArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Args)]
pub struct GoalsArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Maximum teams to display (0 = all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Restrict the series to these tournament years (empty = all)
    #[arg(long = "years", value_delimiter = ',')]
    pub years: Vec<u16>,
}

#[derive(Debug, Args)]
pub struct CountryArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Country name as it appears in the summary dataset
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct PortraitArgs {
    /// Scorer name as plotted on the top-scorer chart
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ChartKind {
    Choropleth,
    WinBar,
    TopScorers,
    Attendance,
    QualifiedTeams,
    MatchesPlayed,
    FinalPositions,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Which chart specification to build
    #[arg(long, value_enum)]
    pub kind: ChartKind,
    /// Country-summary column coloring the choropleth
    #[arg(long, value_enum, default_value = "wins")]
    pub metric: MapMetric,
    /// Restrict trend charts to these tournament years (empty = all)
    #[arg(long = "years", value_delimiter = ',')]
    pub years: Vec<u16>,
    /// Write the JSON spec to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
