pub mod aggregate;
pub mod assets;
pub mod chart;
pub mod cli;
pub mod datasets;
pub mod handlers;
pub mod io_utils;
pub mod manifest;
pub mod table;

use std::{env, fs, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, info};

use crate::{
    cli::{
        ChartArgs, ChartKind, Cli, Commands, CountryArgs, DataArgs, GoalsArgs, PortraitArgs,
        TrendsArgs,
    },
    datasets::LoadOptions,
    handlers::DashboardContext,
    manifest::{DatasetManifest, DatasetPaths},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("worldcup_insights", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Wins(args) => handle_wins(&args.data),
        Commands::Scorers(args) => handle_scorers(&args.data),
        Commands::Summary(args) => handle_summary(&args.data),
        Commands::Goals(args) => handle_goals(&args),
        Commands::Trends(args) => handle_trends(&args),
        Commands::Country(args) => handle_country(&args),
        Commands::Portrait(args) => handle_portrait(&args),
        Commands::Chart(args) => handle_chart(&args),
    }
}

fn resolve_paths(data: &DataArgs) -> Result<DatasetPaths> {
    let mut paths = DatasetPaths::from_dir(&data.data_dir);
    if let Some(manifest_path) = &data.manifest {
        let manifest = DatasetManifest::load(manifest_path)?;
        manifest.apply(&mut paths);
    }
    if let Some(winners) = &data.winners {
        paths.winners = winners.clone();
    }
    if let Some(goal_events) = &data.goal_events {
        paths.goal_events = goal_events.clone();
    }
    if let Some(top_scorers) = &data.top_scorers {
        paths.top_scorers = top_scorers.clone();
    }
    if let Some(country_summary) = &data.country_summary {
        paths.country_summary = country_summary.clone();
    }
    Ok(paths)
}

fn load_context(data: &DataArgs) -> Result<DashboardContext> {
    let paths = resolve_paths(data)?;
    let options = LoadOptions {
        delimiter: data.delimiter,
        encoding: io_utils::resolve_encoding(data.input_encoding.as_deref())?,
    };
    let ctx = DashboardContext::initialize(&paths, &options)?;
    Ok(ctx)
}

fn handle_wins(data: &DataArgs) -> Result<()> {
    let ctx = load_context(data)?;
    let headers = vec![
        "Country".to_string(),
        "World_Cups_Won".to_string(),
        "World_Cups_Won_at_Home".to_string(),
    ];
    let rows = ctx
        .win_counts()
        .iter()
        .map(|row| {
            vec![
                row.country.clone(),
                row.world_cups_won.to_string(),
                row.won_at_home.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    info!("Tabulated win counts for {} country(ies)", rows.len());
    Ok(())
}

fn handle_scorers(data: &DataArgs) -> Result<()> {
    let ctx = load_context(data)?;
    let headers = vec![
        "Year".to_string(),
        "Top_Scorer".to_string(),
        "Goals_Scored".to_string(),
        "Country".to_string(),
    ];
    let rows = ctx
        .top_scorers()
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                row.top_scorer.clone(),
                row.goals_scored.to_string(),
                row.country.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    info!("Tabulated top scorers for {} tournament(s)", rows.len());
    Ok(())
}

fn handle_summary(data: &DataArgs) -> Result<()> {
    let ctx = load_context(data)?;
    let summary = handlers::summary_rows(&ctx);
    let headers = vec![
        "Year".to_string(),
        "Winner".to_string(),
        "Top_Scorer".to_string(),
        "Goals_Scored".to_string(),
    ];
    let rows = summary
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                row.winner.clone(),
                row.top_scorer.clone(),
                row.goals_scored.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    info!("Tabulated {} joined tournament row(s)", rows.len());
    Ok(())
}

fn handle_goals(args: &GoalsArgs) -> Result<()> {
    let ctx = load_context(&args.data)?;
    let mut totals = handlers::goal_totals(&ctx);
    if args.top > 0 && totals.len() > args.top {
        totals.truncate(args.top);
    }
    let headers = vec!["team".to_string(), "total_goals".to_string()];
    let rows = totals
        .iter()
        .map(|row| vec![row.team.clone(), format_number(row.total_goals)])
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    info!("Tabulated goal totals for {} team(s)", rows.len());
    Ok(())
}

fn handle_trends(args: &TrendsArgs) -> Result<()> {
    let ctx = load_context(&args.data)?;
    if !args.years.is_empty() {
        info!(
            "Restricting trends to year(s) {}",
            args.years.iter().join(", ")
        );
    }
    let charts = handlers::filter_years(&ctx, &args.years);
    for spec in [
        &charts.attendance,
        &charts.final_positions,
        &charts.matches_played,
        &charts.qualified_teams,
    ] {
        println!("{}", spec.title);
        print_spec_table(spec);
        println!();
    }
    Ok(())
}

fn handle_country(args: &CountryArgs) -> Result<()> {
    let ctx = load_context(&args.data)?;
    let detail = handlers::map_click(&ctx, args.name.as_deref());
    println!("{detail}");
    Ok(())
}

fn handle_portrait(args: &PortraitArgs) -> Result<()> {
    let lookup = handlers::scorer_click(args.name.as_deref());
    println!("{lookup}");
    Ok(())
}

fn handle_chart(args: &ChartArgs) -> Result<()> {
    let ctx = load_context(&args.data)?;
    let spec = match args.kind {
        ChartKind::Choropleth => handlers::select_metric(&ctx, args.metric),
        ChartKind::WinBar => handlers::win_count_chart(&ctx),
        ChartKind::TopScorers => handlers::top_scorer_chart(&ctx),
        ChartKind::Attendance => handlers::filter_years(&ctx, &args.years).attendance,
        ChartKind::QualifiedTeams => handlers::filter_years(&ctx, &args.years).qualified_teams,
        ChartKind::MatchesPlayed => handlers::filter_years(&ctx, &args.years).matches_played,
        ChartKind::FinalPositions => handlers::filter_years(&ctx, &args.years).final_positions,
    };
    let json = serde_json::to_string_pretty(&spec).context("Serializing chart spec")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Writing chart spec to {path:?}"))?;
            info!("Chart spec for {} point(s) written to {:?}", spec.data.len(), path);
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Renders a spec's embedded rows as a table keyed by its encoded fields.
fn print_spec_table(spec: &chart::ChartSpec) {
    let mut columns: Vec<String> = Vec::new();
    if let Some(x) = &spec.x {
        columns.push(x.field.clone());
    }
    if let Some(locations) = &spec.locations {
        columns.push(locations.field.clone());
    }
    for channel in &spec.y {
        columns.push(channel.field.clone());
    }
    let rows = spec
        .data
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| match &row[column.as_str()] {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::print_table(&columns, &rows);
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
