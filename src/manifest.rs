//! Dataset location resolution.
//!
//! Paths resolve in three layers: conventional file names inside
//! `--data-dir`, overridden by an optional YAML manifest, overridden by
//! individual CLI flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const WINNERS_FILE: &str = "winners.csv";
pub const GOAL_EVENTS_FILE: &str = "goalscorers.csv";
pub const TOP_SCORERS_FILE: &str = "scorer_worldcup.csv";
pub const COUNTRY_SUMMARY_FILE: &str = "summary_combined.csv";

/// Resolved locations of the four input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub winners: PathBuf,
    pub goal_events: PathBuf,
    pub top_scorers: PathBuf,
    pub country_summary: PathBuf,
}

impl DatasetPaths {
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            winners: dir.join(WINNERS_FILE),
            goal_events: dir.join(GOAL_EVENTS_FILE),
            top_scorers: dir.join(TOP_SCORERS_FILE),
            country_summary: dir.join(COUNTRY_SUMMARY_FILE),
        }
    }
}

/// YAML manifest naming some or all dataset files. Relative entries are
/// resolved against the manifest's own directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetManifest {
    pub winners: Option<PathBuf>,
    pub goal_events: Option<PathBuf>,
    pub top_scorers: Option<PathBuf>,
    pub country_summary: Option<PathBuf>,
}

impl DatasetManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Opening manifest {path:?}"))?;
        let mut manifest: DatasetManifest =
            serde_yaml::from_str(&raw).with_context(|| format!("Parsing manifest {path:?}"))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for entry in [
            &mut manifest.winners,
            &mut manifest.goal_events,
            &mut manifest.top_scorers,
            &mut manifest.country_summary,
        ] {
            if let Some(relative) = entry.take() {
                *entry = Some(if relative.is_absolute() {
                    relative
                } else {
                    base.join(relative)
                });
            }
        }
        Ok(manifest)
    }

    pub fn apply(&self, paths: &mut DatasetPaths) {
        if let Some(winners) = &self.winners {
            paths.winners = winners.clone();
        }
        if let Some(goal_events) = &self.goal_events {
            paths.goal_events = goal_events.clone();
        }
        if let Some(top_scorers) = &self.top_scorers {
            paths.top_scorers = top_scorers.clone();
        }
        if let Some(country_summary) = &self.country_summary {
            paths.country_summary = country_summary.clone();
        }
    }
}
