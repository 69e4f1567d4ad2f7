//! Command-line interface argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::Selection;
use crate::data::model::AccessLevel;

/// Festival venue accessibility dashboard
///
/// Loads a venue table once and shows it on a traffic-light map with
/// year, venue and accessibility filters.
///
/// Examples:
///   fringe-access --data FringeDataCombined.csv
///   fringe-access --data venues.parquet --year 2023 --export map.json
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Venue table to load (.csv, .json, .parquet)
    ///
    /// Falls back to `[data] path` in the config file, then to a file dialog.
    #[arg(short, long, value_name = "FILE", env = "FRINGE_ACCESS_DATA")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for fringe-access.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the rendered figure and summary as JSON and exit
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Year to include in the export (repeatable)
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    /// Venue to include in the export (repeatable)
    #[arg(long = "venue", value_name = "NAME")]
    pub venues: Vec<String>,

    /// Raw accessibility level to include in the export (repeatable)
    #[arg(long = "level", value_name = "LEVEL")]
    pub levels: Vec<String>,
}

impl Args {
    /// The selection described by `--year`, `--venue` and `--level`.
    pub fn selection(&self) -> Selection {
        Selection {
            venues: self.venues.iter().cloned().collect(),
            levels: self.levels.iter().map(|l| AccessLevel::parse(l)).collect(),
            years: self.years.iter().copied().collect(),
        }
    }
}
