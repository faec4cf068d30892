use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use tracker_lib::{config::Config, source::TleSource, table::PositionTable, Pipeline};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about = "Propagate TLE sets into a position table")]
struct Opts {
    /// Tracker configuration toml file.
    ///
    /// Its sources are processed before any TLE files given on the command line.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time between steps, e.g. '1h' or '90s'. Overrides the config file.
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Number of steps per satellite. Overrides the config file.
    #[arg(long)]
    step_count: Option<usize>,

    /// Output table format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TLE files, three lines per satellite
    tle_files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let mut cfg = match &opts.config {
        Some(p) => Config::load(p)?,
        None => Config::default(),
    };
    if let Some(interval) = opts.interval {
        cfg.interval_seconds = Some(interval.as_secs());
    }
    if let Some(n) = opts.step_count {
        cfg.step_count = Some(n);
    }
    let series_cfg = cfg.series_config()?;

    let mut sources = cfg.sources();
    sources.extend(opts.tle_files.iter().map(TleSource::file));
    if sources.is_empty() {
        return Err("No TLE sources, provide a config file or TLE files".into());
    }

    if let Some(name) = &cfg.name {
        info!(name = %name, "Loaded config");
    }
    info!(sources = sources.len(), series = %series_cfg, "Starting");

    let out = Pipeline::two_body(series_cfg).run(&sources);
    for skipped in out.report.skipped.iter() {
        warn!("{skipped}");
    }
    info!("{}", out.report);

    match &opts.output {
        Some(p) => write_table(&out.table, opts.format, BufWriter::new(File::create(p)?))?,
        None => write_table(&out.table, opts.format, io::stdout().lock())?,
    }

    Ok(())
}

fn write_table<W: Write>(table: &PositionTable, format: Format, w: W) -> io::Result<()> {
    match format {
        Format::Csv => table.write_csv(w),
        Format::Json => table.write_json(w),
    }
}
