// cargo run --bin tle-elements -- scenarios/tle/stations.tle scenarios/tle/geo.tle -o /tmp/elements.csv

use clap::Parser;
use std::fs::File;
use std::io::{self, prelude::*, BufWriter};
use std::path::PathBuf;
use tleproto::extract_elements;
use tletypes::prelude::*;
use tracing::warn;
use tracker_lib::{pipeline::parse_source, source::TleSource, table::csv_field};

/// Print the orbital elements of every satellite as CSV
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Output file path to write, stdout when not provided
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TLE files, three lines per satellite
    #[arg(required = true)]
    tle_files: Vec<PathBuf>,
}

const HEADER: &str = "satellite_name,norad_id,inclination_deg,raan_deg,eccentricity,arg_perigee_deg,mean_anomaly_deg,mean_motion_rev_per_day,epoch";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let mut out: Box<dyn Write> = match &opts.output {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(io::stdout().lock()),
    };
    writeln!(out, "{HEADER}")?;

    for source in opts.tle_files.iter().map(TleSource::file) {
        // Unreadable and truncated files are logged and skipped
        let Ok(set) = parse_source(&source) else {
            continue;
        };
        for record in set.records.iter() {
            let el = match extract_elements(record) {
                Ok(el) => el,
                Err(e) => {
                    warn!(satellite = %record.name, error = %e, "Skipping satellite");
                    continue;
                }
            };
            let epoch = match el.epoch.instant() {
                Ok(t) => t,
                Err(e) => {
                    warn!(satellite = %record.name, error = %e, "Skipping satellite");
                    continue;
                }
            };
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                csv_field(&record.name),
                el.norad_id,
                el.inclination_deg,
                el.raan_deg,
                el.eccentricity,
                el.arg_perigee_deg,
                el.mean_anomaly_deg,
                el.mean_motion_rev_per_day,
                iso8601(&epoch),
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
