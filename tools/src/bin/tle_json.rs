// cargo run --bin tle-json -- scenarios/tle/geo.tle

use clap::Parser;
use std::fs::File;
use std::io::{self, prelude::*, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracker_lib::{pipeline::parse_source, source::TleSource};

/// Dump the checksum-valid TLE records as JSON
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let mut records = Vec::new();
    for source in opts.tle_files.iter().map(TleSource::file) {
        // Unreadable and truncated files are logged and skipped
        let Ok(set) = parse_source(&source) else {
            continue;
        };
        info!(
            source = source.name(),
            records = set.records.len(),
            skipped = set.skipped.len(),
            "Parsed"
        );
        records.extend(set.records);
    }

    let mut out: Box<dyn Write> = match &opts.output {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
