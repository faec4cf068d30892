//! Sources in, one position table out

use crate::propagation::{PropagationError, Propagator, TwoBody};
use crate::source::TleSource;
use crate::table::PositionTable;
use crate::time_series::{SeriesConfig, SeriesGenerator};
use derive_more::Display;
use std::fmt;
use tleproto::{extract_elements, parse_tle_set, TleError, TleSet};
use tletypes::prelude::*;
use tracing::{info, warn};

#[derive(Clone, PartialEq, Debug, Display)]
pub enum SkipReason {
    #[display(fmt = "source unavailable: {}", _0)]
    Source(String),
    #[display(fmt = "truncated input: {}", _0)]
    Truncated(TleError),
    #[display(fmt = "invalid record: {}", _0)]
    Record(TleError),
    #[display(fmt = "invalid elements: {}", _0)]
    Elements(TleError),
    #[display(fmt = "{}", _0)]
    Epoch(EpochParseError),
    #[display(fmt = "step {} skipped: {}", index, error)]
    Step {
        index: usize,
        time: Option<UtcTimestamp>,
        error: PropagationError,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub struct Skipped {
    pub source: String,
    /// `None` when a whole source was skipped
    pub satellite: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.satellite {
            Some(sat) => write!(f, "[{}] {sat}: {}", self.source, self.reason),
            None => write!(f, "[{}] {}", self.source, self.reason),
        }
    }
}

/// Diagnostic summary of a run
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Report {
    pub skipped: Vec<Skipped>,
    /// Sources that were read and parsed
    pub sources: usize,
    /// Checksum-valid records across all sources
    pub records: usize,
    pub satellites_emitted: usize,
    pub rows: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources, {} records, {} satellites, {} rows, {} skipped",
            self.sources,
            self.records,
            self.satellites_emitted,
            self.rows,
            self.skipped.len()
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct PipelineOutput {
    pub table: PositionTable,
    pub report: Report,
}

#[derive(Clone, Debug)]
pub struct Pipeline<P = TwoBody> {
    generator: SeriesGenerator<P>,
}

impl Pipeline<TwoBody> {
    pub fn two_body(config: SeriesConfig) -> Self {
        Self::new(config, TwoBody::default())
    }
}

impl<P: Propagator> Pipeline<P> {
    pub fn new(config: SeriesConfig, propagator: P) -> Self {
        Self {
            generator: SeriesGenerator::new(config, propagator),
        }
    }

    /// Process every source in order. Failures are isolated to the smallest
    /// unit (step, satellite, record, source) and listed in the report.
    pub fn run(&self, sources: &[TleSource]) -> PipelineOutput {
        let mut table = PositionTable::default();
        let mut report = Report::default();
        for source in sources.iter() {
            self.run_source(source, &mut table, &mut report);
        }
        report.rows = table.len();
        info!(%report, "Pipeline complete");
        PipelineOutput { table, report }
    }

    pub fn run_text(&self, name: &str, text: &str) -> PipelineOutput {
        self.run(&[TleSource::inline(name, text)])
    }

    fn run_source(&self, source: &TleSource, table: &mut PositionTable, report: &mut Report) {
        let src = source.name();
        let skip = |satellite: Option<&str>, reason| Skipped {
            source: src.to_string(),
            satellite: satellite.map(str::to_string),
            reason,
        };

        let set = match parse_source(source) {
            Ok(set) => set,
            Err(skipped) => {
                report.skipped.push(skipped);
                return;
            }
        };
        info!(
            source = src,
            records = set.records.len(),
            skipped = set.skipped.len(),
            "Loaded source"
        );
        report.sources += 1;
        report.records += set.records.len();
        for s in set.skipped {
            report
                .skipped
                .push(skip(Some(&s.name), SkipReason::Record(s.error)));
        }

        for record in set.records.iter() {
            let name = record.name.as_str();
            let elements = match extract_elements(record) {
                Ok(el) => el,
                Err(e) => {
                    warn!(source = src, satellite = name, error = %e, "Skipping satellite");
                    report.skipped.push(skip(Some(name), SkipReason::Elements(e)));
                    continue;
                }
            };

            let outcome = match self.generator.generate(name, &elements) {
                Ok(o) => o,
                Err(e) => {
                    warn!(source = src, satellite = name, error = %e, "Skipping satellite");
                    report.skipped.push(skip(Some(name), SkipReason::Epoch(e)));
                    continue;
                }
            };

            for s in outcome.skipped_steps {
                report.skipped.push(skip(
                    Some(name),
                    SkipReason::Step {
                        index: s.index,
                        time: s.time,
                        error: s.error,
                    },
                ));
            }
            if !outcome.series.is_empty() {
                report.satellites_emitted += 1;
            }
            table.append(outcome.series);
        }
    }
}

/// Load and parse one source. An unreadable or truncated source comes back as
/// a whole-source skip, already logged.
pub fn parse_source(source: &TleSource) -> Result<TleSet, Skipped> {
    let skip = |reason| Skipped {
        source: source.name().to_string(),
        satellite: None,
        reason,
    };

    let text = source.load().map_err(|e| {
        warn!(source = source.name(), error = %e, "Skipping source");
        skip(SkipReason::Source(e.to_string()))
    })?;
    parse_tle_set(&text).map_err(|e| {
        warn!(source = source.name(), error = %e, "Skipping source");
        skip(SkipReason::Truncated(e))
    })
}
