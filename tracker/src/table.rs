//! Flattened position table across all satellites

use serde::{Serialize, Serializer};
use std::io::{self, Write};
use tletypes::prelude::*;

pub const CSV_HEADER: &str = "satellite_name,time,x,y,z";

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct PositionRow {
    pub satellite_name: String,
    #[serde(serialize_with = "serialize_iso8601")]
    pub time: UtcTimestamp,
    /// [km]
    pub x: f64,
    /// [km]
    pub y: f64,
    /// [km]
    pub z: f64,
}

fn serialize_iso8601<S: Serializer>(t: &UtcTimestamp, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso8601(t))
}

/// Rows in satellite input order, ascending time within each satellite.
/// Repeated satellites are kept as-is.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PositionTable {
    rows: Vec<PositionRow>,
}

impl PositionTable {
    pub fn assemble<I>(series: I) -> Self
    where
        I: IntoIterator<Item = TimeSeries>,
    {
        let mut table = Self::default();
        for s in series {
            table.append(s);
        }
        table
    }

    pub fn append(&mut self, series: TimeSeries) {
        let (name, steps) = series.into_parts();
        self.rows.reserve(steps.len());
        self.rows.extend(steps.into_iter().map(|step| PositionRow {
            satellite_name: name.clone(),
            time: step.time,
            x: step.x(),
            y: step.y(),
            z: step.z(),
        }));
    }

    pub fn rows(&self) -> &[PositionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_csv<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{CSV_HEADER}")?;
        for row in self.rows.iter() {
            writeln!(
                w,
                "{},{},{},{},{}",
                csv_field(&row.satellite_name),
                iso8601(&row.time),
                row.x,
                row.y,
                row.z
            )?;
        }
        w.flush()
    }

    pub fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut w, &self.rows)?;
        writeln!(w)?;
        w.flush()
    }
}

/// Quote a CSV field when it contains a separator, quote or line break
pub fn csv_field(s: &str) -> std::borrow::Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\"")).into()
    } else {
        s.into()
    }
}
