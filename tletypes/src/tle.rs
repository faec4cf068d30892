use derive_more::Display;
use serde::Serialize;

/// Both element lines are fixed at 69 columns, checksum digit included
pub const TLE_LINE_LEN: usize = 69;

/// A named two-line element set
/// https://en.wikipedia.org/wiki/Two-line_element_set
///
/// Only the parser builds these, after it has checked line lengths and checksums.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Display, Serialize)]
#[display(fmt = "{}", "name")]
pub struct TleRecord {
    #[serde(rename = "satellite_name")]
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    pub fn new<N: Into<String>, L1: Into<String>, L2: Into<String>>(
        name: N,
        line1: L1,
        line2: L2,
    ) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}
