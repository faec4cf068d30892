//! Parsing and decoding of the fixed-column two-line element format

pub use crate::elements::extract_elements;
pub use crate::error::{MalformedReason, TleError};
pub use crate::parser::{checksum, parse_tle_set, verify_line, SkippedRecord, TleSet};

pub mod elements;
pub mod error;
pub mod parser;
