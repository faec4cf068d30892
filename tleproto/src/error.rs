use tletypes::prelude::*;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TleError {
    #[error("Input has {dangling} trailing line(s) that do not complete a TLE ({lines} non-blank lines)")]
    TruncatedInput { lines: usize, dangling: usize },
    #[error("Malformed TLE line {line}: {reason}")]
    MalformedLine { line: u8, reason: MalformedReason },
    #[error("Checksum mismatch on TLE line {line}: computed {expected}, found '{found}'")]
    Checksum { line: u8, expected: u8, found: char },
    #[error("NORAD ID differs between line 1 ({line1_id}) and line 2 ({line2_id})")]
    RecordInconsistency { line1_id: NoradId, line2_id: NoradId },
    #[error("Field '{field}' is out of range: {value}")]
    FieldRange { field: &'static str, value: f64 },
}

impl TleError {
    /// Only truncated input aborts a whole parse, everything else costs one record
    pub fn is_fatal(&self) -> bool {
        matches!(self, TleError::TruncatedInput { .. })
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    #[error("expected {} characters, found {0}", TLE_LINE_LEN)]
    Length(usize),
    #[error("contains non-ASCII characters")]
    NonAscii,
    #[error("expected line number '{expected}', found '{found}'")]
    LineNumber { expected: char, found: char },
    #[error("field '{field}' does not decode: '{text}'")]
    Field { field: &'static str, text: String },
}
