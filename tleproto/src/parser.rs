//! Groups raw catalog text into checksum-verified TLE records

use crate::error::{MalformedReason, TleError};
use tletypes::prelude::*;
use tracing::{debug, warn};

/// A triple that was dropped, and why
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    /// Position of the triple in the input, counting from 0
    pub index: usize,
    pub name: String,
    pub error: TleError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TleSet {
    /// Valid records, in input order, duplicates included
    pub records: Vec<TleRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse catalog text made of `name`, `line 1`, `line 2` triples.
///
/// Blank lines are ignored and surrounding whitespace is stripped. A line count
/// that isn't a multiple of three fails the whole call, while a bad triple is
/// only skipped.
pub fn parse_tle_set(text: &str) -> Result<TleSet, TleError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let dangling = lines.len() % 3;
    if dangling != 0 {
        return Err(TleError::TruncatedInput {
            lines: lines.len(),
            dangling,
        });
    }

    let mut set = TleSet::default();
    for (index, triple) in lines.chunks_exact(3).enumerate() {
        let (name, line1, line2) = (triple[0], triple[1], triple[2]);
        match tle(name, line1, line2) {
            Ok(record) => {
                debug!(index, satellite = name, "Parsed TLE");
                set.records.push(record);
            }
            Err(error) => {
                warn!(index, satellite = name, %error, "Skipping TLE");
                set.skipped.push(SkippedRecord {
                    index,
                    name: name.to_string(),
                    error,
                });
            }
        }
    }

    Ok(set)
}

fn tle(name: &str, line1: &str, line2: &str) -> Result<TleRecord, TleError> {
    verify_line(line1, 1)?;
    verify_line(line2, 2)?;
    Ok(TleRecord::new(name, line1, line2))
}

/// Check the length, checksum and leading line number of one element line
pub fn verify_line(line: &str, number: u8) -> Result<(), TleError> {
    let malformed = |reason| TleError::MalformedLine {
        line: number,
        reason,
    };

    let len = line.chars().count();
    if len != TLE_LINE_LEN {
        return Err(malformed(MalformedReason::Length(len)));
    }
    if !line.is_ascii() {
        return Err(malformed(MalformedReason::NonAscii));
    }

    let bytes = line.as_bytes();
    let expected = checksum(line);
    let found = char::from(bytes[TLE_LINE_LEN - 1]);
    if found.to_digit(10) != Some(u32::from(expected)) {
        return Err(TleError::Checksum {
            line: number,
            expected,
            found,
        });
    }

    let expected = char::from(b'0' + number);
    let found = char::from(bytes[0]);
    if found != expected {
        return Err(malformed(MalformedReason::LineNumber { expected, found }));
    }

    Ok(())
}

/// Modulo-10 sum over columns 1-68: digits count their value, '-' counts 1
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(TLE_LINE_LEN - 1)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum();
    (sum % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TLE_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578

        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    const ISS_LINE1: &str =
        "1 25544U 98067A   25278.49802050  .00011384  00000+0  20935-3 0  9990";
    const ISS_LINE2: &str =
        "2 25544  51.6327 120.3420 0000884 206.2421 153.8523 15.49697304532279";

    fn iss(name: &str) -> String {
        format!("{name}\n{ISS_LINE1}\n{ISS_LINE2}\n")
    }

    #[test]
    fn parse_tle() {
        let set = parse_tle_set(TLE_SET).unwrap();
        assert!(set.skipped.is_empty());
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].name, "GEO1");
        assert_eq!(set.records[1].name, "GEO2");
        assert!(set.records[1].line2.ends_with("37822"));
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        let text = format!("  ISS (ZARYA)   \r\n\t{ISS_LINE1}  \r\n   {ISS_LINE2}\r\n\r\n");
        let set = parse_tle_set(&text).unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].name, "ISS (ZARYA)");
        assert_eq!(set.records[0].line1, ISS_LINE1);
        assert_eq!(set.records[0].line2, ISS_LINE2);
    }

    #[test]
    fn triples_and_truncation() {
        for k in 0..4 {
            let text: String = (0..k).map(|i| iss(&format!("SAT{i}"))).collect();
            let set = parse_tle_set(&text).unwrap();
            assert_eq!(set.records.len(), k);

            let one_extra = format!("{text}EXTRA\n");
            assert_eq!(
                parse_tle_set(&one_extra),
                Err(TleError::TruncatedInput {
                    lines: 3 * k + 1,
                    dangling: 1
                })
            );

            let two_extra = format!("{text}EXTRA\n{ISS_LINE1}\n");
            let err = parse_tle_set(&two_extra).unwrap_err();
            assert!(err.is_fatal());
            assert_eq!(
                err,
                TleError::TruncatedInput {
                    lines: 3 * k + 2,
                    dangling: 2
                }
            );
        }
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let text = format!("{}{}{}", iss("A"), iss("B"), iss("A"));
        let set = parse_tle_set(&text).unwrap();
        let names: Vec<&str> = set.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "A"]);
        assert_eq!(set.records[0], set.records[2]);
    }

    #[test]
    fn wrong_length_is_skipped() {
        let short = &ISS_LINE2[..68];
        let text = format!("SHORT\n{ISS_LINE1}\n{short}\n{}", iss("OK"));
        let set = parse_tle_set(&text).unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].name, "OK");
        assert_eq!(
            set.skipped,
            vec![SkippedRecord {
                index: 0,
                name: "SHORT".to_string(),
                error: TleError::MalformedLine {
                    line: 2,
                    reason: MalformedReason::Length(68)
                },
            }]
        );
    }

    #[test]
    fn non_ascii_is_malformed() {
        let line = format!("{}é", &ISS_LINE1[..68]);
        assert_eq!(
            verify_line(&line, 1),
            Err(TleError::MalformedLine {
                line: 1,
                reason: MalformedReason::NonAscii
            })
        );
    }

    #[test]
    fn checksum_of_known_lines() {
        assert_eq!(checksum(ISS_LINE1), 0);
        assert_eq!(checksum(ISS_LINE2), 9);
        assert!(verify_line(ISS_LINE1, 1).is_ok());
        assert!(verify_line(ISS_LINE2, 2).is_ok());
    }

    #[test]
    fn any_digit_mutation_breaks_checksum() {
        for (line, number) in [(ISS_LINE1, 1), (ISS_LINE2, 2)] {
            for (col, c) in line.char_indices().take(TLE_LINE_LEN - 1) {
                let Some(d) = c.to_digit(10) else {
                    continue;
                };
                let mut mutated = line.to_string();
                let replacement = char::from_digit((d + 1) % 10, 10).unwrap();
                mutated.replace_range(col..col + 1, &replacement.to_string());

                match verify_line(&mutated, number) {
                    Err(TleError::Checksum { line, .. }) => assert_eq!(line, number),
                    other => panic!("column {} mutation not rejected: {other:?}", col + 1),
                }

                let (line1, line2) = if number == 1 {
                    (mutated.as_str(), ISS_LINE2)
                } else {
                    (ISS_LINE1, mutated.as_str())
                };
                let text = format!("MUTATED\n{line1}\n{line2}\n");
                let set = parse_tle_set(&text).unwrap();
                assert!(set.records.is_empty());
                assert!(matches!(set.skipped[0].error, TleError::Checksum { .. }));
            }
        }
    }

    #[test]
    fn non_digit_checksum_column() {
        let line = format!("{}X", &ISS_LINE1[..68]);
        assert_eq!(
            verify_line(&line, 1),
            Err(TleError::Checksum {
                line: 1,
                expected: 0,
                found: 'X'
            })
        );
    }

    #[test]
    fn swapped_lines_are_malformed() {
        assert_eq!(
            verify_line(ISS_LINE2, 1),
            Err(TleError::MalformedLine {
                line: 1,
                reason: MalformedReason::LineNumber {
                    expected: '1',
                    found: '2'
                }
            })
        );
    }
}
