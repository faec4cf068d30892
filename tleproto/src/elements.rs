//! Decodes the fixed columns of a TLE into orbital elements

use crate::error::{MalformedReason, TleError};
use nom::{
    bytes::complete::take,
    character::complete::{digit1, space0, u32 as dec_u32, u8 as dec_u8},
    combinator::all_consuming,
    number::complete::double,
    sequence::{delimited, terminated},
    IResult,
};
use std::ops::RangeInclusive;
use tletypes::prelude::*;

/// 1-based inclusive column range
type Columns = RangeInclusive<usize>;

const NORAD_ID: Columns = 3..=7;

// Line 1
const EPOCH: Columns = 19..=32;

// Line 2
const INCLINATION: Columns = 9..=16;
const RAAN: Columns = 18..=25;
const ECCENTRICITY: Columns = 27..=33;
const ARG_PERIGEE: Columns = 35..=42;
const MEAN_ANOMALY: Columns = 44..=51;
const MEAN_MOTION: Columns = 53..=63;

/// Decode the orbital elements of a record.
///
/// The epoch is only decoded here, resolving it to a calendar instant is left to
/// [`TleEpoch::instant`].
pub fn extract_elements(record: &TleRecord) -> Result<OrbitalElements, TleError> {
    let line1 = record.line1.as_str();
    let line2 = record.line2.as_str();

    let line1_id = field(line1, 1, NORAD_ID, "norad_id", norad_id)?;
    let line2_id = field(line2, 2, NORAD_ID, "norad_id", norad_id)?;
    if line1_id != line2_id {
        return Err(TleError::RecordInconsistency {
            line1_id,
            line2_id,
        });
    }

    let epoch = field(line1, 1, EPOCH, "epoch", epoch)?;

    let inclination_deg = checked(
        "inclination",
        field(line2, 2, INCLINATION, "inclination", decimal)?,
        |v| (0.0..=180.0).contains(&v),
    )?;
    let raan_deg = checked("raan", field(line2, 2, RAAN, "raan", decimal)?, |_| true)?;
    let eccentricity = checked(
        "eccentricity",
        field(line2, 2, ECCENTRICITY, "eccentricity", implied_decimal)?,
        |v| (0.0..1.0).contains(&v),
    )?;
    let arg_perigee_deg = checked(
        "arg_perigee",
        field(line2, 2, ARG_PERIGEE, "arg_perigee", decimal)?,
        |_| true,
    )?;
    let mean_anomaly_deg = checked(
        "mean_anomaly",
        field(line2, 2, MEAN_ANOMALY, "mean_anomaly", decimal)?,
        |_| true,
    )?;
    let mean_motion_rev_per_day = checked(
        "mean_motion",
        field(line2, 2, MEAN_MOTION, "mean_motion", decimal)?,
        |v| v > 0.0,
    )?;

    Ok(OrbitalElements {
        norad_id: line1_id,
        inclination_deg,
        raan_deg,
        eccentricity,
        arg_perigee_deg,
        mean_anomaly_deg,
        mean_motion_rev_per_day,
        epoch,
    })
}

fn field<'a, O>(
    line: &'a str,
    number: u8,
    columns: Columns,
    name: &'static str,
    parser: impl FnOnce(&'a str) -> IResult<&'a str, O>,
) -> Result<O, TleError> {
    let text = line
        .get(columns.start() - 1..*columns.end())
        .ok_or_else(|| TleError::MalformedLine {
            line: number,
            reason: MalformedReason::Length(line.chars().count()),
        })?;
    parser(text)
        .map(|(_, value)| value)
        .map_err(|_| TleError::MalformedLine {
            line: number,
            reason: MalformedReason::Field {
                field: name,
                text: text.to_string(),
            },
        })
}

fn checked(
    field: &'static str,
    value: f64,
    valid: impl FnOnce(f64) -> bool,
) -> Result<f64, TleError> {
    if value.is_finite() && valid(value) {
        Ok(value)
    } else {
        Err(TleError::FieldRange { field, value })
    }
}

fn norad_id(s: &str) -> IResult<&str, NoradId> {
    all_consuming(delimited(space0, dec_u32, space0))(s)
}

fn decimal(s: &str) -> IResult<&str, f64> {
    all_consuming(delimited(space0, double, space0))(s)
}

/// Digits with an implied leading "0."
fn implied_decimal(s: &str) -> IResult<&str, f64> {
    let (s, digits) = all_consuming(digit1)(s)?;
    let mantissa = digits
        .bytes()
        .fold(0.0, |acc, b| acc * 10.0 + f64::from(b - b'0'));
    Ok((s, mantissa / 10f64.powi(digits.len() as i32)))
}

/// `YYDDD.DDDDDDDD`
fn epoch(s: &str) -> IResult<&str, TleEpoch> {
    let (s, yy) = take(2usize)(s)?;
    let (_, year) = all_consuming(dec_u8)(yy)?;
    let (s, day_of_year) = all_consuming(terminated(double, space0))(s)?;
    Ok((s, TleEpoch::new(year, day_of_year)))
}
