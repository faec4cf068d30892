use crate::time::UtcTimestamp;
use chrono::{Duration, NaiveDate};
use derive_more::Display;

/// Two-digit years below this are 20xx, the rest 19xx
pub const PIVOT_YEAR: u8 = 57;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// TLE epoch as written in line 1 columns 19-32: `YYDDD.DDDDDDDD`
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(fmt = "{:02}{:012.8}", "year", "day_of_year")]
pub struct TleEpoch {
    /// Two-digit year
    pub year: u8,
    /// Fractional day of year, 1.0 is January 1st 00:00 UTC
    pub day_of_year: f64,
}

#[derive(Copy, Clone, PartialEq, Debug, thiserror::Error)]
#[error("TLE epoch '{epoch}' does not resolve to a UTC instant")]
pub struct EpochParseError {
    pub epoch: TleEpoch,
}

impl TleEpoch {
    pub fn new(year: u8, day_of_year: f64) -> Self {
        Self { year, day_of_year }
    }

    pub fn full_year(&self) -> i32 {
        let yy = i32::from(self.year);
        if self.year < PIVOT_YEAR {
            2000 + yy
        } else {
            1900 + yy
        }
    }

    /// Resolve to an absolute UTC instant
    pub fn instant(&self) -> Result<UtcTimestamp, EpochParseError> {
        let err = EpochParseError { epoch: *self };
        if self.year > 99 {
            return Err(err);
        }

        let year = self.full_year();
        let days_in_year = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
            366.0
        } else {
            365.0
        };
        let day = self.day_of_year;
        if !day.is_finite() || day < 1.0 || day >= days_in_year + 1.0 {
            return Err(err);
        }

        let start_of_year = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(err)?
            .and_utc();
        let offset = Duration::microseconds(((day - 1.0) * MICROS_PER_DAY).round() as i64);
        start_of_year.checked_add_signed(offset).ok_or(err)
    }
}
