//! A lightweight uom-ish set of the quantities the propagator needs

use std::f64::consts::TAU;
use std::ops::{Add, Mul};
use tletypes::prelude::UtcTimestamp;

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km", self.as_kilometers())
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Time {
    secs: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.secs)
    }
}

impl Time {
    pub fn from_secs(secs: f64) -> Time {
        Time { secs }
    }

    /// Signed time elapsed from `from` to `to`
    pub fn between(from: UtcTimestamp, to: UtcTimestamp) -> Time {
        let dt = to - from;
        let secs = dt.num_seconds() as f64;
        let subsec_nanos = (dt - chrono::Duration::seconds(dt.num_seconds()))
            .num_nanoseconds()
            .unwrap_or(0);
        Time::from_secs(secs + subsec_nanos as f64 * 1e-9)
    }

    pub fn as_secs(&self) -> f64 {
        self.secs
    }

    /// Microsecond resolution
    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::microseconds((self.secs * 1e6).round() as i64)
    }

    /// `t + self`, `None` when the result isn't representable
    pub fn after(&self, t: UtcTimestamp) -> Option<UtcTimestamp> {
        if !self.secs.is_finite() {
            return None;
        }
        t.checked_add_signed(self.as_duration())
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Self::Output {
        Time::from_secs(self.secs * rhs)
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

impl Angle {
    pub fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    pub fn as_radians(&self) -> f64 {
        self.radians
    }

    /// Wrapped into [0, 2π)
    pub fn normalized(&self) -> Angle {
        Angle::from_radians(self.radians.rem_euclid(TAU))
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }
}

impl Add<Angle> for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.radians + rhs.radians)
    }
}

/// Angular rate, e.g. a mean motion
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct AngularVelocity {
    radians_per_second: f64,
}

impl std::fmt::Debug for AngularVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad/s", self.radians_per_second)
    }
}

impl AngularVelocity {
    pub fn from_revolutions_per_day(rev_per_day: f64) -> AngularVelocity {
        AngularVelocity {
            radians_per_second: rev_per_day * TAU / 86_400.0,
        }
    }

    pub fn as_radians_per_second(&self) -> f64 {
        self.radians_per_second
    }
}

impl Mul<Time> for AngularVelocity {
    type Output = Angle;

    fn mul(self, rhs: Time) -> Self::Output {
        Angle::from_radians(self.radians_per_second * rhs.as_secs())
    }
}
