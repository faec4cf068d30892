use crate::epoch::TleEpoch;
use derive_more::Display;

/// NORAD catalog number
pub type NoradId = u32;

/// Classical orbital elements decoded from a TLE
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{norad_id: {}, epoch: {}, inc: {}, ecc: {}, n: {}, ...}}",
    "norad_id",
    "epoch",
    "inclination_deg",
    "eccentricity",
    "mean_motion_rev_per_day"
)]
pub struct OrbitalElements {
    pub norad_id: NoradId,
    /// [deg], 0..=180
    pub inclination_deg: f64,
    /// Right ascension of the ascending node [deg]
    pub raan_deg: f64,
    /// 0..1
    pub eccentricity: f64,
    /// [deg]
    pub arg_perigee_deg: f64,
    /// Mean anomaly at epoch [deg]
    pub mean_anomaly_deg: f64,
    /// [rev/day], > 0
    pub mean_motion_rev_per_day: f64,
    pub epoch: TleEpoch,
}
