//! Two-body Keplerian propagation of TLE elements.
//!
//! No drag, J2 or other perturbations: the mean anomaly advances at the
//! constant mean motion and the true anomaly comes from the first-order
//! equation of center, `ν ≈ M + 2e·sin M`, not an iterative Kepler solve.

use crate::units::{Angle, AngularVelocity, Length, Time};
use tletypes::prelude::*;

/// Earth's gravitational parameter, [m³/s²]
pub const EARTH_MU: f64 = 3.986_004_418e14;

#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum PropagationError {
    #[error("{quantity} is outside its numeric domain: {value}")]
    NumericDomain { quantity: &'static str, value: f64 },
    #[error(transparent)]
    Epoch(#[from] EpochParseError),
    #[error("Step instant is not representable")]
    InstantOutOfRange,
    #[error(transparent)]
    OutOfOrder(#[from] OutOfOrderStep),
}

/// Computes one position for one set of elements at one instant
pub trait Propagator {
    fn propagate(
        &self,
        elements: &OrbitalElements,
        t: UtcTimestamp,
    ) -> Result<PropagationStep, PropagationError>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoBody {
    /// [m³/s²]
    mu: f64,
}

impl Default for TwoBody {
    fn default() -> Self {
        Self { mu: EARTH_MU }
    }
}

impl TwoBody {
    pub fn mean_motion(elements: &OrbitalElements) -> AngularVelocity {
        AngularVelocity::from_revolutions_per_day(elements.mean_motion_rev_per_day)
    }

    /// Kepler's third law, `a = (μ / n²)^(1/3)`
    pub fn semi_major_axis(&self, elements: &OrbitalElements) -> Result<Length, PropagationError> {
        let n = Self::mean_motion(elements).as_radians_per_second();
        let a = Length::from_meters((self.mu / (n * n)).cbrt());
        if a.as_meters().is_finite() && a.as_meters() > 0.0 {
            Ok(a)
        } else {
            Err(PropagationError::NumericDomain {
                quantity: "semi-major axis",
                value: a.as_kilometers(),
            })
        }
    }

    /// Mean anomaly at `t`, wrapped into [0, 2π)
    pub fn mean_anomaly(
        elements: &OrbitalElements,
        epoch: UtcTimestamp,
        t: UtcTimestamp,
    ) -> Angle {
        let m0 = Angle::from_degrees(elements.mean_anomaly_deg);
        (m0 + Self::mean_motion(elements) * Time::between(epoch, t)).normalized()
    }
}

impl Propagator for TwoBody {
    fn propagate(
        &self,
        elements: &OrbitalElements,
        t: UtcTimestamp,
    ) -> Result<PropagationStep, PropagationError> {
        let epoch = elements.epoch.instant()?;
        let a = self.semi_major_axis(elements)?.as_kilometers();
        let e = elements.eccentricity;

        let m = Self::mean_anomaly(elements, epoch, t).as_radians();
        let nu = m + 2.0 * e * m.sin();

        let r = a * (1.0 - e * e) / (1.0 + e * nu.cos());
        if !r.is_finite() || r <= 0.0 {
            return Err(PropagationError::NumericDomain {
                quantity: "orbital radius",
                value: r,
            });
        }

        let raan = Angle::from_degrees(elements.raan_deg);
        let inc = Angle::from_degrees(elements.inclination_deg);
        // Argument of latitude
        let u = Angle::from_radians(nu) + Angle::from_degrees(elements.arg_perigee_deg);

        let position = na::Vector3::new(
            r * (raan.cos() * u.cos() - raan.sin() * u.sin() * inc.cos()),
            r * (raan.sin() * u.cos() + raan.cos() * u.sin() * inc.cos()),
            r * u.sin() * inc.sin(),
        );
        if let Some(bad) = position.iter().find(|c| !c.is_finite()) {
            return Err(PropagationError::NumericDomain {
                quantity: "position",
                value: *bad,
            });
        }

        Ok(PropagationStep::new(t, position))
    }
}
