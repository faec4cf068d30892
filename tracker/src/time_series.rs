//! Fixed-interval position series for one satellite

use crate::propagation::{PropagationError, Propagator, TwoBody};
use crate::units::Time;
use std::fmt;
use tletypes::prelude::*;
use tracing::{debug, warn};

pub const DEFAULT_INTERVAL_SECONDS: u64 = 3600;
pub const DEFAULT_STEP_COUNT: usize = 24;

#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum SeriesConfigError {
    #[error("The step interval must be greater than zero")]
    ZeroInterval,
    #[error("The step count must be greater than zero")]
    ZeroStepCount,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SeriesConfig {
    interval: Time,
    step_count: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            interval: Time::from_secs(DEFAULT_INTERVAL_SECONDS as f64),
            step_count: DEFAULT_STEP_COUNT,
        }
    }
}

impl fmt::Display for SeriesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps every {}",
            self.step_count,
            humantime::format_duration(std::time::Duration::from_secs_f64(
                self.interval.as_secs()
            ))
        )
    }
}

impl SeriesConfig {
    pub fn new(interval_seconds: u64, step_count: usize) -> Result<Self, SeriesConfigError> {
        if interval_seconds == 0 {
            return Err(SeriesConfigError::ZeroInterval);
        }
        if step_count == 0 {
            return Err(SeriesConfigError::ZeroStepCount);
        }
        Ok(Self {
            interval: Time::from_secs(interval_seconds as f64),
            step_count,
        })
    }

    pub fn interval(&self) -> Time {
        self.interval
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Offset of step `index` from the epoch
    pub fn offset(&self, index: usize) -> Time {
        self.interval * index as f64
    }
}

/// A step that was left out of an otherwise complete series
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SkippedStep {
    pub index: usize,
    /// `None` when the step instant itself isn't representable
    pub time: Option<UtcTimestamp>,
    pub error: PropagationError,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SeriesOutcome {
    pub series: TimeSeries,
    pub skipped_steps: Vec<SkippedStep>,
}

#[derive(Clone, Debug)]
pub struct SeriesGenerator<P = TwoBody> {
    config: SeriesConfig,
    propagator: P,
}

impl SeriesGenerator<TwoBody> {
    pub fn two_body(config: SeriesConfig) -> Self {
        Self::new(config, TwoBody::default())
    }
}

impl<P: Propagator> SeriesGenerator<P> {
    pub fn new(config: SeriesConfig, propagator: P) -> Self {
        Self { config, propagator }
    }

    /// Propagate `elements` at `epoch + k * interval` for `k` in `0..step_count`.
    ///
    /// An epoch that doesn't resolve abandons the whole series. Individual
    /// propagation failures only drop the affected step.
    pub fn generate(
        &self,
        satellite_name: &str,
        elements: &OrbitalElements,
    ) -> Result<SeriesOutcome, EpochParseError> {
        let epoch = elements.epoch.instant()?;
        debug!(
            satellite = satellite_name,
            norad_id = elements.norad_id,
            epoch = %iso8601(&epoch),
            "Generating series"
        );

        let mut series = TimeSeries::with_capacity(satellite_name, self.config.step_count);
        let mut skipped_steps = Vec::new();
        for index in 0..self.config.step_count {
            let time = match self.config.offset(index).after(epoch) {
                Some(t) => t,
                None => {
                    warn!(
                        satellite = satellite_name,
                        step = index,
                        "Step instant out of range, skipping"
                    );
                    skipped_steps.push(SkippedStep {
                        index,
                        time: None,
                        error: PropagationError::InstantOutOfRange,
                    });
                    continue;
                }
            };

            let result = self
                .propagator
                .propagate(elements, time)
                .and_then(|step| series.push(step).map_err(PropagationError::from));
            if let Err(error) = result {
                warn!(
                    satellite = satellite_name,
                    step = index,
                    time = %iso8601(&time),
                    %error,
                    "Skipping step"
                );
                skipped_steps.push(SkippedStep {
                    index,
                    time: Some(time),
                    error,
                });
            }
        }

        Ok(SeriesOutcome {
            series,
            skipped_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn elements(epoch: TleEpoch) -> OrbitalElements {
        OrbitalElements {
            norad_id: 90001,
            inclination_deg: 97.5,
            raan_deg: 10.0,
            eccentricity: 0.0,
            arg_perigee_deg: 0.0,
            mean_anomaly_deg: 0.0,
            mean_motion_rev_per_day: 14.5,
            epoch,
        }
    }

    /// Fails every other step
    struct EveryOther;

    impl Propagator for EveryOther {
        fn propagate(
            &self,
            elements: &OrbitalElements,
            t: UtcTimestamp,
        ) -> Result<PropagationStep, PropagationError> {
            let epoch = elements.epoch.instant()?;
            if (t - epoch).num_hours() % 2 == 1 {
                Err(PropagationError::NumericDomain {
                    quantity: "test",
                    value: f64::NAN,
                })
            } else {
                TwoBody::default().propagate(elements, t)
            }
        }
    }

    #[test]
    fn config_validation() {
        assert_eq!(SeriesConfig::new(0, 24), Err(SeriesConfigError::ZeroInterval));
        assert_eq!(
            SeriesConfig::new(60, 0),
            Err(SeriesConfigError::ZeroStepCount)
        );
        let cfg = SeriesConfig::default();
        assert_eq!(cfg.interval().as_secs(), 3600.0);
        assert_eq!(cfg.step_count(), 24);
        assert_eq!(cfg.to_string(), "24 steps every 1h");
    }

    #[test]
    fn hourly_steps_over_a_day() {
        let gen = SeriesGenerator::two_body(SeriesConfig::default());
        let outcome = gen
            .generate("CIRCULAR", &elements(TleEpoch::new(24, 1.0)))
            .unwrap();
        assert!(outcome.skipped_steps.is_empty());

        let series = outcome.series;
        assert_eq!(series.satellite_name(), "CIRCULAR");
        assert_eq!(series.len(), 24);

        let epoch: UtcTimestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        for (k, step) in series.steps().iter().enumerate() {
            assert_eq!(step.time, epoch + Duration::hours(k as i64));
        }
        assert!(series.steps().windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(
            series.steps().last().unwrap().time,
            epoch + Duration::hours(23)
        );
    }

    #[test]
    fn single_step_is_the_epoch() {
        let gen = SeriesGenerator::two_body(SeriesConfig::new(60, 1).unwrap());
        let outcome = gen
            .generate("ONE", &elements(TleEpoch::new(24, 1.5)))
            .unwrap();
        assert_eq!(outcome.series.len(), 1);
        assert_eq!(
            outcome.series.steps()[0].time,
            "2024-01-01T12:00:00Z".parse::<UtcTimestamp>().unwrap()
        );
    }

    #[test]
    fn failed_steps_are_skipped() {
        let gen = SeriesGenerator::new(SeriesConfig::new(3600, 6).unwrap(), EveryOther);
        let outcome = gen
            .generate("FLAKY", &elements(TleEpoch::new(24, 1.0)))
            .unwrap();
        assert_eq!(outcome.series.len(), 3);
        let skipped: Vec<usize> = outcome.skipped_steps.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 3, 5]);
        assert!(outcome.skipped_steps.iter().all(|s| s.time.is_some()));
    }

    #[test]
    fn unresolvable_epoch_abandons_the_series() {
        let gen = SeriesGenerator::two_body(SeriesConfig::default());
        let epoch = TleEpoch::new(23, 400.0);
        assert_eq!(
            gen.generate("BAD", &elements(epoch)),
            Err(EpochParseError { epoch })
        );
    }
}
