use crate::time::UtcTimestamp;
use derive_more::Display;

/// Earth-centered position of a satellite at one instant
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(fmt = "{{time: {}, position: {}}}", "time", "position")]
pub struct PropagationStep {
    pub time: UtcTimestamp,
    /// Position [km], expressed in the Earth-centered inertial frame
    pub position: na::Vector3<f64>,
}

impl PropagationStep {
    pub fn new(time: UtcTimestamp, position: na::Vector3<f64>) -> Self {
        Self { time, position }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Distance from the center of the Earth [km]
    pub fn radius_km(&self) -> f64 {
        self.position.norm()
    }
}

#[derive(Copy, Clone, PartialEq, Debug, thiserror::Error)]
#[error("Step at {time} does not come after the previous step at {previous}")]
pub struct OutOfOrderStep {
    pub previous: UtcTimestamp,
    pub time: UtcTimestamp,
}

/// Positions of one satellite, strictly increasing in time
#[derive(Clone, PartialEq, Debug)]
pub struct TimeSeries {
    satellite_name: String,
    steps: Vec<PropagationStep>,
}

impl TimeSeries {
    pub fn new<N: Into<String>>(satellite_name: N) -> Self {
        Self {
            satellite_name: satellite_name.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_capacity<N: Into<String>>(satellite_name: N, capacity: usize) -> Self {
        Self {
            satellite_name: satellite_name.into(),
            steps: Vec::with_capacity(capacity),
        }
    }

    pub fn satellite_name(&self) -> &str {
        &self.satellite_name
    }

    pub fn steps(&self) -> &[PropagationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: PropagationStep) -> Result<(), OutOfOrderStep> {
        if let Some(last) = self.steps.last() {
            if step.time <= last.time {
                return Err(OutOfOrderStep {
                    previous: last.time,
                    time: step.time,
                });
            }
        }
        self.steps.push(step);
        Ok(())
    }

    pub fn into_parts(self) -> (String, Vec<PropagationStep>) {
        (self.satellite_name, self.steps)
    }
}
