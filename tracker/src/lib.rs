pub extern crate nalgebra as na;

pub mod config;
pub mod pipeline;
pub mod propagation;
pub mod source;
pub mod table;
pub mod time_series;
pub mod units;

pub use pipeline::{Pipeline, PipelineOutput, Report};
pub use propagation::{Propagator, TwoBody};
pub use time_series::{SeriesConfig, SeriesGenerator};
