extern crate nalgebra as na;

pub mod elements;
pub mod epoch;
pub mod prelude;
pub mod series;
pub mod time;
pub mod tle;
