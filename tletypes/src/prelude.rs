pub use crate::elements::{NoradId, OrbitalElements};
pub use crate::epoch::{EpochParseError, TleEpoch};
pub use crate::series::{OutOfOrderStep, PropagationStep, TimeSeries};
pub use crate::time::{iso8601, UtcTimestamp};
pub use crate::tle::{TleRecord, TLE_LINE_LEN};
