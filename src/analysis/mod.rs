//! Post-processing analysis over stored snapshots.
//!
//! This module provides:
//! - [`run_tke_average`]: the accumulation pass producing the
//!   time-averaged turbulent kinetic energy field
//! - [`FieldSummary`]: min/max/mean reporting for the result

mod statistics;
mod tke;

pub use statistics::FieldSummary;
pub use tke::{run_tke_average, TkeError, TkeOptions, TkeReport};
