//! Response models for the scaler API.

mod audit;
mod cluster;
mod stats;

pub use audit::*;
pub use cluster::*;
pub use stats::*;
