//! Typed endpoints of the scaler API.
//!
//! Each submodule extends [`ScalerClient`](crate::ScalerClient) with the
//! calls for one resource.

mod audit;
mod cluster;
mod login;
mod logs;
mod stats;

pub use audit::DEFAULT_AUDIT_LIMIT;
