//! Error types

mod api;
mod login;

pub use api::*;
pub use login::*;
