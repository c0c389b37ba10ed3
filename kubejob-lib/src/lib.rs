//! KubeJob Fabric API client library
//!
//! An async client for the scaler service behind the KubeJob Fabric
//! dashboard: Basic-Auth sessions, typed endpoints and polling subscriptions.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod poll;

mod client;

pub use client::*;
