//! Airship SDK for Rust.

#![warn(missing_docs)]

mod builder;
mod client;
mod constants;
mod details;
mod errors;
mod flag;
mod model;

pub use builder::ClientBuilder;
pub use client::{configure, flag, Client};
pub use constants::{PKG_VERSION, TREATMENT_OFF, TREATMENT_ON};
pub use details::EvaluationDetails;
pub use errors::{ClientError, ErrorKind};
pub use flag::FeatureFlag;
