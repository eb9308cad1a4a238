//! Configuration and shared types for PaySign.
//!
//! This crate holds the process-wide configuration that every other PaySign
//! crate consumes: the merchant credentials loaded from the environment and
//! the payment API environment they target. Configuration is read once at
//! startup and then passed around by value; nothing below this crate looks at
//! the process environment.

mod config;
mod error;
mod types;

pub use config::PaySignConfig;
pub use error::{PaySignError, PaySignResult};
pub use types::ApiEnvironment;
