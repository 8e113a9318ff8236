//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod access;
pub mod config;
pub mod environment;
pub mod error;
pub mod readiness;
pub mod service;

pub use access::AccessPoints;
pub use config::{StackConfig, validate_config};
pub use environment::ExecEnv;
pub use error::{CommandError, ConfigError, StackError};
pub use readiness::{PollState, ReadinessPolicy, RetryBudget, WorkloadSnapshot};
pub use service::Service;
