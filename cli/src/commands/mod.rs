//! Command implementations

pub mod services;
pub mod up;
pub mod urls;
pub mod version;
pub mod wait;
