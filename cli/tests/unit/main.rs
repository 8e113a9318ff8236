//! Unit tests for stackup CLI
//!
//! These tests use stubbed ports and paused tokio time, so they run fast
//! without spawning external tools.

mod architecture;
mod readiness_poller;
mod stack_up_scenario;
