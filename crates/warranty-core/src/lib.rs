//! Shared HTTP plumbing for warranty desk services.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
