//! Test utilities for warranty desk services.
//!
//! Provides `MockAuth` for minting bearer headers and a JSON fixture loader.
//! Import from `[dev-dependencies]` only; never in production code.

pub mod auth;
pub mod fixture;
