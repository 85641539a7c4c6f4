//! Auth types shared across warranty desk crates.
//!
//! Provides bearer-token issuing and validation, the `BearerIdentity` and
//! `AdminIdentity` extractors, and the rejection they produce.

pub mod identity;
pub mod rejection;
pub mod token;
