//! JSON fixture loader.
//!
//! Fixtures live under `tests/fixtures/` of the crate running the test.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub struct Fixture;

impl Fixture {
    /// Path of `tests/fixtures/<name>` relative to the calling crate.
    pub fn path(name: &str) -> PathBuf {
        let dir = std::env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        dir.join("tests").join("fixtures").join(name)
    }

    /// Load and deserialize a fixture file.
    ///
    /// Panics if the file is missing or does not match `T`.
    pub fn load<T: DeserializeOwned>(name: &str) -> T {
        let path = Self::path(name);
        let contents = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {name}: {e}"))
    }
}
