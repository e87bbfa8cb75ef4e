//! Marker3 End-to-End Test Infrastructure
//!
//! Integration tests for the flows that must hold across crates:
//!
//! - Building: gesture and toggle layers route every trigger value
//! - Installing: config + avatar documents -> updated avatar on disk
//! - **Determinism**: identical inputs give byte-identical outputs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p marker3-tests
//! ```

pub mod fixtures;

pub use fixtures::{avatar_with_props_menu, empty_avatar, full_menu_avatar, ProjectFixture};

/// BLAKE3 hash of a file's bytes.
pub fn file_hash(path: &std::path::Path) -> String {
    let bytes = std::fs::read(path).expect("Failed to read file for hashing");
    blake3::hash(&bytes).to_hex().to_string()
}
