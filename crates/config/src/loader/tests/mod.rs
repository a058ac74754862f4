//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods for dotenv and environment layering.
//! - Test dotenv file precedence and the `DOTENV_DISABLED` gate.
//! - Test schema resolution through `ConfigLoader::build`.
//!
//! Does NOT handle:
//! - Dotenv line parsing details (tested in dotenv.rs).
//! - Individual casters and validators (tested in their own modules).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;
pub mod dotenv_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
