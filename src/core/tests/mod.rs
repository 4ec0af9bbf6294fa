//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Conflict detection tests
//! - Key normalisation tests (including property tests)
//! - Type tests (KeyCombo, Modifier, Platform, etc.)

#[cfg(test)]
mod normalize_tests;
#[cfg(test)]
mod types_tests;
