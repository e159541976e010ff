//! Cross-module test suite.
//!
//! Unit tests live next to the code they cover; this module holds the tests
//! that drive several modules together:
//!
//! - `determinism.rs`: same seed plus same inputs replays the same run.
//! - `integration.rs`: multi-frame scenarios through the full session loop.
//! - `helpers.rs`: shared setup factories.

mod helpers;
mod integration;

pub use helpers::*;
