//! Shared utilities for the `beans` workspace.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed, so that
//!   iteration order of caches does not change between runs.

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
