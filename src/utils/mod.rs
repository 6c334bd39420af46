//! Utils Module - Shared Infrastructure
//!
//! Snapshot cache storage and application constants.

pub mod cache;
pub mod constants;

pub use cache::*;
pub use constants::*;
