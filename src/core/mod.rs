//! Core Module - Business Logic
//!
//! Scam registry and risk scoring. No I/O here.

pub mod registry;
pub mod risk_score;

pub use registry::*;
pub use risk_score::*;
