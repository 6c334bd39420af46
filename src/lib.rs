//! CoinGuard Library
//!
//! Crypto address safety checker:
//! - Known scam/hack/mixer registry lookup (exact and prefix match)
//! - On-chain enrichment via Blockchair with blockchain.info fallback
//! - Heuristic 0-100 risk score with tier, warnings and suggestions

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use api::{create_router, AppState};
pub use crate::core::{RegistryStats, RiskScoreBuilder, ScamRegistry};
pub use models::{
    AppConfig, AppError, AppResult, BlockchainSnapshot, DataSource, ErrorCode, MatchType,
    RegistryEntry, RegistryLookup, RiskAssessment, RiskLevel, ThreatKind,
};
pub use providers::{BlockchainFetcher, SnapshotProvider};
pub use utils::{CachedSnapshot, SnapshotStore};
