//! API Request Handlers

use axum::extract::{rejection::JsonRejection, Form, Json, State};
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::types::*;
use crate::core::registry::{RegistryStats, ScamRegistry};
use crate::core::risk_score;
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::RegistryEntry;
use crate::providers::BlockchainFetcher;
use crate::utils::cache::SnapshotStore;
use crate::utils::constants::{APP_VERSION, MIN_ADDRESS_LEN};

/// Shared application state
pub struct AppState {
    pub registry: ScamRegistry,
    pub fetcher: BlockchainFetcher,
    /// Required by `POST /api/registry`; `None` disables the endpoint
    pub admin_key: Option<String>,
    pub start_time: Instant,
}

impl AppState {
    /// Production wiring: seeded registry, SQLite cache, live explorers
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = SnapshotStore::open(&config.db_path)?;
        let fetcher = BlockchainFetcher::from_config(config, store)?;
        Ok(Self::new(ScamRegistry::seeded(), fetcher, config.admin_key.clone()))
    }

    pub fn new(registry: ScamRegistry, fetcher: BlockchainFetcher, admin_key: Option<String>) -> Self {
        Self {
            registry,
            fetcher,
            admin_key,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Address Check
// ============================================

pub async fn check_address(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CheckForm>,
) -> AppResult<Json<CheckResponse>> {
    let address = form.address;

    // Validation failures are reported in-body, not via status code
    if address.chars().count() < MIN_ADDRESS_LEN {
        info!("🚫 Rejected address (too short): {:?}", address);
        return Ok(Json(CheckResponse::Invalid(InvalidAddressData::new())));
    }

    let scam_check = state.registry.lookup(&address);
    let blockchain_data = state.fetcher.fetch(&address).await?;
    let risk_analysis = risk_score::score(&address, blockchain_data.as_ref(), &scam_check);

    info!(
        "🔎 Checked {}: score {} ({}), registry match: {:?}",
        address,
        risk_analysis.score,
        risk_analysis.risk_level.as_str(),
        scam_check.match_type
    );

    Ok(Json(CheckResponse::Checked(Box::new(CheckData {
        address,
        valid: true,
        scam_check,
        blockchain_data,
        risk_analysis,
        timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
    }))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> AppResult<Json<StatsData>> {
    let cached_addresses = state.fetcher.store().count().await?;

    Ok(Json(StatsData {
        cached_addresses,
        scam_database_size: state.registry.len(),
        status: "operational".to_string(),
    }))
}

// ============================================
// Registry
// ============================================

pub async fn registry_stats(State(state): State<Arc<AppState>>) -> Json<RegistryStats> {
    Json(state.registry.stats())
}

/// Additive registry update (admin only, see `admin_auth_middleware`).
/// New keys go in in body order, which decides partial-match precedence.
pub async fn update_registry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IndexMap<String, RegistryEntry>>, JsonRejection>,
) -> AppResult<Json<RegistryUpdateData>> {
    let Json(entries) = payload
        .map_err(|e| AppError::bad_request(format!("Invalid registry payload: {}", e.body_text())))?;

    let scam_database_size = state.registry.update(entries);

    Ok(Json(RegistryUpdateData { scam_database_size }))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success(HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    }))
}
