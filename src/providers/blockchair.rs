//! Blockchair API Client (primary provider)
//!
//! API: https://api.blockchair.com/bitcoin/dashboards/address/{address}
//! Free tier, no API key, 30 requests/minute. Past the limit the service
//! simply degrades to the fallback provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

use super::{endpoint_url, SnapshotProvider};
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{BlockchainSnapshot, DataSource};

/// Dashboard response: `data` is keyed by the queried address
#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub data: Option<HashMap<String, DashboardEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardEntry {
    pub address: Option<DashboardAddress>,
}

/// Address summary block; amounts in satoshi
#[derive(Debug, Deserialize)]
pub struct DashboardAddress {
    pub balance: Option<i64>,
    pub transaction_count: Option<u64>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub received: Option<u64>,
    pub spent: Option<u64>,
}

pub struct BlockchairClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BlockchairClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Normalize a dashboard body. The body must contain the queried address.
    pub fn parse_dashboard(address: &str, body: DashboardResponse) -> AppResult<BlockchainSnapshot> {
        let summary = body
            .data
            .and_then(|mut data| data.remove(address))
            .and_then(|entry| entry.address)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ProviderInvalidResponse,
                    format!("Blockchair response has no data for {}", address),
                )
            })?;

        Ok(BlockchainSnapshot {
            balance: summary.balance.unwrap_or(0),
            transaction_count: summary.transaction_count.unwrap_or(0),
            first_seen: summary.first_seen,
            last_seen: summary.last_seen,
            total_received: summary.received.unwrap_or(0),
            total_sent: summary.spent.unwrap_or(0),
            source: DataSource::Primary,
            provider: "blockchair".to_string(),
        })
    }
}

#[async_trait]
impl SnapshotProvider for BlockchairClient {
    fn name(&self) -> &'static str {
        "blockchair"
    }

    fn source(&self) -> DataSource {
        DataSource::Primary
    }

    fn write_through(&self) -> bool {
        true
    }

    async fn fetch(&self, address: &str) -> AppResult<BlockchainSnapshot> {
        let url = endpoint_url(&self.base_url, &["dashboards", "address", address])?;

        info!("🔍 Blockchair: Fetching dashboard for {}", address);

        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(AppError::new(
                ErrorCode::ProviderHttpStatus,
                format!("Blockchair API error: {}", response.status()),
            ));
        }

        let body: DashboardResponse = response.json().await?;
        Self::parse_dashboard(address, body)
    }
}
