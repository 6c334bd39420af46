//! blockchain.info API Client (fallback provider)
//!
//! API: https://blockchain.info/rawaddr/{address}?limit=5
//! Returns fewer fields than Blockchair (no first/last seen).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::{endpoint_url, SnapshotProvider};
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{BlockchainSnapshot, DataSource};
use crate::utils::constants::BLOCKCHAIN_INFO_TX_LIMIT;

#[derive(Debug, Deserialize)]
pub struct RawAddrResponse {
    pub address: Option<String>,
    pub final_balance: Option<i64>,
    pub n_tx: Option<u64>,
    pub total_received: Option<u64>,
    pub total_sent: Option<u64>,
}

impl From<RawAddrResponse> for BlockchainSnapshot {
    fn from(raw: RawAddrResponse) -> Self {
        Self {
            balance: raw.final_balance.unwrap_or(0),
            transaction_count: raw.n_tx.unwrap_or(0),
            first_seen: None,
            last_seen: None,
            total_received: raw.total_received.unwrap_or(0),
            total_sent: raw.total_sent.unwrap_or(0),
            source: DataSource::Fallback,
            provider: "blockchain.info".to_string(),
        }
    }
}

pub struct BlockchainInfoClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BlockchainInfoClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Normalize a rawaddr body. A body that names another address is rejected.
    pub fn parse_rawaddr(address: &str, raw: RawAddrResponse) -> AppResult<BlockchainSnapshot> {
        match raw.address.as_deref() {
            Some(reported) if reported != address => Err(AppError::new(
                ErrorCode::ProviderInvalidResponse,
                format!("blockchain.info answered for {} instead of {}", reported, address),
            )),
            _ => Ok(raw.into()),
        }
    }
}

#[async_trait]
impl SnapshotProvider for BlockchainInfoClient {
    fn name(&self) -> &'static str {
        "blockchain.info"
    }

    fn source(&self) -> DataSource {
        DataSource::Fallback
    }

    async fn fetch(&self, address: &str) -> AppResult<BlockchainSnapshot> {
        let mut url = endpoint_url(&self.base_url, &["rawaddr", address])?;
        url.query_pairs_mut()
            .append_pair("limit", &BLOCKCHAIN_INFO_TX_LIMIT.to_string());

        info!("🔍 blockchain.info: Fetching rawaddr for {}", address);

        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(AppError::new(
                ErrorCode::ProviderHttpStatus,
                format!("blockchain.info API error: {}", response.status()),
            ));
        }

        let raw: RawAddrResponse = response.json().await?;
        Self::parse_rawaddr(address, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::http_client;
    use crate::utils::constants::USER_AGENT;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    const ADDR: &str = "1FeexV6bAHb8ybZjqQMjJrcCrHGW9sb6uF";

    #[test]
    fn test_rawaddr_conversion() {
        let raw: RawAddrResponse = serde_json::from_value(json!({
            "hash160": "a0b0d60e5991578ed37cbda2b17d8b2ce23ab295",
            "address": "1FeexV6bAHb8ybZjqQMjJrcCrHGW9sb6uF",
            "n_tx": 112,
            "total_received": 7995845524_u64,
            "total_sent": 7995845524_u64,
            "final_balance": 0,
            "txs": []
        }))
        .unwrap();

        let snapshot = BlockchainSnapshot::from(raw);
        assert_eq!(snapshot.transaction_count, 112);
        assert_eq!(snapshot.balance, 0);
        assert_eq!(snapshot.total_sent, 7_995_845_524);
        assert_eq!(snapshot.source, DataSource::Fallback);
        assert!(snapshot.first_seen.is_none());
    }

    #[test]
    fn test_empty_body_defaults() {
        let raw: RawAddrResponse = serde_json::from_value(json!({})).unwrap();
        let snapshot = BlockchainSnapshot::from(raw);
        assert_eq!(snapshot.transaction_count, 0);
        assert_eq!(snapshot.provider, "blockchain.info");
    }

    #[test]
    fn test_rawaddr_for_other_address_is_rejected() {
        let raw: RawAddrResponse =
            serde_json::from_value(json!({ "address": "1BoatSLRHtKNngkdXEeobR76b53LETtpyT", "n_tx": 1 }))
                .unwrap();
        let err = BlockchainInfoClient::parse_rawaddr(ADDR, raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderInvalidResponse);
    }

    // ============================================
    // HTTP
    // ============================================

    fn client(server: &MockServer, timeout: Duration) -> BlockchainInfoClient {
        BlockchainInfoClient::new(http_client().unwrap(), server.base_url(), timeout)
    }

    #[tokio::test]
    async fn test_fetch_rawaddr() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/rawaddr/{}", ADDR))
                    .query_param("limit", "5")
                    .header("user-agent", USER_AGENT);
                then.status(200).json_body(json!({
                    "address": ADDR,
                    "n_tx": 4,
                    "total_received": 1_000_u64,
                    "total_sent": 400_u64,
                    "final_balance": 600
                }));
            })
            .await;

        let snapshot = client(&server, Duration::from_secs(5)).fetch(ADDR).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.transaction_count, 4);
        assert_eq!(snapshot.balance, 600);
        assert_eq!(snapshot.source, DataSource::Fallback);
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let err = client(&server, Duration::from_secs(5)).fetch(ADDR).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderHttpStatus);
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).body("Illegal character in address");
            })
            .await;

        let err = client(&server, Duration::from_secs(5)).fetch(ADDR).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderInvalidResponse);
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).delay(Duration::from_millis(500)).json_body(json!({}));
            })
            .await;

        let err = client(&server, Duration::from_millis(50)).fetch(ADDR).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderTimeout);
    }

    #[tokio::test]
    async fn test_fetch_keeps_address_in_one_segment() {
        let server = MockServer::start_async().await;
        let diverted = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/other/{}", ADDR));
                then.status(200).json_body(json!({ "total_received": 500_000_000_u64 }));
            })
            .await;

        let crafted = format!("1BoatSLRHtKNngkdXEeobR76b53LETtpyT/../../other/{}#", ADDR);
        let result = client(&server, Duration::from_secs(5)).fetch(&crafted).await;

        assert!(result.is_err());
        assert_eq!(diverted.hits_async().await, 0);
    }
}
