//! Providers Module - External Data Sources
//!
//! Blockchain explorer clients and the ordered fetcher that tries them.

pub mod blockchain_info;
pub mod blockchair;
pub mod fetcher;

use async_trait::async_trait;
use reqwest::Url;

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{BlockchainSnapshot, DataSource};

pub use blockchain_info::BlockchainInfoClient;
pub use blockchair::BlockchairClient;
pub use fetcher::BlockchainFetcher;

/// A source of address snapshots
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Short identifier used in logs and in `BlockchainSnapshot::provider`
    fn name(&self) -> &'static str;

    /// Slot this provider fills in the fetch chain
    fn source(&self) -> DataSource;

    /// Whether a successful result is written to the snapshot cache
    fn write_through(&self) -> bool {
        false
    }

    /// Fetch and normalize data for one address.
    /// Any error means "try the next provider".
    async fn fetch(&self, address: &str) -> AppResult<BlockchainSnapshot>;
}

/// Shared HTTP client for explorer calls
pub fn http_client() -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(crate::utils::constants::USER_AGENT)
        .gzip(true)
        .build()?)
}

/// Append path segments to a provider base URL.
///
/// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside an
/// address stay part of that one segment.
pub fn endpoint_url(base: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::invalid_config(format!("Invalid provider URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| AppError::invalid_config(format!("Provider URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_endpoint_url_appends_segments() {
        let url = endpoint_url("https://api.blockchair.com/bitcoin", &["dashboards", "address", "1Abc"]).unwrap();
        assert_eq!(url.as_str(), "https://api.blockchair.com/bitcoin/dashboards/address/1Abc");

        // Trailing slash on the base does not double up
        let url = endpoint_url("https://blockchain.info/", &["rawaddr", "1Abc"]).unwrap();
        assert_eq!(url.as_str(), "https://blockchain.info/rawaddr/1Abc");
    }

    #[test]
    fn test_endpoint_url_encodes_address_as_one_segment() {
        let url = endpoint_url(
            "https://blockchain.info",
            &["rawaddr", "1BoatSLRHtKNngkdXEeobR76b53LETtpyT/../../other/1Fee?x=1#"],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://blockchain.info/rawaddr/1BoatSLRHtKNngkdXEeobR76b53LETtpyT%2F..%2F..%2Fother%2F1Fee%3Fx=1%23"
        );
        assert_eq!(url.path_segments().unwrap().count(), 2);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_endpoint_url_rejects_bad_base() {
        let err = endpoint_url("not a url", &["rawaddr"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);

        let err = endpoint_url("mailto:ops@example.com", &["rawaddr"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }
}
