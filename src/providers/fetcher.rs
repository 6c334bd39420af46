//! Blockchain Data Fetcher
//!
//! Tries providers in order; the first success wins. Providers flagged
//! `write_through` (the primary) have their result stored in the snapshot
//! cache before it is returned. Provider failures are logged and skipped,
//! cache failures are not.

use std::sync::Arc;
use tracing::{info, warn};

use super::{http_client, BlockchainInfoClient, BlockchairClient, SnapshotProvider};
use crate::models::config::AppConfig;
use crate::models::errors::AppResult;
use crate::models::types::BlockchainSnapshot;
use crate::utils::cache::SnapshotStore;

pub struct BlockchainFetcher {
    providers: Vec<Arc<dyn SnapshotProvider>>,
    store: SnapshotStore,
}

impl BlockchainFetcher {
    pub fn new(providers: Vec<Arc<dyn SnapshotProvider>>, store: SnapshotStore) -> Self {
        Self { providers, store }
    }

    /// Blockchair first, blockchain.info as fallback
    pub fn from_config(config: &AppConfig, store: SnapshotStore) -> AppResult<Self> {
        let client = http_client()?;
        let providers: Vec<Arc<dyn SnapshotProvider>> = vec![
            Arc::new(BlockchairClient::new(
                client.clone(),
                config.primary_url.clone(),
                config.http_timeout,
            )),
            Arc::new(BlockchainInfoClient::new(
                client,
                config.fallback_url.clone(),
                config.http_timeout,
            )),
        ];
        Ok(Self::new(providers, store))
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Snapshot for `address`, or `None` when every provider failed.
    /// Only a cache write failure is returned as an error.
    pub async fn fetch(&self, address: &str) -> AppResult<Option<BlockchainSnapshot>> {
        for provider in &self.providers {
            match provider.fetch(address).await {
                Ok(snapshot) => {
                    info!(
                        "✅ {} ({:?}) served data for {}",
                        provider.name(),
                        provider.source(),
                        address
                    );
                    if provider.write_through() {
                        let now = chrono::Utc::now().timestamp();
                        self.store.put(address, &snapshot, now).await?;
                    }
                    return Ok(Some(snapshot));
                }
                Err(e) => {
                    warn!("⚠️ {} failed for {}: {}", provider.name(), address, e);
                }
            }
        }

        warn!("📭 No blockchain data for {} (all providers failed)", address);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::{AppError, ErrorCode};
    use crate::models::types::DataSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        source: DataSource,
        ok: bool,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(source: DataSource, ok: bool) -> Arc<Self> {
            Arc::new(Self {
                source,
                ok,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SnapshotProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn source(&self) -> DataSource {
            self.source
        }

        fn write_through(&self) -> bool {
            self.source == DataSource::Primary
        }

        async fn fetch(&self, _address: &str) -> AppResult<BlockchainSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.ok {
                return Err(AppError::new(ErrorCode::ProviderTimeout, "stub timeout"));
            }
            Ok(BlockchainSnapshot {
                balance: 1,
                transaction_count: 2,
                first_seen: None,
                last_seen: None,
                total_received: 3,
                total_sent: 2,
                source: self.source,
                provider: "stub".to_string(),
            })
        }
    }

    fn fetcher(
        primary: &Arc<StubProvider>,
        fallback: &Arc<StubProvider>,
        store: SnapshotStore,
    ) -> BlockchainFetcher {
        let providers: Vec<Arc<dyn SnapshotProvider>> = vec![primary.clone(), fallback.clone()];
        BlockchainFetcher::new(providers, store)
    }

    #[tokio::test]
    async fn test_primary_success_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("cache.db")).unwrap();
        let primary = StubProvider::new(DataSource::Primary, true);
        let fallback = StubProvider::new(DataSource::Fallback, true);

        let snapshot = fetcher(&primary, &fallback, store.clone())
            .fetch("addr")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.source, DataSource::Primary);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fallback_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("cache.db")).unwrap();
        let primary = StubProvider::new(DataSource::Primary, false);
        let fallback = StubProvider::new(DataSource::Fallback, true);

        let snapshot = fetcher(&primary, &fallback, store.clone())
            .fetch("addr")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.source, DataSource::Fallback);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_all_failed_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("cache.db")).unwrap();
        let primary = StubProvider::new(DataSource::Primary, false);
        let fallback = StubProvider::new(DataSource::Fallback, false);

        let result = fetcher(&primary, &fallback, store).fetch("addr").await.unwrap();
        assert!(result.is_none());
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("cache.db")).unwrap();
        let primary = StubProvider::new(DataSource::Primary, true);
        let fallback = StubProvider::new(DataSource::Fallback, true);
        let fetcher = fetcher(&primary, &fallback, store);

        // Database directory disappears under the running service
        drop(dir);

        let err = fetcher.fetch("addr").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }
}
