//! Scam Registry
//!
//! Known hack, scam, ransomware and mixer addresses with their metadata.
//! Lookups try an exact match first, then a 10-character prefix match in
//! insertion order. Entries can be added at runtime but never removed, and
//! nothing is persisted across restarts.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::models::types::{RegistryEntry, RegistryLookup, ThreatKind};
use crate::utils::constants::{PARTIAL_MATCH_PREFIX_LEN, REGISTRY_SEED_DATE};

/// Insertion-ordered address table
#[derive(Debug, Default)]
struct Inner {
    entries: Vec<(String, RegistryEntry)>,
    index: HashMap<String, usize>,
    last_updated: String,
}

impl Inner {
    fn upsert(&mut self, address: String, entry: RegistryEntry) {
        match self.index.get(&address) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(address.clone(), self.entries.len());
                self.entries.push((address, entry));
            }
        }
    }
}

/// Registry summary for `/api/registry/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_entries: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    pub last_updated: String,
}

/// Thread-safe scam address registry
#[derive(Debug)]
pub struct ScamRegistry {
    inner: RwLock<Inner>,
}

impl Default for ScamRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ScamRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                last_updated: REGISTRY_SEED_DATE.to_string(),
                ..Inner::default()
            }),
        }
    }

    /// Registry built from a list of entries, keeping their order
    pub fn from_entries(entries: impl IntoIterator<Item = (String, RegistryEntry)>) -> Self {
        let registry = Self::new();
        {
            let mut inner = registry.write();
            for (address, entry) in entries {
                inner.upsert(address, entry);
            }
        }
        registry
    }

    /// Registry with the bundled sample of well-known addresses
    pub fn seeded() -> Self {
        Self::from_entries(seed_entries())
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look an address up: exact, then partial (first 10 chars), then none
    pub fn lookup(&self, address: &str) -> RegistryLookup {
        let address = address.trim();
        let inner = self.read();

        if let Some(&pos) = inner.index.get(address) {
            debug!("🎯 Registry exact match: {}", address);
            return RegistryLookup::exact(inner.entries[pos].1.clone());
        }

        let partial = inner
            .entries
            .iter()
            .find(|(known, _)| address.starts_with(prefix(known)));

        match partial {
            Some((known, entry)) => {
                debug!("🎯 Registry partial match: {} ~ {}", address, known);
                RegistryLookup::partial(entry.clone())
            }
            None => RegistryLookup::none(),
        }
    }

    /// Add entries (existing addresses get their metadata replaced).
    /// Returns the new registry size.
    pub fn update(&self, entries: impl IntoIterator<Item = (String, RegistryEntry)>) -> usize {
        let mut inner = self.write();
        let before = inner.entries.len();
        for (address, entry) in entries {
            let address = address.trim();
            // An empty key would prefix-match every address
            if address.is_empty() {
                continue;
            }
            inner.upsert(address.to_string(), entry);
        }
        inner.last_updated = chrono::Utc::now().format("%Y-%m-%d").to_string();

        let size = inner.entries.len();
        info!("📚 Registry updated: {} new entries, {} total", size - before, size);
        size
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry counts per threat kind
    pub fn stats(&self) -> RegistryStats {
        let inner = self.read();
        let mut by_type: BTreeMap<&'static str, usize> =
            ThreatKind::ALL.iter().map(|k| (k.as_str(), 0)).collect();
        for (_, entry) in &inner.entries {
            *by_type.entry(entry.kind.as_str()).or_insert(0) += 1;
        }

        RegistryStats {
            total_entries: inner.entries.len(),
            by_type,
            last_updated: inner.last_updated.clone(),
        }
    }
}

/// First `PARTIAL_MATCH_PREFIX_LEN` chars of a key (whole key if shorter)
fn prefix(address: &str) -> &str {
    match address.char_indices().nth(PARTIAL_MATCH_PREFIX_LEN) {
        Some((idx, _)) => &address[..idx],
        None => address,
    }
}

fn seed_entries() -> Vec<(String, RegistryEntry)> {
    vec![
        // Hacks
        (
            "1FeexV6bAHb8ybZjqQMjJrcCrHGW9sb6uF".to_string(),
            RegistryEntry::new("Bitfinex Hack 2016", ThreatKind::Hack)
                .with_amount_lost("72,000 BTC")
                .with_reference("https://www.washingtonpost.com/news/the-switch/wp/2016/08/03/bitfinex-bitcoin-exchange-gets-hacked-60-million-disappears/"),
        ),
        (
            "3Cbq7aT1tY8kMxWLbitaG7yT6bPbKChq64".to_string(),
            RegistryEntry::new("MtGox Hack", ThreatKind::Hack)
                .with_amount_lost("850,000 BTC")
                .with_reference("https://en.wikipedia.org/wiki/Mt._Gox"),
        ),
        (
            "bc1qa5wkgaew2dkv56kfvj49j0av5nml45x9ek9hz6".to_string(),
            RegistryEntry::new("Colonial Pipeline Ransomware 2021", ThreatKind::Ransomware)
                .with_amount_lost("75 BTC")
                .with_reference("https://www.bbc.com/news/technology-57088336"),
        ),
        // Mixers (privacy tools, still treated as suspicious)
        (
            "1ETQJ4cMoSYxGLQDTLq9j7MKyC2q2jC2Fd".to_string(),
            RegistryEntry::new("Known Mixing Service", ThreatKind::Mixer).with_risk("medium"),
        ),
        // Phishing / ponzi
        (
            "1MDUoxL1bGvMxhuoDYx6i11ePytECAk9QK".to_string(),
            RegistryEntry::new("Fake Exchange Scam", ThreatKind::Scam)
                .with_description("Fake Binance phishing address"),
        ),
        // Testnet
        (
            "2N1W7qo1SqykbWyF9hTZkFJsQFQCdXbBgcQ".to_string(),
            RegistryEntry::new("Testnet Address (Ignore)", ThreatKind::Testnet).with_risk("none"),
        ),
    ]
}
