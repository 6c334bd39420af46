//! Risk Scoring Module
//! Turns a registry lookup, optional blockchain snapshot and the address
//! format into a 0-100 score with tier, warnings and suggestions.
//!
//! Rules are additive:
//! - Registry hit: +80
//! - Fewer than 10 txs but more than 1 BTC received: +30
//! - Zero balance after more than 100 txs: +20
//! - Non-segwit address shorter than 26 chars: +10

use crate::models::types::{BlockchainSnapshot, RegistryLookup, RiskAssessment, RiskLevel};
use crate::utils::constants::{
    DRAINED_HIGH_ACTIVITY_POINTS, HIGH_ACTIVITY_TX, INVALID_FORMAT_POINTS, LARGE_VOLUME_SATS,
    MAX_SCORE, MIN_ADDRESS_LEN, NEW_ADDRESS_LARGE_VOLUME_POINTS, NEW_ADDRESS_MAX_TX,
    REGISTRY_HIT_POINTS, SEGWIT_ADDRESS_LEN, SEGWIT_PREFIX, TEST_TX_SUGGESTION_SCORE,
};

/// Score one address. Pure function of its inputs.
pub fn score(
    address: &str,
    snapshot: Option<&BlockchainSnapshot>,
    lookup: &RegistryLookup,
) -> RiskAssessment {
    RiskScoreBuilder::new()
        .with_registry_lookup(lookup)
        .with_snapshot(snapshot)
        .with_address_format(address)
        .build()
}

/// Accumulates points and warnings rule by rule
#[derive(Debug, Default)]
pub struct RiskScoreBuilder {
    points: u32,
    warnings: Vec<String>,
}

impl RiskScoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, points: u32, warning: String) {
        self.points += points;
        self.warnings.push(warning);
    }

    /// Known-bad address (exact or partial match)
    pub fn with_registry_lookup(mut self, lookup: &RegistryLookup) -> Self {
        if lookup.found {
            let tag = lookup.tag().unwrap_or("Known high-risk address");
            self.add(REGISTRY_HIT_POINTS, format!("⚠️ {}", tag));
        }
        self
    }

    /// On-chain heuristics; absent data contributes nothing
    pub fn with_snapshot(mut self, snapshot: Option<&BlockchainSnapshot>) -> Self {
        let Some(data) = snapshot else {
            return self;
        };

        // Fresh address that already moved serious money
        if data.transaction_count < NEW_ADDRESS_MAX_TX && data.total_received > LARGE_VOLUME_SATS {
            self.add(
                NEW_ADDRESS_LARGE_VOLUME_POINTS,
                "🚨 New address with large transactions".to_string(),
            );
        }

        // Busy pass-through address that keeps nothing (mixer pattern)
        if data.balance == 0 && data.transaction_count > HIGH_ACTIVITY_TX {
            self.add(
                DRAINED_HIGH_ACTIVITY_POINTS,
                "⚠️ High transaction count with zero balance".to_string(),
            );
        }

        self
    }

    pub fn with_address_format(mut self, address: &str) -> Self {
        if is_segwit(address) {
            return self;
        }
        if address.chars().count() < MIN_ADDRESS_LEN {
            self.add(INVALID_FORMAT_POINTS, "⚠️ Invalid address format".to_string());
        }
        self
    }

    pub fn build(self) -> RiskAssessment {
        let level = RiskLevel::from_score(self.points);
        let score = self.points.min(MAX_SCORE) as u8;

        let last = if self.points > TEST_TX_SUGGESTION_SCORE {
            "Use small test transaction first"
        } else {
            "Address appears safe"
        };

        RiskAssessment {
            score,
            risk_level: level,
            color: level.color().to_string(),
            warnings: self.warnings,
            suggestions: vec![
                "Verify address from multiple sources".to_string(),
                "Check transaction history carefully".to_string(),
                last.to_string(),
            ],
        }
    }
}

/// 42-char native segwit address
fn is_segwit(address: &str) -> bool {
    address.starts_with(SEGWIT_PREFIX) && address.chars().count() == SEGWIT_ADDRESS_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{DataSource, RegistryEntry, ThreatKind};

    const PLAIN: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

    fn snapshot(balance: i64, tx: u64, received: u64) -> BlockchainSnapshot {
        BlockchainSnapshot {
            balance,
            transaction_count: tx,
            first_seen: None,
            last_seen: None,
            total_received: received,
            total_sent: 0,
            source: DataSource::Primary,
            provider: "blockchair".to_string(),
        }
    }

    fn hit() -> RegistryLookup {
        RegistryLookup::exact(RegistryEntry::new("Bitfinex Hack 2016", ThreatKind::Hack))
    }

    #[test]
    fn test_clean_address() {
        let result = score(PLAIN, Some(&snapshot(5_000, 20, 10_000)), &RegistryLookup::none());
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.color, "green");
        assert!(result.warnings.is_empty());
        assert_eq!(result.suggestions[2], "Address appears safe");
    }

    #[test]
    fn test_registry_hit_is_critical() {
        let result = score(PLAIN, None, &hit());
        assert_eq!(result.score, 80);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.color, "red");
        assert_eq!(result.warnings, vec!["⚠️ Bitfinex Hack 2016".to_string()]);
        assert_eq!(result.suggestions[2], "Use small test transaction first");
    }

    #[test]
    fn test_new_address_and_drained_rules() {
        // zero balance alone is not enough below 100 txs
        let result = score(PLAIN, Some(&snapshot(0, 5, 200_000_000)), &RegistryLookup::none());
        assert_eq!(result.score, 30);
        assert_eq!(result.risk_level, RiskLevel::Medium);

        let result = score(PLAIN, Some(&snapshot(0, 150, 0)), &RegistryLookup::none());
        assert_eq!(result.score, 20);
        assert_eq!(result.warnings, vec!["⚠️ High transaction count with zero balance".to_string()]);
    }

    #[test]
    fn test_exactly_one_btc_is_not_large() {
        let result = score(PLAIN, Some(&snapshot(1, 1, 100_000_000)), &RegistryLookup::none());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_score_is_clamped() {
        let result = score("short", Some(&snapshot(0, 5, 500_000_000)), &hit());
        // 80 + 30 + 10 = 120
        assert_eq!(result.score, 100);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_segwit_has_no_format_penalty() {
        let segwit = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
        assert_eq!(segwit.len(), 42);
        let result = score(segwit, None, &RegistryLookup::none());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_short_address_penalty() {
        let result = score("12345678901234567890", None, &RegistryLookup::none());
        assert_eq!(result.score, 10);
        assert_eq!(result.warnings, vec!["⚠️ Invalid address format".to_string()]);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_deterministic() {
        let data = snapshot(0, 7, 300_000_000);
        let a = score(PLAIN, Some(&data), &hit());
        let b = score(PLAIN, Some(&data), &hit());
        assert_eq!(a, b);
    }
}
