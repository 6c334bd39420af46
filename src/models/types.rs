//! Type definitions for CoinGuard
//! Registry entries, blockchain snapshots and risk assessments

use serde::{Deserialize, Serialize, Serializer};

// ============================================
// Registry
// ============================================

/// Category of a known-bad (or known-irrelevant) address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatKind {
    Hack,
    Scam,
    Ransomware,
    Mixer,
    Testnet,
}

impl ThreatKind {
    /// All kinds, in the order stats are reported
    pub const ALL: [ThreatKind; 5] = [
        ThreatKind::Hack,
        ThreatKind::Scam,
        ThreatKind::Ransomware,
        ThreatKind::Mixer,
        ThreatKind::Testnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatKind::Hack => "hack",
            ThreatKind::Scam => "scam",
            ThreatKind::Ransomware => "ransomware",
            ThreatKind::Mixer => "mixer",
            ThreatKind::Testnet => "testnet",
        }
    }
}

/// Metadata attached to a registry address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Short human-readable label (e.g. "Bitfinex Hack 2016")
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: ThreatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_lost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegistryEntry {
    pub fn new(tag: impl Into<String>, kind: ThreatKind) -> Self {
        Self {
            tag: tag.into(),
            kind,
            amount_lost: None,
            reference: None,
            risk: None,
            description: None,
        }
    }

    pub fn with_amount_lost(mut self, amount: impl Into<String>) -> Self {
        self.amount_lost = Some(amount.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk = Some(risk.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How a registry lookup matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    None,
}

/// Result of a registry lookup, serialized as the `scam_check` object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryLookup {
    pub found: bool,
    pub match_type: MatchType,
    /// Matched entry; rendered as `{}` when nothing matched
    #[serde(serialize_with = "serialize_details")]
    pub details: Option<RegistryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RegistryLookup {
    pub fn exact(entry: RegistryEntry) -> Self {
        Self {
            found: true,
            match_type: MatchType::Exact,
            details: Some(entry),
            note: None,
        }
    }

    pub fn partial(entry: RegistryEntry) -> Self {
        Self {
            found: true,
            match_type: MatchType::Partial,
            details: Some(entry),
            note: Some("Partial address match detected".to_string()),
        }
    }

    pub fn none() -> Self {
        Self {
            found: false,
            match_type: MatchType::None,
            details: None,
            note: None,
        }
    }

    /// Tag of the matched entry, if any
    pub fn tag(&self) -> Option<&str> {
        self.details.as_ref().map(|e| e.tag.as_str())
    }
}

fn serialize_details<S>(details: &Option<RegistryEntry>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match details {
        Some(entry) => entry.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

// ============================================
// Blockchain data
// ============================================

/// Which slot of the provider chain produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Fallback,
}

/// Point-in-time summary of an address's on-chain activity.
/// Amounts are in satoshi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainSnapshot {
    pub balance: i64,
    pub transaction_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    pub total_received: u64,
    pub total_sent: u64,
    pub source: DataSource,
    /// Explorer that served the data (e.g. "blockchair")
    pub provider: String,
}

// ============================================
// Risk assessment
// ============================================

/// Risk tier derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Fixed breakpoints, checked from the top down
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => RiskLevel::Critical,
            s if s >= 40 => RiskLevel::High,
            s if s >= 20 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Color name used by the UI
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High => "orange",
            RiskLevel::Critical => "red",
        }
    }
}

/// Scored verdict for one address, serialized as `risk_analysis`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Always within 0..=100
    pub score: u8,
    pub risk_level: RiskLevel,
    pub color: String,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}
