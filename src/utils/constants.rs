//! Constants Module - Single Source of Truth
//!
//! Application-wide constants: defaults, explorer endpoints, scoring
//! thresholds and fixed user-facing strings.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "CoinGuard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent to explorer APIs
pub const USER_AGENT: &str = "CryptoScanner/1.0";

// ============================================
// SERVER / STORAGE DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// SQLite file holding the address snapshot cache
pub const DEFAULT_DB_PATH: &str = "cache.db";

// ============================================
// EXPLORER PROVIDERS
// ============================================

/// Per-provider request timeout (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Blockchair Bitcoin API (free tier: 30 requests/minute)
pub const BLOCKCHAIR_BASE_URL: &str = "https://api.blockchair.com/bitcoin";

/// blockchain.info public API
pub const BLOCKCHAIN_INFO_BASE_URL: &str = "https://blockchain.info";

/// Transactions requested from blockchain.info `rawaddr`
pub const BLOCKCHAIN_INFO_TX_LIMIT: u32 = 5;

// ============================================
// ADDRESS RULES
// ============================================

/// Shortest string accepted as an address
pub const MIN_ADDRESS_LEN: usize = 26;

/// Native segwit (P2WPKH) prefix and length
pub const SEGWIT_PREFIX: &str = "bc1q";
pub const SEGWIT_ADDRESS_LEN: usize = 42;

/// Characters compared for a partial registry match
pub const PARTIAL_MATCH_PREFIX_LEN: usize = 10;

// ============================================
// SCORING
// ============================================

pub const REGISTRY_HIT_POINTS: u32 = 80;
pub const NEW_ADDRESS_LARGE_VOLUME_POINTS: u32 = 30;
pub const DRAINED_HIGH_ACTIVITY_POINTS: u32 = 20;
pub const INVALID_FORMAT_POINTS: u32 = 10;

/// "New" address: fewer transactions than this
pub const NEW_ADDRESS_MAX_TX: u64 = 10;

/// 1 BTC in satoshi
pub const LARGE_VOLUME_SATS: u64 = 100_000_000;

/// Zero-balance address with more transactions than this looks like a mixer hop
pub const HIGH_ACTIVITY_TX: u64 = 100;

/// Above this score the user is told to send a test transaction first
pub const TEST_TX_SUGGESTION_SCORE: u32 = 30;

pub const MAX_SCORE: u32 = 100;

// ============================================
// REGISTRY
// ============================================

/// Date the bundled registry seed was compiled
pub const REGISTRY_SEED_DATE: &str = "2024-01-15";
