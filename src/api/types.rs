//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::types::{BlockchainSnapshot, RegistryLookup, RiskAssessment};

/// Envelope for health and error responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ============================================
// Address Check
// ============================================

/// `POST /api/check` form body
#[derive(Debug, Deserialize)]
pub struct CheckForm {
    #[serde(default)]
    pub address: String,
}

/// Either a rejection or a full report; always sent with HTTP 200
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    Invalid(InvalidAddressData),
    Checked(Box<CheckData>),
}

#[derive(Debug, Serialize)]
pub struct InvalidAddressData {
    pub error: String,
    pub valid: bool,
}

impl InvalidAddressData {
    pub fn new() -> Self {
        Self {
            error: "Invalid address format".to_string(),
            valid: false,
        }
    }
}

impl Default for InvalidAddressData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct CheckData {
    pub address: String,
    pub valid: bool,
    pub scam_check: RegistryLookup,
    /// `null` when no provider answered
    pub blockchain_data: Option<BlockchainSnapshot>,
    pub risk_analysis: RiskAssessment,
    /// Epoch seconds with millisecond precision
    pub timestamp: f64,
}

// ============================================
// Stats
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub cached_addresses: u64,
    pub scam_database_size: usize,
    pub status: String,
}

// ============================================
// Registry Admin
// ============================================

#[derive(Debug, Serialize)]
pub struct RegistryUpdateData {
    pub scam_database_size: usize,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
