use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for a completed batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRunResponse {
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "usersProcessed")]
    pub users_processed: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
