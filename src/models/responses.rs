use serde::{Deserialize, Serialize};
use crate::models::domain::{join_tokens, Preferences, SwipeFilter};

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

/// Login response carrying the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Result of a swipe status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    /// `l`, `d`, or empty for undecided
    pub status: String,
    pub dog: i64,
}

impl SwipeResponse {
    pub fn new(status: SwipeFilter, dog_id: i64) -> Self {
        Self {
            status: status.code().to_string(),
            dog: dog_id,
        }
    }
}

/// Preferences as exposed over HTTP, with comma-joined token lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub id: i64,
    pub age: String,
    pub gender: String,
    pub size: String,
}

impl From<&Preferences> for PreferencesResponse {
    fn from(prefs: &Preferences) -> Self {
        Self {
            id: prefs.id,
            age: join_tokens(&prefs.age),
            gender: join_tokens(&prefs.gender),
            size: join_tokens(&prefs.size),
        }
    }
}
