use serde::{Deserialize, Serialize};
use crate::models::domain::{FeedCard, Profile, SavedEvent, SavedVenue, ScoredEvent, ScoredVenue, SwipeAction};

/// Response for the feed endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub feed: Vec<FeedCard>,
    pub venues: Vec<ScoredVenue>,
    pub events: Vec<ScoredEvent>,
    pub city: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FeedResponse {
    /// Empty feed with an explanation for the client
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            feed: vec![],
            venues: vec![],
            events: vec![],
            city: String::new(),
            count: 0,
            message: Some(message.into()),
        }
    }
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
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record swipe response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeResponse {
    pub success: bool,
    pub action: SwipeAction,
    pub swipe_id: uuid::Uuid,
}

/// Saved cards response
#[derive(Debug, Clone, Serialize)]
pub struct SavedResponse {
    pub venues: Vec<SavedVenue>,
    pub events: Vec<SavedEvent>,
    pub total: usize,
}

/// Preferences response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub profile: Profile,
}
