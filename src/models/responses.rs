use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchRecord, Participant, ParticipantId, PreferenceProfile};

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

/// Public view of a participant (timestamps stay internal)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub about: String,
    pub preferences: PreferenceProfile,
}

impl From<Participant> for UserResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            about: p.about,
            preferences: p.preferences,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// Acknowledgement for create and update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMutationResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Match record decorated with names for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub matched_with_name: Option<String>,
    pub matched_with_bio: Option<String>,
}

/// Response for the population-wide assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllMatchesResponse {
    pub total_cost: f64,
    pub average_compatibility: u8,
    pub matches: Vec<EnrichedMatch>,
    pub unmatched: Vec<ParticipantId>,
}

/// Response for the per-user ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub matches: Vec<EnrichedMatch>,
}
