use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ParticipantId, PreferenceProfile};

/// Request to register a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    pub about: String,
    #[validate(nested)]
    pub preferences: PreferenceProfile,
}

/// Partial update of a participant; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub about: Option<String>,
    #[validate(nested)]
    pub preferences: Option<PreferenceProfile>,
}

/// Query string for the per-user ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesQuery {
    pub limit: Option<usize>,
}

/// Query string for an ad hoc comparison of two participants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareQuery {
    pub a: ParticipantId,
    pub b: ParticipantId,
}
