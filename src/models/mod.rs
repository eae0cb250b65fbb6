// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Attribute, CompatibilityResult, CompatibilityStats, MatchRecord, MatchingSummary, Participant,
    ParticipantId, PreferenceProfile, ScoreBreakdown,
};
pub use requests::{CompareQuery, CreateUserRequest, TopMatchesQuery, UpdateUserRequest};
pub use responses::{
    AllMatchesResponse, EnrichedMatch, ErrorResponse, HealthResponse, MessageResponse, TopMatchesResponse,
    UserMutationResponse, UserResponse, UsersResponse,
};
