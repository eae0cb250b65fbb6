//! RoomSync Algo - optimal roommate assignment service
//!
//! This library scores pairwise lifestyle compatibility between participants,
//! turns the scores into an assignment cost matrix and solves it exactly with
//! the Hungarian algorithm.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_cost_matrix, score_pair, solve, Matcher};
pub use crate::models::{CompatibilityResult, MatchRecord, MatchingSummary, Participant, PreferenceProfile};
