// Core algorithm exports
pub mod compatibility;
pub mod cost;
pub mod hungarian;
pub mod matcher;

pub use compatibility::{score, score_pair, NEUTRAL_SCORE};
pub use cost::{build_cost_matrix, compatibility_to_cost, CostMatrix};
pub use hungarian::{assignment_cost, solve, Assignment, AssignmentError};
pub use matcher::{Matcher, MatchingError, Profiled, DEFAULT_LIMIT};
