use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{
    compatibility::score_pair,
    cost::build_cost_matrix,
    hungarian::{self, AssignmentError},
};
use crate::models::{CompatibilityResult, MatchRecord, MatchingSummary, Participant, ParticipantId, PreferenceProfile};

/// Number of ranked candidates returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 10;

/// Errors raised while computing a population-wide assignment
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("assignment failed: {0}")]
    Assignment(#[from] AssignmentError),
}

/// Anything that carries a participant id and a preference profile
pub trait Profiled {
    fn id(&self) -> ParticipantId;
    fn profile(&self) -> &PreferenceProfile;
}

impl Profiled for Participant {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn profile(&self) -> &PreferenceProfile {
        &self.preferences
    }
}

impl Profiled for (ParticipantId, PreferenceProfile) {
    fn id(&self) -> ParticipantId {
        self.0
    }

    fn profile(&self) -> &PreferenceProfile {
        &self.1
    }
}

/// Matching orchestrator
///
/// # Queries
/// 1. Global assignment: score all pairs, build the cost matrix, solve it
///    with the Hungarian algorithm, then summarize
/// 2. Per-subject ranking: score one participant against everyone else
#[derive(Debug, Clone)]
pub struct Matcher {
    default_limit: usize,
}

impl Matcher {
    pub fn new(default_limit: usize) -> Self {
        Self { default_limit }
    }

    pub fn with_default_limit() -> Self {
        Self::new(DEFAULT_LIMIT)
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Compute the cost-minimizing assignment over a population.
    ///
    /// Each solver entry becomes one record with the row as subject and the
    /// column as partner. The solver yields a permutation, so longer cycles
    /// (A→B, B→C, C→A) appear as-is rather than as mutual pairs.
    ///
    /// # Arguments
    /// * `participants` - Population snapshot, in matrix order
    ///
    /// # Returns
    /// MatchingSummary with records, totals and unmatched ids
    pub fn compute_assignment<P: Profiled>(&self, participants: &[P]) -> Result<MatchingSummary, MatchingError> {
        if participants.len() < 2 {
            debug!("Population of {} is too small to pair", participants.len());
            return Ok(MatchingSummary::unpaired(participants.iter().map(Profiled::id)));
        }

        for p in participants {
            let unknown = p.profile().unknown_values();
            if !unknown.is_empty() {
                debug!("Participant {} has unrecognized values for {:?}, scoring neutrally", p.id(), unknown);
            }
        }

        let cost = build_cost_matrix(participants.iter().map(Profiled::profile));
        let assignments = hungarian::solve(&cost)?;

        let mut matched: HashSet<ParticipantId> = HashSet::with_capacity(participants.len());
        let matches: Vec<MatchRecord> = assignments
            .iter()
            .map(|a| {
                let subject = &participants[a.row];
                let partner = &participants[a.col];
                matched.insert(subject.id());
                matched.insert(partner.id());
                // Breakdown comes from the scorer, not from the rounded cost
                record(subject, partner, score_pair(subject.profile(), partner.profile()))
            })
            .collect();

        let unmatched: Vec<ParticipantId> = participants
            .iter()
            .map(Profiled::id)
            .filter(|id| !matched.contains(id))
            .collect();

        let total_cost = hungarian::assignment_cost(&cost, &assignments);
        let average_compatibility = average_percentage(&matches);

        let one_way = count_one_way(&matches);
        if one_way > 0 {
            debug!("{} of {} assignments are not reciprocated", one_way, matches.len());
        }

        info!(
            "Assigned {} participants (total cost: {}, average compatibility: {}%)",
            participants.len(),
            total_cost,
            average_compatibility
        );

        Ok(MatchingSummary {
            total_cost,
            average_compatibility,
            matches,
            unmatched,
        })
    }

    /// Rank everyone else by compatibility with `subject_id`.
    ///
    /// Does not run the solver. An unknown subject yields no records.
    /// Equal percentages keep population order.
    pub fn top_matches<P: Profiled>(
        &self,
        subject_id: ParticipantId,
        participants: &[P],
        limit: Option<usize>,
    ) -> Vec<MatchRecord> {
        let Some(subject) = participants.iter().find(|p| p.id() == subject_id) else {
            debug!("No profile for subject {}", subject_id);
            return Vec::new();
        };

        let mut ranked: Vec<MatchRecord> = participants
            .iter()
            .filter(|p| p.id() != subject_id)
            .map(|other| record(subject, other, score_pair(subject.profile(), other.profile())))
            .collect();

        ranked.sort_by(|a, b| b.compatibility_percentage.cmp(&a.compatibility_percentage));
        ranked.truncate(limit.unwrap_or(self.default_limit));
        ranked
    }

    /// Ad hoc comparison of two profiles
    pub fn compare(&self, a: &PreferenceProfile, b: &PreferenceProfile) -> CompatibilityResult {
        score_pair(a, b)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_limit()
    }
}

fn record<P: Profiled>(subject: &P, partner: &P, result: CompatibilityResult) -> MatchRecord {
    MatchRecord {
        subject_id: subject.id(),
        partner_id: partner.id(),
        compatibility_percentage: result.percentage,
        breakdown: result.breakdown,
    }
}

/// Rounded mean percentage, 0 for no records
fn average_percentage(matches: &[MatchRecord]) -> u8 {
    if matches.is_empty() {
        return 0;
    }
    let sum: u32 = matches.iter().map(|m| m.compatibility_percentage as u32).sum();
    (sum as f64 / matches.len() as f64).round() as u8
}

/// Records whose partner is not assigned back to the subject
fn count_one_way(matches: &[MatchRecord]) -> usize {
    let edges: HashSet<(ParticipantId, ParticipantId)> =
        matches.iter().map(|m| (m.subject_id, m.partner_id)).collect();
    matches
        .iter()
        .filter(|m| !edges.contains(&(m.partner_id, m.subject_id)))
        .count()
}
