use serde::{Deserialize, Serialize};
use validator::Validate;

/// Participant identifier, assigned by the roster
pub type ParticipantId = u64;

/// Lifestyle attributes that take part in compatibility scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Cleanliness,
    SleepSchedule,
    NoiseTolerance,
    Guests,
    Lifestyle,
    StudyWork,
    AcPreference,
}

impl Attribute {
    /// All scored attributes, in definition order
    pub const ALL: [Attribute; 7] = [
        Attribute::Cleanliness,
        Attribute::SleepSchedule,
        Attribute::NoiseTolerance,
        Attribute::Guests,
        Attribute::Lifestyle,
        Attribute::StudyWork,
        Attribute::AcPreference,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Attribute::Cleanliness => "cleanliness",
            Attribute::SleepSchedule => "sleep_schedule",
            Attribute::NoiseTolerance => "noise_tolerance",
            Attribute::Guests => "guests",
            Attribute::Lifestyle => "lifestyle",
            Attribute::StudyWork => "study_work",
            Attribute::AcPreference => "ac_preference",
        }
    }

    /// Known categories for this attribute, in questionnaire order
    pub fn domain(self) -> &'static [&'static str] {
        match self {
            Attribute::Cleanliness => &[
                "Very tidy",
                "Moderately clean",
                "Relaxed about mess",
                "Prefer organized chaos",
            ],
            Attribute::SleepSchedule => &[
                "Early bird (before 10 PM)",
                "Night owl (after midnight)",
                "Flexible",
                "Irregular schedule",
            ],
            Attribute::NoiseTolerance => &[
                "Prefer quiet environment",
                "Moderate noise is fine",
                "Don't mind louder spaces",
                "Music/TV lover",
            ],
            Attribute::Guests => &[
                "Rarely",
                "Occasionally (1-2 times/month)",
                "Frequently (weekly)",
                "Very often",
            ],
            Attribute::Lifestyle => &["Homebody", "Social butterfly", "Balanced", "Always out"],
            Attribute::StudyWork => &["Morning person", "Afternoon", "Evening", "Night shifts"],
            Attribute::AcPreference => &[
                "Cool (below 68°F)",
                "Moderate (68-72°F)",
                "Warm (above 72°F)",
                "No preference",
            ],
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A participant's declared lifestyle preferences.
///
/// `roommate_count` ("1 roommate" .. "4+ roommates") is carried for display
/// and never scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PreferenceProfile {
    #[validate(length(min = 1))]
    pub cleanliness: String,
    #[validate(length(min = 1))]
    pub sleep_schedule: String,
    #[validate(length(min = 1))]
    pub noise_tolerance: String,
    #[validate(length(min = 1))]
    pub guests: String,
    #[validate(length(min = 1))]
    pub lifestyle: String,
    #[validate(length(min = 1))]
    pub study_work: String,
    #[validate(length(min = 1))]
    pub ac_preference: String,
    #[validate(length(min = 1))]
    pub roommate_count: String,
}

impl PreferenceProfile {
    pub fn value(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Cleanliness => &self.cleanliness,
            Attribute::SleepSchedule => &self.sleep_schedule,
            Attribute::NoiseTolerance => &self.noise_tolerance,
            Attribute::Guests => &self.guests,
            Attribute::Lifestyle => &self.lifestyle,
            Attribute::StudyWork => &self.study_work,
            Attribute::AcPreference => &self.ac_preference,
        }
    }

    /// Scored attributes whose value falls outside the known domain.
    /// These score neutrally instead of failing.
    pub fn unknown_values(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|attr| !attr.domain().contains(&self.value(*attr)))
            .collect()
    }
}

/// Per-attribute compatibility scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cleanliness: u8,
    pub sleep_schedule: u8,
    pub noise_tolerance: u8,
    pub guests: u8,
    pub lifestyle: u8,
    pub study_work: u8,
    pub ac_preference: u8,
}

impl ScoreBreakdown {
    /// Build a breakdown by evaluating `f` once per attribute
    pub fn from_fn(mut f: impl FnMut(Attribute) -> u8) -> Self {
        Self {
            cleanliness: f(Attribute::Cleanliness),
            sleep_schedule: f(Attribute::SleepSchedule),
            noise_tolerance: f(Attribute::NoiseTolerance),
            guests: f(Attribute::Guests),
            lifestyle: f(Attribute::Lifestyle),
            study_work: f(Attribute::StudyWork),
            ac_preference: f(Attribute::AcPreference),
        }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Cleanliness => self.cleanliness,
            Attribute::SleepSchedule => self.sleep_schedule,
            Attribute::NoiseTolerance => self.noise_tolerance,
            Attribute::Guests => self.guests,
            Attribute::Lifestyle => self.lifestyle,
            Attribute::StudyWork => self.study_work,
            Attribute::AcPreference => self.ac_preference,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::ALL.into_iter().map(move |attr| (attr, self.get(attr)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, score)| score as u32).sum()
    }
}

/// Aggregate compatibility between two profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Sum of the breakdown, 0..=700
    pub total: u32,
    /// `round(total / 700 * 100)`
    pub percentage: u8,
    pub breakdown: ScoreBreakdown,
}

/// A roster entry: identity, contact details and preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub about: String,
    pub preferences: PreferenceProfile,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// One entry of an assignment, or one ranked candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub subject_id: ParticipantId,
    pub partner_id: ParticipantId,
    pub compatibility_percentage: u8,
    pub breakdown: ScoreBreakdown,
}

/// Result of a population-wide assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingSummary {
    pub total_cost: f64,
    pub average_compatibility: u8,
    pub matches: Vec<MatchRecord>,
    pub unmatched: Vec<ParticipantId>,
}

impl MatchingSummary {
    /// Summary where nobody could be paired
    pub fn unpaired(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        Self {
            total_cost: 0.0,
            average_compatibility: 0,
            matches: Vec::new(),
            unmatched: ids.into_iter().collect(),
        }
    }

    pub fn stats(&self, total_users: usize) -> CompatibilityStats {
        CompatibilityStats {
            total_users,
            total_matches: self.matches.len(),
            average_compatibility: self.average_compatibility,
            unmatched_count: self.unmatched.len(),
            total_cost: self.total_cost,
        }
    }
}

/// Population-level figures derived from a summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityStats {
    pub total_users: usize,
    pub total_matches: usize,
    pub average_compatibility: u8,
    pub unmatched_count: usize,
    pub total_cost: f64,
}
