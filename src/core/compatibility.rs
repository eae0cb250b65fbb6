use crate::models::{Attribute, CompatibilityResult, PreferenceProfile, ScoreBreakdown};

/// Score used when either value is missing from an attribute's table
pub const NEUTRAL_SCORE: u8 = 50;

/// Highest possible total: 7 attributes at 100 each
pub const MAX_TOTAL: u32 = Attribute::ALL.len() as u32 * 100;

/// Hand-tuned compatibility tables.
///
/// Rows and columns follow `Attribute::domain()` order. Every direction is
/// written out; the lookup never mirrors an entry.
fn table(attribute: Attribute) -> &'static [[u8; 4]; 4] {
    match attribute {
        // Very tidy, Moderately clean, Relaxed about mess, Prefer organized chaos
        Attribute::Cleanliness => &[
            [100, 80, 40, 50],
            [80, 100, 70, 60],
            [40, 70, 100, 80],
            [50, 60, 80, 100],
        ],
        // Early bird, Night owl, Flexible, Irregular
        Attribute::SleepSchedule => &[
            [100, 30, 85, 60],
            [30, 100, 85, 60],
            [85, 85, 100, 80],
            [60, 60, 80, 100],
        ],
        // Quiet, Moderate, Louder spaces, Music/TV lover
        Attribute::NoiseTolerance => &[
            [100, 70, 40, 20],
            [70, 100, 80, 50],
            [40, 80, 100, 90],
            [20, 50, 90, 100],
        ],
        // Rarely, Occasionally, Frequently, Very often
        Attribute::Guests => &[
            [100, 80, 50, 30],
            [80, 100, 80, 50],
            [50, 80, 100, 85],
            [30, 50, 85, 100],
        ],
        // Homebody, Social butterfly, Balanced, Always out
        Attribute::Lifestyle => &[
            [100, 50, 80, 30],
            [50, 100, 80, 85],
            [80, 80, 100, 70],
            [30, 85, 70, 100],
        ],
        // Morning, Afternoon, Evening, Night shifts
        Attribute::StudyWork => &[
            [100, 70, 60, 30],
            [70, 100, 80, 50],
            [60, 80, 100, 70],
            [30, 50, 70, 100],
        ],
        // Cool, Moderate, Warm, No preference
        Attribute::AcPreference => &[
            [100, 70, 40, 80],
            [70, 100, 70, 90],
            [40, 70, 100, 80],
            [80, 90, 80, 100],
        ],
    }
}

/// Score two values of one attribute (0-100).
///
/// Unrecognized values fall back to [`NEUTRAL_SCORE`].
pub fn score(attribute: Attribute, a: &str, b: &str) -> u8 {
    let domain = attribute.domain();
    let row = domain.iter().position(|v| *v == a);
    let col = domain.iter().position(|v| *v == b);

    match (row, col) {
        (Some(i), Some(j)) => table(attribute)[i][j],
        _ => NEUTRAL_SCORE,
    }
}

/// Convert a total (0..=700) into a rounded percentage
#[inline]
pub fn percentage_of(total: u32) -> u8 {
    // round(total / MAX_TOTAL * 100) in integer arithmetic
    ((total * 100 + MAX_TOTAL / 2) / MAX_TOTAL) as u8
}

/// Score every attribute of two profiles and aggregate.
///
/// Pure: identical inputs always yield identical results.
pub fn score_pair(a: &PreferenceProfile, b: &PreferenceProfile) -> CompatibilityResult {
    let breakdown = ScoreBreakdown::from_fn(|attr| score(attr, a.value(attr), b.value(attr)));
    let total = breakdown.total();

    CompatibilityResult {
        total,
        percentage: percentage_of(total),
        breakdown,
    }
}
