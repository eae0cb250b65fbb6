// Property tests: the solver against brute-force enumeration

use proptest::prelude::*;
use roomsync_algo::core::{
    compatibility::score_pair,
    hungarian::{assignment_cost, solve},
    CostMatrix, Matcher,
};
use roomsync_algo::models::{Attribute, ParticipantId, PreferenceProfile};

/// Cheapest total over every permutation
fn brute_force_min(cost: &CostMatrix) -> f64 {
    fn walk(cost: &CostMatrix, row: usize, used: &mut Vec<bool>, acc: f64, best: &mut f64) {
        let n = cost.size();
        if row == n {
            *best = best.min(acc);
            return;
        }
        for col in 0..n {
            if !used[col] {
                used[col] = true;
                walk(cost, row + 1, used, acc + cost[(row, col)], best);
                used[col] = false;
            }
        }
    }

    let mut best = f64::INFINITY;
    walk(cost, 0, &mut vec![false; cost.size()], 0.0, &mut best);
    best
}

fn is_permutation(n: usize, pairs: &[(usize, usize)]) -> bool {
    let mut rows = vec![false; n];
    let mut cols = vec![false; n];
    for &(r, c) in pairs {
        if rows[r] || cols[c] {
            return false;
        }
        rows[r] = true;
        cols[c] = true;
    }
    pairs.len() == n
}

/// Roommate-style matrices: integer costs 0..=100, infinite diagonal
fn roommate_matrix() -> impl Strategy<Value = CostMatrix> {
    (2usize..=6)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0u8..=100, n), n))
        .prop_map(|rows| {
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, v)| if i == j { f64::INFINITY } else { v as f64 })
                        .collect()
                })
                .collect();
            CostMatrix::from_rows(rows)
        })
}

/// Fully finite matrices, including 1×1
fn finite_matrix() -> impl Strategy<Value = CostMatrix> {
    (1usize..=6)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0u16..=1000, n), n))
        .prop_map(|rows| {
            CostMatrix::from_rows(
                rows.into_iter()
                    .map(|row| row.into_iter().map(f64::from).collect())
                    .collect(),
            )
        })
}

fn attribute_value(attr: Attribute) -> impl Strategy<Value = String> {
    let known: Vec<String> = attr.domain().iter().map(|s| s.to_string()).collect();
    prop_oneof![
        9 => prop::sample::select(known),
        1 => Just("Unlisted".to_string()),
    ]
}

fn profile() -> impl Strategy<Value = PreferenceProfile> {
    (
        attribute_value(Attribute::Cleanliness),
        attribute_value(Attribute::SleepSchedule),
        attribute_value(Attribute::NoiseTolerance),
        attribute_value(Attribute::Guests),
        attribute_value(Attribute::Lifestyle),
        attribute_value(Attribute::StudyWork),
        attribute_value(Attribute::AcPreference),
    )
        .prop_map(|(c, s, n, g, l, w, a)| PreferenceProfile {
            cleanliness: c,
            sleep_schedule: s,
            noise_tolerance: n,
            guests: g,
            lifestyle: l,
            study_work: w,
            ac_preference: a,
            roommate_count: "1 roommate".to_string(),
        })
}

proptest! {
    #[test]
    fn solver_is_optimal_on_roommate_matrices(cost in roommate_matrix()) {
        let assignments = solve(&cost).unwrap();
        let pairs: Vec<_> = assignments.iter().map(|a| (a.row, a.col)).collect();

        prop_assert!(is_permutation(cost.size(), &pairs));
        prop_assert!(pairs.iter().all(|(r, c)| r != c));
        prop_assert_eq!(assignment_cost(&cost, &assignments), brute_force_min(&cost));
    }

    #[test]
    fn solver_is_optimal_on_finite_matrices(cost in finite_matrix()) {
        let assignments = solve(&cost).unwrap();
        let pairs: Vec<_> = assignments.iter().map(|a| (a.row, a.col)).collect();

        prop_assert!(is_permutation(cost.size(), &pairs));
        prop_assert_eq!(assignment_cost(&cost, &assignments), brute_force_min(&cost));
    }

    #[test]
    fn solver_is_deterministic(cost in roommate_matrix()) {
        prop_assert_eq!(solve(&cost), solve(&cost));
    }

    #[test]
    fn score_pair_is_bounded_and_symmetric(a in profile(), b in profile()) {
        let ab = score_pair(&a, &b);
        prop_assert!(ab.percentage <= 100);
        prop_assert!(ab.total <= 700);
        prop_assert_eq!(ab.total, ab.breakdown.iter().map(|(_, s)| s as u32).sum::<u32>());
        prop_assert!(ab.breakdown.iter().all(|(_, s)| s <= 100));
        prop_assert_eq!(ab, score_pair(&b, &a));
    }

    #[test]
    fn summary_covers_everyone(profiles in prop::collection::vec(profile(), 2..=6)) {
        let people: Vec<(ParticipantId, PreferenceProfile)> =
            profiles.into_iter().enumerate().map(|(i, p)| (i as ParticipantId + 100, p)).collect();

        let summary = Matcher::default().compute_assignment(&people).unwrap();

        prop_assert_eq!(summary.matches.len(), people.len());
        prop_assert!(summary.unmatched.is_empty());
        prop_assert!(summary.matches.iter().all(|m| m.subject_id != m.partner_id));

        let cost = roomsync_algo::core::build_cost_matrix(people.iter().map(|(_, p)| p));
        prop_assert_eq!(summary.total_cost, brute_force_min(&cost));
    }
}
