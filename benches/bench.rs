// Criterion benchmarks for RoomSync Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roomsync_algo::core::{build_cost_matrix, score_pair, solve, Matcher};
use roomsync_algo::models::{Attribute, ParticipantId, PreferenceProfile};

/// Deterministic profile cycling through each attribute's domain
fn create_profile(id: usize) -> PreferenceProfile {
    let pick = |attr: Attribute, salt: usize| {
        let domain = attr.domain();
        domain[(id * 7 + salt * 3 + id / 4) % domain.len()].to_string()
    };

    PreferenceProfile {
        cleanliness: pick(Attribute::Cleanliness, 0),
        sleep_schedule: pick(Attribute::SleepSchedule, 1),
        noise_tolerance: pick(Attribute::NoiseTolerance, 2),
        guests: pick(Attribute::Guests, 3),
        lifestyle: pick(Attribute::Lifestyle, 4),
        study_work: pick(Attribute::StudyWork, 5),
        ac_preference: pick(Attribute::AcPreference, 6),
        roommate_count: "1 roommate".to_string(),
    }
}

fn create_population(n: usize) -> Vec<(ParticipantId, PreferenceProfile)> {
    (0..n).map(|i| (i as ParticipantId + 1, create_profile(i))).collect()
}

fn bench_score_pair(c: &mut Criterion) {
    let a = create_profile(1);
    let b = create_profile(2);

    c.bench_function("score_pair", |bench| {
        bench.iter(|| score_pair(black_box(&a), black_box(&b)));
    });
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("hungarian");

    for size in [10, 50, 100, 200].iter() {
        let population = create_population(*size);
        let cost = build_cost_matrix(population.iter().map(|(_, p)| p));

        group.bench_with_input(BenchmarkId::new("solve", size), size, |b, _| {
            b.iter(|| solve(black_box(&cost)));
        });
    }

    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let mut group = c.benchmark_group("matching");

    for size in [10, 50, 100].iter() {
        let population = create_population(*size);

        group.bench_with_input(BenchmarkId::new("compute_assignment", size), size, |b, _| {
            b.iter(|| matcher.compute_assignment(black_box(&population)));
        });

        group.bench_with_input(BenchmarkId::new("top_matches", size), size, |b, _| {
            b.iter(|| matcher.top_matches(black_box(1), black_box(&population), Some(10)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_pair, bench_solver, bench_matching);

criterion_main!(benches);
