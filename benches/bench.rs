// Criterion benchmarks for Date Matcher

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use date_matcher::core::{cosine_similarity, Matchmaker, ParticipantCompatibility};
use date_matcher::models::Participant;
use date_matcher::services::{render_lp, ExhaustiveSolver, LpSolver};

fn create_participant(id: usize) -> Participant {
    Participant {
        name: format!("Person {}", id),
        gender: if id % 2 == 0 { "woman" } else { "man" }.to_string(),
        seeking: vec![if id % 3 == 0 { "woman" } else { "man" }.to_string()],
        day_choice: ["Friday", "Saturday", "Either"][id % 3].to_string(),
        answers: (0..10).map(|q| ((id * 7 + q * 3) % 5) as f64 + 1.0).collect(),
        excluded: vec![],
    }
}

fn create_roster(size: usize) -> Vec<Participant> {
    (0..size).map(create_participant).collect()
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let a: Vec<f64> = (0..30).map(|i| (i % 5) as f64).collect();
    let b: Vec<f64> = (0..30).map(|i| (i % 7) as f64).collect();

    c.bench_function("cosine_similarity", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_model_construction(c: &mut Criterion) {
    let matchmaker = Matchmaker::with_default_weights();
    let mut group = c.benchmark_group("model_construction");

    for size in [10, 50, 100].iter() {
        let roster = create_roster(*size);
        let capability = ParticipantCompatibility::new(&roster);

        group.bench_with_input(BenchmarkId::new("build", size), size, |b, _| {
            b.iter(|| matchmaker.build(black_box(&capability)));
        });
    }

    group.finish();
}

fn bench_lp_dump(c: &mut Criterion) {
    let roster = create_roster(50);
    let capability = ParticipantCompatibility::new(&roster);
    let built = match Matchmaker::default().build(&capability) {
        Ok(built) => built,
        Err(e) => panic!("model construction failed: {}", e),
    };

    c.bench_function("render_lp_50_participants", |b| {
        b.iter(|| render_lp(black_box(&built.model)));
    });
}

fn bench_solvers(c: &mut Criterion) {
    let matchmaker = Matchmaker::with_default_weights();
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for size in [6, 8, 10].iter() {
        let roster = create_roster(*size);
        let capability = ParticipantCompatibility::new(&roster);

        group.bench_with_input(BenchmarkId::new("exhaustive", size), size, |b, _| {
            b.iter(|| matchmaker.run(black_box(&capability), &ExhaustiveSolver));
        });
        group.bench_with_input(BenchmarkId::new("lp", size), size, |b, _| {
            b.iter(|| matchmaker.run(black_box(&capability), &LpSolver));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cosine_similarity,
    bench_model_construction,
    bench_lp_dump,
    bench_solvers
);

criterion_main!(benches);
